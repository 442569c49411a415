use std::fmt::{self, Display};

use crate::Codable;
use crate::decode::DecodingContainer;
use crate::encode::EncodingContainer;
use crate::error::Error;
use crate::tag::{Tag, UniversalTag};

/// Character set of an ASN.1 string, selected by the wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Ia5,
    Printable,
    Utf8,
}

impl StringEncoding {
    fn from_tag(tag: Tag) -> Option<StringEncoding> {
        match tag {
            Tag::Universal(UniversalTag::Ia5String) => Some(StringEncoding::Ia5),
            Tag::Universal(UniversalTag::PrintableString) => Some(StringEncoding::Printable),
            Tag::Universal(UniversalTag::Utf8String) => Some(StringEncoding::Utf8),
            _ => None,
        }
    }

    fn tag(&self) -> Tag {
        match self {
            StringEncoding::Ia5 => Tag::Universal(UniversalTag::Ia5String),
            StringEncoding::Printable => Tag::Universal(UniversalTag::PrintableString),
            StringEncoding::Utf8 => Tag::Universal(UniversalTag::Utf8String),
        }
    }
}

/// Tagged character string. IA5String and PrintableString are restricted to
/// ASCII; UTF8String carries any UTF-8 text. A decoded string remembers its
/// wire encoding so that re-encoding keeps the original tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asn1String {
    value: String,
    encoding: StringEncoding,
}

impl Asn1String {
    pub fn new(value: impl Into<String>, encoding: StringEncoding) -> Self {
        Asn1String {
            value: value.into(),
            encoding,
        }
    }

    pub fn utf8(value: impl Into<String>) -> Self {
        Asn1String::new(value, StringEncoding::Utf8)
    }

    pub fn printable(value: impl Into<String>) -> Self {
        Asn1String::new(value, StringEncoding::Printable)
    }

    pub fn ia5(value: impl Into<String>) -> Self {
        Asn1String::new(value, StringEncoding::Ia5)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn encoding(&self) -> StringEncoding {
        self.encoding
    }
}

impl Codable for Asn1String {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        StringEncoding::from_tag(tag).is_some()
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let tag = match container.peek_tag() {
            Some(tag) => tag,
            None => {
                return Err(match container.peek_byte() {
                    Some(byte) => Error::UnrecognizedTag(byte),
                    None => Error::Truncated,
                });
            }
        };
        let encoding = StringEncoding::from_tag(tag).ok_or_else(|| {
            Error::InvalidEncoding(format!("tag {:?} does not identify a character string", tag))
        })?;

        let bytes = container.decode_bytes(tag)?;
        match encoding {
            StringEncoding::Ia5 | StringEncoding::Printable => {
                if !bytes.is_ascii() {
                    return Err(Error::InvalidEncoding(
                        "non-ASCII content in an ASCII string".to_string(),
                    ));
                }
            }
            StringEncoding::Utf8 => {}
        }
        let value = String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?;

        Ok(Asn1String { value, encoding })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        match self.encoding {
            StringEncoding::Ia5 | StringEncoding::Printable => {
                if !self.value.is_ascii() {
                    return Err(Error::InvalidEncoding(
                        "non-ASCII content in an ASCII string".to_string(),
                    ));
                }
            }
            StringEncoding::Utf8 => {}
        }
        container.encode_bytes(self.encoding.tag(), self.value.as_bytes());
        Ok(())
    }
}

impl Display for Asn1String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::decode::DecodingContainer;
    use crate::encode::EncodingContainer;
    use crate::error::Error;

    use super::Asn1String;

    #[rstest(input, expected,
        case(vec![0x13, 0x02, 0x68, 0x69], Asn1String::printable("hi")),
        case(vec![0x16, 0x02, 0x68, 0x69], Asn1String::ia5("hi")),
        case(vec![0x0c, 0x04, 0xf0, 0x9f, 0x98, 0x8e], Asn1String::utf8("\u{1f60e}")),
    )]
    fn test_string_decode(input: Vec<u8>, expected: Asn1String) {
        let mut container = DecodingContainer::new(&input);
        assert_eq!(expected, container.decode::<Asn1String>().unwrap());
    }

    #[rstest(input,
        // non-ASCII bytes under an ASCII tag
        case(vec![0x13, 0x02, 0xc3, 0xa9]),
        // invalid UTF-8 under the UTF8String tag
        case(vec![0x0c, 0x01, 0xff]),
        // not a character string tag at all
        case(vec![0x02, 0x01, 0x00]),
    )]
    fn test_string_decode_invalid(input: Vec<u8>) {
        let mut container = DecodingContainer::new(&input);
        assert!(matches!(
            container.decode::<Asn1String>(),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[rstest(input, expected,
        case(Asn1String::printable("hi"), vec![0x13, 0x02, 0x68, 0x69]),
        case(Asn1String::ia5("hi"), vec![0x16, 0x02, 0x68, 0x69]),
        case(Asn1String::utf8("hi"), vec![0x0c, 0x02, 0x68, 0x69]),
    )]
    fn test_string_encode(input: Asn1String, expected: Vec<u8>) {
        let mut container = EncodingContainer::new();
        container.encode(&input).unwrap();
        assert_eq!(expected, container.freeze());
    }

    #[test]
    fn test_ascii_enforced_on_encode() {
        let mut container = EncodingContainer::new();
        let result = container.encode(&Asn1String::printable("caf\u{e9}"));
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }
}
