use crate::Codable;
use crate::decode::DecodingContainer;
use crate::encode::EncodingContainer;
use crate::error::Error;
use crate::tag::{Tag, UniversalTag};

/// BIT STRING: payload bytes plus the count of unused bits in the last byte.
///
/// The wire content is one unused-bit-count byte (0..=7) followed by the
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        assert!(unused < 8, "unused bit count must be 0..=7");
        BitString { unused, data }
    }

    /// A bit string using every bit of `data`.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        BitString { unused: 0, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn bit_len(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.data.len() * 8 - self.unused as usize
        }
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Codable for BitString {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::BitString)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let bytes = container.decode_bytes(Tag::Universal(UniversalTag::BitString))?;
        let (&unused, data) = bytes.split_first().ok_or_else(|| {
            Error::InvalidEncoding("bit string content is empty".to_string())
        })?;
        if unused > 7 {
            return Err(Error::InvalidEncoding(format!(
                "bit string declares {} unused bits",
                unused
            )));
        }
        Ok(BitString {
            unused,
            data: data.to_vec(),
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        let mut content = Vec::with_capacity(self.data.len() + 1);
        content.push(self.unused);
        content.extend_from_slice(&self.data);
        container.encode_bytes(Tag::Universal(UniversalTag::BitString), &content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::decode::DecodingContainer;
    use crate::encode::EncodingContainer;
    use crate::error::Error;

    use super::BitString;

    #[rstest(input, expected,
        case(vec![0x03, 0x01, 0x00], BitString::from_bytes(vec![])),
        case(vec![0x03, 0x02, 0x00, 0xa5], BitString::from_bytes(vec![0xa5])),
        case(vec![0x03, 0x03, 0x06, 0x6e, 0x40], BitString::new(6, vec![0x6e, 0x40])),
    )]
    fn test_bit_string_decode(input: Vec<u8>, expected: BitString) {
        let mut container = DecodingContainer::new(&input);
        let actual = container.decode::<BitString>().unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input,
        // no unused-bit-count byte at all
        case(vec![0x03, 0x00]),
        // unused count out of range
        case(vec![0x03, 0x02, 0x08, 0xff]),
    )]
    fn test_bit_string_decode_invalid(input: Vec<u8>) {
        let mut container = DecodingContainer::new(&input);
        assert!(matches!(
            container.decode::<BitString>(),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[rstest(input, expected,
        case(BitString::from_bytes(vec![0xa5]), vec![0x03, 0x02, 0x00, 0xa5]),
        case(BitString::new(6, vec![0x6e, 0x40]), vec![0x03, 0x03, 0x06, 0x6e, 0x40]),
    )]
    fn test_bit_string_encode(input: BitString, expected: Vec<u8>) {
        let mut container = EncodingContainer::new();
        container.encode(&input).unwrap();
        assert_eq!(expected, container.freeze());
    }

    #[rstest(input, expected,
        case(BitString::from_bytes(vec![]), 0),
        case(BitString::from_bytes(vec![0xff]), 8),
        case(BitString::new(6, vec![0x6e, 0x40]), 10),
    )]
    fn test_bit_len(input: BitString, expected: usize) {
        assert_eq!(expected, input.bit_len());
    }
}
