use crate::Codable;
use crate::cursor::ByteCursor;
use crate::error::Error;
use crate::length::decode_length;
use crate::tag::{Tag, UniversalTag};

/// Read-side DER container.
///
/// The slice covers the container's complete encoding, tag and length
/// included for a nested container, so [`bytes`](Self::bytes) exposes the
/// exact raw form for caching. The read position starts at the content.
///
/// Containers form a tree mirroring the nesting of the encoded structure:
/// [`sequence`](Self::sequence), [`set`](Self::set) and
/// [`context_container`](Self::context_container) consume a tag and length
/// from the parent and return a child scoped to exactly that many bytes.
#[derive(Debug, Clone)]
pub struct DecodingContainer<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> DecodingContainer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        DecodingContainer {
            cursor: ByteCursor::new(bytes),
        }
    }

    fn with_index(bytes: &'a [u8], index: usize) -> Self {
        DecodingContainer {
            cursor: ByteCursor::with_index(bytes, index),
        }
    }

    /// The container's complete raw encoding, position-independent.
    pub fn bytes(&self) -> &'a [u8] {
        self.cursor.bytes()
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Reject over-long encodings: every top-level decode and every nested
    /// SEQUENCE/SET decode must end here.
    pub fn assert_at_end(&self) -> Result<(), Error> {
        if self.at_end() {
            Ok(())
        } else {
            Err(Error::TrailingData)
        }
    }

    // Tags

    /// The next tag without consuming it; `None` at the end of the
    /// container or when the next byte is not a recognized tag.
    pub fn peek_tag(&self) -> Option<Tag> {
        self.cursor.peek().and_then(|byte| Tag::from_byte(byte).ok())
    }

    pub(crate) fn peek_byte(&self) -> Option<u8> {
        self.cursor.peek()
    }

    fn peeks(&self, tag: Tag) -> bool {
        self.peek_tag() == Some(tag)
    }

    /// Consume the next tag, which must equal `tag`.
    pub fn expect(&mut self, tag: Tag) -> Result<(), Error> {
        let found = Tag::from_byte(self.cursor.read_byte()?)?;
        if found != tag {
            return Err(Error::UnexpectedTag {
                expected: tag,
                found,
            });
        }
        Ok(())
    }

    // Containers

    pub fn sequence(&mut self) -> Result<DecodingContainer<'a>, Error> {
        self.container(Tag::Universal(UniversalTag::Sequence))
    }

    pub fn sequence_if_present(&mut self) -> Result<Option<DecodingContainer<'a>>, Error> {
        self.container_if_present(Tag::Universal(UniversalTag::Sequence))
    }

    pub fn set(&mut self) -> Result<DecodingContainer<'a>, Error> {
        self.container(Tag::Universal(UniversalTag::Set))
    }

    pub fn set_if_present(&mut self) -> Result<Option<DecodingContainer<'a>>, Error> {
        self.container_if_present(Tag::Universal(UniversalTag::Set))
    }

    pub fn context_container(
        &mut self,
        id: u8,
        primitive: bool,
    ) -> Result<DecodingContainer<'a>, Error> {
        self.container(Tag::context(id, primitive))
    }

    pub fn context_container_if_present(
        &mut self,
        id: u8,
        primitive: bool,
    ) -> Result<Option<DecodingContainer<'a>>, Error> {
        self.container_if_present(Tag::context(id, primitive))
    }

    pub fn container(&mut self, tag: Tag) -> Result<DecodingContainer<'a>, Error> {
        let start = self.cursor.position();
        self.expect(tag)?;
        let length = decode_length(&mut self.cursor)?;
        let content = self.cursor.position();
        self.cursor.advance(length)?;
        let end = self.cursor.position();

        Ok(DecodingContainer::with_index(
            &self.cursor.bytes()[start..end],
            content - start,
        ))
    }

    pub fn container_if_present(
        &mut self,
        tag: Tag,
    ) -> Result<Option<DecodingContainer<'a>>, Error> {
        if self.peeks(tag) {
            self.container(tag).map(Some)
        } else {
            Ok(None)
        }
    }

    // Content

    /// Consume a complete TLV with the given tag and return its content
    /// bytes.
    pub fn decode_bytes(&mut self, tag: Tag) -> Result<&'a [u8], Error> {
        self.expect(tag)?;
        let length = decode_length(&mut self.cursor)?;
        self.cursor.read_exact(length)
    }

    // Generic

    pub fn decode<T: Codable>(&mut self) -> Result<T, T::Error> {
        T::decode(self)
    }

    /// Decode a `T` only when the next tag belongs to one; `None` otherwise,
    /// consuming nothing. This is how OPTIONAL schema fields are read.
    pub fn decode_if_present<T: Codable>(&mut self) -> Result<Option<T>, T::Error> {
        match self.peek_tag() {
            Some(tag) if T::matches(tag) => T::decode(self).map(Some),
            _ => Ok(None),
        }
    }

    /// Decode `T`s until the container is exhausted (SEQUENCE OF / SET OF).
    pub fn decode_list<T: Codable>(&mut self) -> Result<Vec<T>, T::Error> {
        let mut values = Vec::new();
        while !self.at_end() {
            values.push(T::decode(self)?);
        }
        Ok(values)
    }

    // Primitives

    pub fn decode_bool(&mut self) -> Result<bool, Error> {
        let bytes = self.decode_bytes(Tag::Universal(UniversalTag::Boolean))?;
        match bytes {
            [0x00] => Ok(false),
            [0xff] => Ok(true),
            _ => Err(Error::InvalidEncoding(
                "boolean content must be a single 0x00 or 0xff byte".to_string(),
            )),
        }
    }

    pub fn decode_bool_if_present(&mut self) -> Result<Option<bool>, Error> {
        if self.peeks(Tag::Universal(UniversalTag::Boolean)) {
            self.decode_bool().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Decode an INTEGER whose first content byte's high bit is read as the
    /// sign of the magnitude held in the remaining bits.
    pub fn decode_i64(&mut self) -> Result<i64, Error> {
        let bytes = self.decode_bytes(Tag::Universal(UniversalTag::Integer))?;
        if bytes.is_empty() || bytes.len() > 8 {
            return Err(Error::InvalidEncoding(format!(
                "integer content of {} bytes does not fit an i64",
                bytes.len()
            )));
        }

        let mut first = bytes[0];
        let mut sign = 1i64;
        if first & 0x80 != 0 {
            first ^= 0x80;
            sign = -1;
        }
        let mut value = i64::from(first);
        for &byte in &bytes[1..] {
            value = (value << 8) + i64::from(byte);
        }
        Ok(value * sign)
    }

    pub fn decode_i64_if_present(&mut self) -> Result<Option<i64>, Error> {
        if self.peeks(Tag::Universal(UniversalTag::Integer)) {
            self.decode_i64().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Decode a non-negative INTEGER, stripping the sign-disambiguating
    /// leading zero byte when present.
    pub fn decode_u64(&mut self) -> Result<u64, Error> {
        let bytes = self.decode_bytes(Tag::Universal(UniversalTag::Integer))?;
        let bytes = match bytes {
            [0x00, rest @ ..] if !rest.is_empty() => rest,
            other => other,
        };
        if bytes.is_empty() || bytes.len() > 8 {
            return Err(Error::InvalidEncoding(format!(
                "integer content of {} bytes does not fit a u64",
                bytes.len()
            )));
        }

        let mut value = 0u64;
        for &byte in bytes {
            value = (value << 8) | u64::from(byte);
        }
        Ok(value)
    }

    pub fn decode_u64_if_present(&mut self) -> Result<Option<u64>, Error> {
        if self.peeks(Tag::Universal(UniversalTag::Integer)) {
            self.decode_u64().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume a NULL; presence alone is the signal, the content must be
    /// empty.
    pub fn decode_null(&mut self) -> Result<(), Error> {
        let bytes = self.decode_bytes(Tag::Universal(UniversalTag::Null))?;
        if !bytes.is_empty() {
            return Err(Error::InvalidEncoding(
                "null content must be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn decode_null_if_present(&mut self) -> Result<bool, Error> {
        if self.peeks(Tag::Universal(UniversalTag::Null)) {
            self.decode_null()?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::Error;
    use crate::tag::{Tag, UniversalTag};

    use super::DecodingContainer;

    #[test]
    fn test_sequence_scopes_child() {
        // SEQUENCE { INTEGER 7, INTEGER 8 } INTEGER 9
        let data = [
            0x30, 0x06, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09,
        ];
        let mut container = DecodingContainer::new(&data);

        let mut seq = container.sequence().unwrap();
        assert_eq!(seq.bytes(), &data[..8]);
        assert_eq!(seq.decode_i64().unwrap(), 7);
        assert_eq!(seq.decode_i64().unwrap(), 8);
        seq.assert_at_end().unwrap();

        // the parent has moved past the whole sequence
        assert_eq!(container.decode_i64().unwrap(), 9);
        container.assert_at_end().unwrap();
    }

    #[test]
    fn test_sequence_length_overrun() {
        let data = [0x30, 0x05, 0x02, 0x01, 0x07];
        let mut container = DecodingContainer::new(&data);
        assert!(matches!(container.sequence(), Err(Error::Truncated)));
    }

    #[test]
    fn test_indefinite_length_rejected() {
        let data = [0x30, 0x80, 0x00, 0x00];
        let mut container = DecodingContainer::new(&data);
        assert!(matches!(
            container.sequence(),
            Err(Error::IndefiniteLength)
        ));
    }

    #[test]
    fn test_expect_mismatch() {
        let data = [0x02, 0x01, 0x07];
        let mut container = DecodingContainer::new(&data);
        let result = container.expect(Tag::Universal(UniversalTag::Sequence));
        assert!(matches!(
            result,
            Err(Error::UnexpectedTag {
                expected: Tag::Universal(UniversalTag::Sequence),
                found: Tag::Universal(UniversalTag::Integer),
            })
        ));
    }

    #[test]
    fn test_peek_tag() {
        let data = [0x30, 0x00];
        let mut container = DecodingContainer::new(&data);
        assert_eq!(
            container.peek_tag(),
            Some(Tag::Universal(UniversalTag::Sequence))
        );

        let seq = container.sequence().unwrap();
        assert_eq!(seq.peek_tag(), None);
        assert_eq!(container.peek_tag(), None);
    }

    #[test]
    fn test_context_container_if_present() {
        // [0] { INTEGER 2 } followed by INTEGER 5
        let data = [0xa0, 0x03, 0x02, 0x01, 0x02, 0x02, 0x01, 0x05];
        let mut container = DecodingContainer::new(&data);

        assert!(container.context_container_if_present(1, false).unwrap().is_none());
        let mut ctx = container
            .context_container_if_present(0, false)
            .unwrap()
            .unwrap();
        assert_eq!(ctx.decode_u64().unwrap(), 2);
        ctx.assert_at_end().unwrap();

        assert_eq!(container.decode_u64().unwrap(), 5);
    }

    #[rstest(input, expected,
        case(vec![0x01, 0x01, 0x00], false),
        case(vec![0x01, 0x01, 0xff], true),
    )]
    fn test_decode_bool(input: Vec<u8>, expected: bool) {
        let mut container = DecodingContainer::new(&input);
        assert_eq!(expected, container.decode_bool().unwrap());
    }

    #[rstest(input,
        case(vec![0x01, 0x01, 0x01]),
        case(vec![0x01, 0x02, 0x00, 0x00]),
        case(vec![0x01, 0x00]),
    )]
    fn test_decode_bool_invalid(input: Vec<u8>) {
        let mut container = DecodingContainer::new(&input);
        assert!(matches!(
            container.decode_bool(),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x00], 0),
        case(vec![0x02, 0x01, 0x7f], 127),
        case(vec![0x02, 0x02, 0x00, 0x80], 128),
        case(vec![0x02, 0x02, 0x01, 0x00], 256),
    )]
    fn test_decode_u64(input: Vec<u8>, expected: u64) {
        let mut container = DecodingContainer::new(&input);
        assert_eq!(expected, container.decode_u64().unwrap());
    }

    #[test]
    fn test_decode_null() {
        let mut container = DecodingContainer::new(&[0x05, 0x00]);
        container.decode_null().unwrap();

        let mut container = DecodingContainer::new(&[0x05, 0x01, 0x00]);
        assert!(matches!(
            container.decode_null(),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decode_if_present() {
        use crate::oid::Oid;

        // OID followed by an INTEGER
        let data = [0x06, 0x03, 0x55, 0x04, 0x03, 0x02, 0x01, 0x05];
        let mut container = DecodingContainer::new(&data);

        // the next tag is not an INTEGER, so nothing is consumed
        assert!(
            container
                .decode_if_present::<crate::integer::UnsignedInteger>()
                .unwrap()
                .is_none()
        );
        let oid = container.decode_if_present::<Oid>().unwrap().unwrap();
        assert_eq!(Oid::from_static(&[2, 5, 4, 3]), oid);
        assert_eq!(container.decode_u64().unwrap(), 5);
    }

    #[test]
    fn test_encode_opt() {
        use crate::encode::EncodingContainer;
        use crate::oid::Oid;

        let mut container = EncodingContainer::new();
        container.encode_opt::<Oid>(None).unwrap();
        container
            .encode_opt(Some(&Oid::from_static(&[2, 5, 4, 3])))
            .unwrap();
        assert_eq!(vec![0x06, 0x03, 0x55, 0x04, 0x03], container.freeze());
    }

    #[test]
    fn test_trailing_data() {
        let data = [0x05, 0x00, 0x00];
        let mut container = DecodingContainer::new(&data);
        container.decode_null().unwrap();
        assert!(matches!(
            container.assert_at_end(),
            Err(Error::TrailingData)
        ));
    }
}
