use crate::Codable;
use crate::length::encode_length;
use crate::tag::{Tag, UniversalTag};

/// Write-side DER container.
///
/// A tag-length-value header cannot be written until the content length is
/// known, so child containers stay pending inside their parent: the next
/// write to the parent, or freezing it, first finalizes the pending child
/// by prepending its tag and computed length. A child is only reachable
/// through a `&mut` borrow of its parent, and [`freeze`](Self::freeze)
/// consumes the container, so interleaved writes and write-after-freeze are
/// compile errors rather than runtime state.
#[derive(Debug, Default)]
pub struct EncodingContainer {
    tag: Option<Tag>,
    bytes: Vec<u8>,
    child: Option<Box<EncodingContainer>>,
}

impl EncodingContainer {
    /// Root container: accumulates bare output without a header of its own.
    pub fn new() -> Self {
        EncodingContainer::default()
    }

    fn tagged(tag: Tag) -> Self {
        EncodingContainer {
            tag: Some(tag),
            ..EncodingContainer::default()
        }
    }

    // Containers

    pub fn sequence(&mut self) -> &mut EncodingContainer {
        self.open(Tag::Universal(UniversalTag::Sequence))
    }

    pub fn set(&mut self) -> &mut EncodingContainer {
        self.open(Tag::Universal(UniversalTag::Set))
    }

    pub fn context_container(&mut self, id: u8, primitive: bool) -> &mut EncodingContainer {
        self.open(Tag::context(id, primitive))
    }

    fn open(&mut self, tag: Tag) -> &mut EncodingContainer {
        self.finalize_child();
        self.child.insert(Box::new(EncodingContainer::tagged(tag)))
    }

    fn finalize_child(&mut self) {
        if let Some(child) = self.child.take() {
            let bytes = child.freeze();
            self.bytes.extend(bytes);
        }
    }

    /// Close the container and return its encoding. For a tagged container
    /// this is the point where the tag and length are prepended around the
    /// accumulated content.
    pub fn freeze(mut self) -> Vec<u8> {
        self.finalize_child();
        match self.tag {
            Some(tag) => {
                let mut out = Vec::with_capacity(self.bytes.len() + 4);
                out.push(tag.value());
                out.extend(encode_length(self.bytes.len()));
                out.extend(self.bytes);
                out
            }
            None => self.bytes,
        }
    }

    // Generic

    pub fn encode<T: Codable>(&mut self, value: &T) -> Result<(), T::Error> {
        value.encode(self)
    }

    pub fn encode_opt<T: Codable>(&mut self, value: Option<&T>) -> Result<(), T::Error> {
        if let Some(value) = value {
            value.encode(self)?;
        }
        Ok(())
    }

    pub fn encode_list<T: Codable>(&mut self, values: &[T]) -> Result<(), T::Error> {
        for value in values {
            value.encode(self)?;
        }
        Ok(())
    }

    // Content

    /// Write a complete TLV with the given tag around `content`.
    pub fn encode_bytes(&mut self, tag: Tag, content: &[u8]) {
        self.finalize_child();
        self.bytes.push(tag.value());
        self.bytes.extend(encode_length(content.len()));
        self.bytes.extend_from_slice(content);
    }

    /// Write pre-encoded bytes verbatim. This is how cached raw encodings
    /// are replayed.
    pub fn encode_raw(&mut self, bytes: &[u8]) {
        self.finalize_child();
        self.bytes.extend_from_slice(bytes);
    }

    // Primitives

    pub fn encode_bool(&mut self, value: bool) {
        let content = [if value { 0xff } else { 0x00 }];
        self.encode_bytes(Tag::Universal(UniversalTag::Boolean), &content);
    }

    /// Write a non-negative INTEGER: minimal big-endian content with a
    /// leading zero byte when the top bit would otherwise read as a sign.
    pub fn encode_u64(&mut self, value: u64) {
        let all = value.to_be_bytes();
        let start = all.iter().position(|&b| b != 0).unwrap_or(all.len() - 1);
        let mut content = all[start..].to_vec();
        if content[0] & 0x80 != 0 {
            content.insert(0, 0x00);
        }
        self.encode_bytes(Tag::Universal(UniversalTag::Integer), &content);
    }

    pub fn encode_null(&mut self) {
        self.encode_bytes(Tag::Universal(UniversalTag::Null), &[]);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::EncodingContainer;

    #[test]
    fn test_sequence_wrapping() {
        let mut container = EncodingContainer::new();
        let seq = container.sequence();
        seq.encode_raw(&[0x01, 0x02, 0x03]);

        assert_eq!(container.freeze(), vec![0x30, 0x03, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_pending_child_finalized_by_next_write() {
        let mut container = EncodingContainer::new();
        let seq = container.sequence();
        seq.encode_u64(7);
        // writing to the parent closes the open sequence first
        container.encode_null();

        assert_eq!(
            container.freeze(),
            vec![0x30, 0x03, 0x02, 0x01, 0x07, 0x05, 0x00]
        );
    }

    #[test]
    fn test_nested_containers() {
        let mut container = EncodingContainer::new();
        let outer = container.sequence();
        let inner = outer.set();
        inner.encode_u64(1);

        assert_eq!(
            container.freeze(),
            vec![0x30, 0x05, 0x31, 0x03, 0x02, 0x01, 0x01]
        );
    }

    #[test]
    fn test_context_container() {
        let mut container = EncodingContainer::new();
        let ctx = container.context_container(0, false);
        ctx.encode_u64(2);

        assert_eq!(container.freeze(), vec![0xa0, 0x03, 0x02, 0x01, 0x02]);
    }

    #[rstest(value, expected,
        case(false, vec![0x01, 0x01, 0x00]),
        case(true, vec![0x01, 0x01, 0xff]),
    )]
    fn test_encode_bool(value: bool, expected: Vec<u8>) {
        let mut container = EncodingContainer::new();
        container.encode_bool(value);
        assert_eq!(expected, container.freeze());
    }

    #[rstest(value, expected,
        case(0, vec![0x02, 0x01, 0x00]),
        case(127, vec![0x02, 0x01, 0x7f]),
        case(128, vec![0x02, 0x02, 0x00, 0x80]),
        case(256, vec![0x02, 0x02, 0x01, 0x00]),
        case(65535, vec![0x02, 0x03, 0x00, 0xff, 0xff]),
    )]
    fn test_encode_u64(value: u64, expected: Vec<u8>) {
        let mut container = EncodingContainer::new();
        container.encode_u64(value);
        assert_eq!(expected, container.freeze());
    }
}
