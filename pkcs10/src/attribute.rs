use der::{Codable, DecodingContainer, EncodingContainer, Oid, Tag, UniversalTag};

/*
RFC 2986 Section 4
Attribute ::= SEQUENCE {
    type   ATTRIBUTE.&id,
    values SET OF ATTRIBUTE.&Type
}
*/

/// A request attribute. The SET content stays raw; typed interpretation is
/// the consumer's business (extensionRequest is the only attribute this
/// crate reads itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub kind: Oid,
    pub values: Vec<u8>,
}

impl Attribute {
    pub fn new(kind: Oid, values: Vec<u8>) -> Self {
        Attribute { kind, values }
    }
}

impl Codable for Attribute {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let kind = seq.decode::<Oid>()?;
        let values = seq
            .decode_bytes(Tag::Universal(UniversalTag::Set))?
            .to_vec();
        seq.assert_at_end()?;

        Ok(Attribute { kind, values })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        seq.encode(&self.kind)?;
        seq.encode_bytes(Tag::Universal(UniversalTag::Set), &self.values);
        Ok(())
    }
}
