use der::{Codable, DecodingContainer, EncodingContainer, Oid, Tag, UniversalTag};

/*
RFC 5280 Section 4.2.1.12
ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
KeyPurposeId ::= OBJECT IDENTIFIER
*/

/// Purposes the certified key may be used for, each named by an OID.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtendedKeyUsage {
    pub purpose_identifiers: Vec<Oid>,
}

impl Codable for ExtendedKeyUsage {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let purpose_identifiers = seq.decode_list::<Oid>()?;

        Ok(ExtendedKeyUsage {
            purpose_identifiers,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        seq.encode_list(&self.purpose_identifiers)?;
        Ok(())
    }
}
