use der::{Codable, DecodingContainer, EncodingContainer, Tag, UniversalTag};

/*
RFC 5280 Section 4.2.1.9
BasicConstraints ::= SEQUENCE {
    cA                      BOOLEAN DEFAULT FALSE,
    pathLenConstraint       INTEGER (0..MAX) OPTIONAL
}
*/

/// Whether the subject is a CA and how deep a chain it may anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasicConstraints {
    pub ca: bool,
    pub path_len_constraint: Option<u64>,
}

impl Codable for BasicConstraints {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let ca = seq.decode_bool_if_present()?.unwrap_or(false);
        let path_len_constraint = seq.decode_u64_if_present()?;
        seq.assert_at_end()?;

        Ok(BasicConstraints {
            ca,
            path_len_constraint,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        // DEFAULT FALSE: omitted unless set
        if self.ca {
            seq.encode_bool(true);
        }
        if let Some(path_len) = self.path_len_constraint {
            seq.encode_u64(path_len);
        }
        Ok(())
    }
}
