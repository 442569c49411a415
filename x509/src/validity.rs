use der::{Codable, DecodingContainer, EncodingContainer, Tag, UniversalTag, UtcTime};

/*
RFC 5280 Section 4.1.2.5
Validity ::= SEQUENCE {
    notBefore      Time,
    notAfter       Time
}
*/

/// Certificate validity window. Only the UTCTime form of Time is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    not_before: UtcTime,
    not_after: UtcTime,
}

impl Validity {
    pub fn new(not_before: UtcTime, not_after: UtcTime) -> Self {
        Validity {
            not_before,
            not_after,
        }
    }

    pub fn not_before(&self) -> UtcTime {
        self.not_before
    }

    pub fn not_after(&self) -> UtcTime {
        self.not_after
    }
}

impl Codable for Validity {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let not_before = seq.decode::<UtcTime>()?;
        let not_after = seq.decode::<UtcTime>()?;
        seq.assert_at_end()?;

        Ok(Validity {
            not_before,
            not_after,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        seq.encode(&self.not_before)?;
        seq.encode(&self.not_after)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use der::{DecodingContainer, EncodingContainer, UtcTime};

    use super::Validity;

    fn at(s: &str) -> UtcTime {
        UtcTime::new(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[test]
    fn test_round_trip() {
        let validity = Validity::new(at("2026-08-07 05:01:36"), at("2027-08-07 05:01:36"));

        let mut container = EncodingContainer::new();
        container.encode(&validity).unwrap();
        let encoded = container.freeze();

        let mut container = DecodingContainer::new(&encoded);
        let decoded = container.decode::<Validity>().unwrap();
        assert_eq!(validity, decoded);
    }

    #[test]
    fn test_decode_from_wire() {
        let data = b"\x30\x1e\x17\x0d260807050136Z\x17\x0d270807050136Z";
        let mut container = DecodingContainer::new(data);
        let validity = container.decode::<Validity>().unwrap();

        assert_eq!(at("2026-08-07 05:01:36"), validity.not_before());
        assert_eq!(at("2027-08-07 05:01:36"), validity.not_after());
    }
}
