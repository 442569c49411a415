use der::{BitString, Codable, DecodingContainer, EncodingContainer, Tag, UniversalTag};

use crate::algorithm::AlgorithmIdentifier;

/*
RFC 5280 Section 4.1.2.7
SubjectPublicKeyInfo  ::=  SEQUENCE  {
    algorithm            AlgorithmIdentifier,
    subjectPublicKey     BIT STRING
}
*/

/// Public key carried by a certificate or request. The key material itself
/// stays an opaque bit string; interpreting it belongs to the key layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: BitString) -> Self {
        SubjectPublicKeyInfo {
            algorithm,
            subject_public_key,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    pub fn subject_public_key(&self) -> &BitString {
        &self.subject_public_key
    }
}

impl Codable for SubjectPublicKeyInfo {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let algorithm = seq.decode::<AlgorithmIdentifier>()?;
        let subject_public_key = seq.decode::<BitString>()?;
        seq.assert_at_end()?;

        Ok(SubjectPublicKeyInfo {
            algorithm,
            subject_public_key,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        seq.encode(&self.algorithm)?;
        seq.encode(&self.subject_public_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use der::{BitString, DecodingContainer, EncodingContainer};

    use crate::algorithm::AlgorithmIdentifier;

    use super::SubjectPublicKeyInfo;

    #[test]
    fn test_round_trip() {
        let spki = SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::rsa_encryption(),
            BitString::from_bytes(vec![0x30, 0x06, 0x02, 0x01, 0x03, 0x02, 0x01, 0x05]),
        );

        let mut container = EncodingContainer::new();
        container.encode(&spki).unwrap();
        let encoded = container.freeze();

        let mut container = DecodingContainer::new(&encoded);
        let decoded = container.decode::<SubjectPublicKeyInfo>().unwrap();
        assert_eq!(spki, decoded);
    }
}
