use der::{Codable, DecodingContainer, EncodingContainer, Oid, Tag, UniversalTag};

use crate::oid;

/*
RFC 5280 Section 4.1.1.2
AlgorithmIdentifier  ::=  SEQUENCE  {
    algorithm               OBJECT IDENTIFIER,
    parameters              ANY DEFINED BY algorithm OPTIONAL
}
*/

/// Signature/key algorithm identifier.
///
/// The RSA family in scope carries either no parameters or an explicit
/// NULL; any other parameter encoding is rejected rather than carried
/// opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    algorithm: Oid,
    null_parameters: bool,
}

impl AlgorithmIdentifier {
    pub fn new(algorithm: Oid) -> Self {
        AlgorithmIdentifier {
            algorithm,
            null_parameters: false,
        }
    }

    pub fn with_null_parameters(algorithm: Oid) -> Self {
        AlgorithmIdentifier {
            algorithm,
            null_parameters: true,
        }
    }

    /// rsaEncryption as used in SubjectPublicKeyInfo.
    pub fn rsa_encryption() -> Self {
        AlgorithmIdentifier::with_null_parameters(oid::PKCS1_RSA_ENCRYPTION)
    }

    /// sha256WithRSAEncryption as used in signature fields.
    pub fn sha256_with_rsa_encryption() -> Self {
        AlgorithmIdentifier::with_null_parameters(oid::PKCS1_SHA256_WITH_RSA_ENCRYPTION)
    }

    pub fn algorithm(&self) -> &Oid {
        &self.algorithm
    }

    pub fn has_null_parameters(&self) -> bool {
        self.null_parameters
    }
}

impl Codable for AlgorithmIdentifier {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let algorithm = seq.decode::<Oid>()?;
        let null_parameters = if seq.at_end() {
            false
        } else {
            seq.decode_null()?;
            true
        };
        seq.assert_at_end()?;

        Ok(AlgorithmIdentifier {
            algorithm,
            null_parameters,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        seq.encode(&self.algorithm)?;
        if self.null_parameters {
            seq.encode_null();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use der::{DecodingContainer, EncodingContainer};
    use rstest::rstest;

    use super::AlgorithmIdentifier;

    const SHA256_WITH_RSA: &[u8] = &[
        0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b, 0x05, 0x00,
    ];

    #[test]
    fn test_decode_sha256_with_rsa() {
        let mut container = DecodingContainer::new(SHA256_WITH_RSA);
        let algorithm = container.decode::<AlgorithmIdentifier>().unwrap();

        assert_eq!(AlgorithmIdentifier::sha256_with_rsa_encryption(), algorithm);
        assert!(algorithm.has_null_parameters());
    }

    #[test]
    fn test_encode_sha256_with_rsa() {
        let mut container = EncodingContainer::new();
        container
            .encode(&AlgorithmIdentifier::sha256_with_rsa_encryption())
            .unwrap();
        assert_eq!(SHA256_WITH_RSA, container.freeze());
    }

    #[rstest(input,
        case(AlgorithmIdentifier::rsa_encryption()),
        case(AlgorithmIdentifier::new(der::Oid::from_static(&[1, 2, 840, 113549, 1, 1, 5]))),
    )]
    fn test_round_trip(input: AlgorithmIdentifier) {
        let mut container = EncodingContainer::new();
        container.encode(&input).unwrap();
        let encoded = container.freeze();

        let mut container = DecodingContainer::new(&encoded);
        assert_eq!(input, container.decode::<AlgorithmIdentifier>().unwrap());
    }

    #[test]
    fn test_unsupported_parameters_rejected() {
        // parameters carrying an OID instead of NULL
        let data = [
            0x30, 0x08, 0x06, 0x03, 0x55, 0x04, 0x03, 0x06, 0x01, 0x2a,
        ];
        let mut container = DecodingContainer::new(&data);
        assert!(container.decode::<AlgorithmIdentifier>().is_err());
    }
}
