use der::{BitString, Codable, DecodingContainer, EncodingContainer, Tag, UniversalTag};

/*
RFC 5280 Section 4.2.1.3
KeyUsage ::= BIT STRING {
    digitalSignature        (0),
    nonRepudiation          (1),
    keyEncipherment         (2),
    dataEncipherment        (3),
    keyAgreement            (4),
    keyCertSign             (5),
    cRLSign                 (6),
    encipherOnly            (7),
    decipherOnly            (8)
}
*/

/// Permitted uses of the certified key, unpacked from the BIT STRING
/// bitmap. Bits 0..=7 live in the first payload byte (MSB first);
/// decipherOnly is the top bit of the second byte and defaults to false
/// when that byte is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsage {
    pub digital_signature: bool,
    pub non_repudiation: bool,
    pub key_encipherment: bool,
    pub data_encipherment: bool,
    pub key_agreement: bool,
    pub key_cert_sign: bool,
    pub crl_sign: bool,
    pub encipher_only: bool,
    pub decipher_only: bool,
}

impl Codable for KeyUsage {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::BitString)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let bits = container.decode::<BitString>()?;
        let bytes = bits.as_bytes();
        let first = bytes.first().copied().unwrap_or(0);
        let second = bytes.get(1).copied().unwrap_or(0);

        Ok(KeyUsage {
            digital_signature: first & 0x80 != 0,
            non_repudiation: first & 0x40 != 0,
            key_encipherment: first & 0x20 != 0,
            data_encipherment: first & 0x10 != 0,
            key_agreement: first & 0x08 != 0,
            key_cert_sign: first & 0x04 != 0,
            crl_sign: first & 0x02 != 0,
            encipher_only: first & 0x01 != 0,
            decipher_only: second & 0x80 != 0,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let mut first = 0u8;
        if self.digital_signature {
            first |= 0x80;
        }
        if self.non_repudiation {
            first |= 0x40;
        }
        if self.key_encipherment {
            first |= 0x20;
        }
        if self.data_encipherment {
            first |= 0x10;
        }
        if self.key_agreement {
            first |= 0x08;
        }
        if self.key_cert_sign {
            first |= 0x04;
        }
        if self.crl_sign {
            first |= 0x02;
        }
        if self.encipher_only {
            first |= 0x01;
        }

        let data = if self.decipher_only {
            vec![first, 0x80]
        } else {
            vec![first]
        };
        container.encode(&BitString::from_bytes(data))
    }
}
