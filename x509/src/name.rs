use std::fmt::{self, Display};

use der::{Asn1String, Codable, DecodingContainer, EncodingContainer, Oid, Tag, UniversalTag};

use crate::error::Error;
use crate::oid;

/*
RFC 5280 Section 4.1.2.4
Name ::= CHOICE { rdnSequence RDNSequence }
RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
AttributeTypeAndValue ::= SEQUENCE { type OBJECT IDENTIFIER, value ANY }
*/

/// X.501 directory name, restricted to the attribute types this crate
/// understands; anything else in a decoded name is an error.
///
/// A decoded name keeps its raw encoding, and re-encoding replays it
/// verbatim: the original attribute order is not recoverable from the
/// fields alone, and issuer/subject bytes must survive a decode/re-encode
/// cycle unchanged for signature checks.
#[derive(Debug, Clone, Default)]
pub struct Name {
    pub common_name: Option<Asn1String>,
    pub country_name: Option<Asn1String>,
    pub locality_name: Option<Asn1String>,
    pub state_or_province_name: Option<Asn1String>,
    pub organization_name: Option<Asn1String>,
    pub organizational_unit_name: Option<Asn1String>,
    pub email_address: Option<Asn1String>,
    raw: Option<Vec<u8>>,
}

impl Name {
    pub fn new() -> Self {
        Name::default()
    }

    /// A name carrying only a commonName, the usual shape for a leaf
    /// identity.
    pub fn with_common_name(name: impl Into<String>) -> Self {
        Name {
            common_name: Some(Asn1String::utf8(name)),
            ..Name::default()
        }
    }

    fn assign(&mut self, kind: &Oid, value: Asn1String) -> Result<(), Error> {
        let slot = if *kind == oid::X520_COMMON_NAME {
            &mut self.common_name
        } else if *kind == oid::X520_COUNTRY_NAME {
            &mut self.country_name
        } else if *kind == oid::X520_LOCALITY_NAME {
            &mut self.locality_name
        } else if *kind == oid::X520_STATE_OR_PROVINCE_NAME {
            &mut self.state_or_province_name
        } else if *kind == oid::X520_ORGANIZATION_NAME {
            &mut self.organization_name
        } else if *kind == oid::X520_ORGANIZATIONAL_UNIT_NAME {
            &mut self.organizational_unit_name
        } else if *kind == oid::PKCS9_EMAIL_ADDRESS {
            &mut self.email_address
        } else {
            return Err(Error::UnrecognizedNameAttribute(kind.clone()));
        };
        *slot = Some(value);
        Ok(())
    }

    fn attributes(&self) -> [(Oid, &Option<Asn1String>); 7] {
        [
            (oid::X520_COMMON_NAME, &self.common_name),
            (oid::X520_COUNTRY_NAME, &self.country_name),
            (oid::X520_LOCALITY_NAME, &self.locality_name),
            (oid::X520_STATE_OR_PROVINCE_NAME, &self.state_or_province_name),
            (oid::X520_ORGANIZATION_NAME, &self.organization_name),
            (
                oid::X520_ORGANIZATIONAL_UNIT_NAME,
                &self.organizational_unit_name,
            ),
            (oid::PKCS9_EMAIL_ADDRESS, &self.email_address),
        ]
    }
}

// Equality is structural over the attributes; the raw cache is a decode
// artifact.
impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.common_name == other.common_name
            && self.country_name == other.country_name
            && self.locality_name == other.locality_name
            && self.state_or_province_name == other.state_or_province_name
            && self.organization_name == other.organization_name
            && self.organizational_unit_name == other.organizational_unit_name
            && self.email_address == other.email_address
    }
}

impl Eq for Name {}

impl Codable for Name {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let mut seq = container.sequence()?;
        let mut name = Name::new();

        while !seq.at_end() {
            let mut group = seq.set()?;
            while !group.at_end() {
                let mut attribute = group.sequence()?;
                let kind = attribute.decode::<Oid>()?;
                let value = attribute.decode::<Asn1String>()?;
                attribute.assert_at_end()?;
                name.assign(&kind, value)?;
            }
        }

        name.raw = Some(seq.bytes().to_vec());
        Ok(name)
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        if let Some(raw) = &self.raw {
            container.encode_raw(raw);
            return Ok(());
        }

        let seq = container.sequence();
        for (kind, value) in self.attributes() {
            if let Some(value) = value {
                let group = seq.set();
                let attribute = group.sequence();
                attribute.encode(&kind)?;
                attribute.encode(value)?;
            }
        }
        Ok(())
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kind, value) in self.attributes() {
            if let Some(value) = value {
                if !first {
                    write!(f, ", ")?;
                }
                let short = if kind == oid::X520_COMMON_NAME {
                    "CN"
                } else if kind == oid::X520_COUNTRY_NAME {
                    "C"
                } else if kind == oid::X520_LOCALITY_NAME {
                    "L"
                } else if kind == oid::X520_STATE_OR_PROVINCE_NAME {
                    "ST"
                } else if kind == oid::X520_ORGANIZATION_NAME {
                    "O"
                } else if kind == oid::X520_ORGANIZATIONAL_UNIT_NAME {
                    "OU"
                } else {
                    "emailAddress"
                };
                write!(f, "{}={}", short, value)?;
                first = false;
            }
        }
        Ok(())
    }
}
