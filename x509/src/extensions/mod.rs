use der::{Codable, DecodingContainer, EncodingContainer, OctetString, Oid, Tag, UniversalTag};

pub mod basic_constraints;
pub mod extended_key_usage;
pub mod key_usage;

pub use basic_constraints::BasicConstraints;
pub use extended_key_usage::ExtendedKeyUsage;
pub use key_usage::KeyUsage;

/*
RFC 5280 Section 4.1
Extension  ::=  SEQUENCE  {
    extnID      OBJECT IDENTIFIER,
    critical    BOOLEAN DEFAULT FALSE,
    extnValue   OCTET STRING
                -- contains the DER encoding of an ASN.1 value
                -- corresponding to the extension type identified
                -- by extnID
}
*/

/// A certificate extension: OID, criticality flag, and an opaque payload
/// that is itself a DER encoding of the OID-identified type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub id: Oid,
    pub critical: bool,
    pub value: OctetString,
}

impl Extension {
    pub fn new(id: Oid, value: impl Into<OctetString>, critical: bool) -> Self {
        Extension {
            id,
            critical,
            value: value.into(),
        }
    }

    /// Wrap a typed payload: the octet string becomes the payload's own DER
    /// encoding.
    pub fn of<T: Codable>(id: Oid, payload: &T, critical: bool) -> Result<Extension, T::Error> {
        let mut content = EncodingContainer::new();
        content.encode(payload)?;
        Ok(Extension::new(id, content.freeze(), critical))
    }

    /// Decode the payload as `T`. The octet string must hold exactly one
    /// value of that type.
    pub fn typed<T: Codable>(&self) -> Result<T, T::Error> {
        let mut container = DecodingContainer::new(self.value.as_bytes());
        let payload = container.decode::<T>()?;
        container.assert_at_end().map_err(T::Error::from)?;
        Ok(payload)
    }
}

impl Codable for Extension {
    type Error = der::Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Sequence)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, der::Error> {
        let mut seq = container.sequence()?;
        let id = seq.decode::<Oid>()?;
        let critical = seq.decode_bool_if_present()?.unwrap_or(false);
        let value = seq.decode::<OctetString>()?;
        seq.assert_at_end()?;

        Ok(Extension {
            id,
            critical,
            value,
        })
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), der::Error> {
        let seq = container.sequence();
        seq.encode(&self.id)?;
        // DEFAULT FALSE: omitted unless set
        if self.critical {
            seq.encode_bool(true);
        }
        seq.encode(&self.value)?;
        Ok(())
    }
}
