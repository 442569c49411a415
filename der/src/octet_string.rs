use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Codable;
use crate::decode::DecodingContainer;
use crate::encode::EncodingContainer;
use crate::error::Error;
use crate::tag::{Tag, UniversalTag};

/// OCTET STRING: an opaque run of bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl Codable for OctetString {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::OctetString)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let bytes = container.decode_bytes(Tag::Universal(UniversalTag::OctetString))?;
        Ok(OctetString::from(bytes))
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        container.encode_bytes(Tag::Universal(UniversalTag::OctetString), &self.inner);
        Ok(())
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.inner {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for OctetString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.inner.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for OctetString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex = String::deserialize(deserializer)?;
            if hex.len() % 2 != 0 {
                return Err(serde::de::Error::custom("hex string must have even length"));
            }
            let inner = (0..hex.len())
                .step_by(2)
                .map(|i| {
                    u8::from_str_radix(&hex[i..i + 2], 16)
                        .map_err(|e| serde::de::Error::custom(format!("invalid hex string: {}", e)))
                })
                .collect::<Result<Vec<u8>, _>>()?;
            Ok(OctetString { inner })
        } else {
            let inner = Vec::<u8>::deserialize(deserializer)?;
            Ok(OctetString { inner })
        }
    }
}
