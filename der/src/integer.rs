use std::fmt::{self, Display};

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Codable;
use crate::decode::DecodingContainer;
use crate::encode::EncodingContainer;
use crate::error::Error;
use crate::tag::{Tag, UniversalTag};

/// Arbitrary-precision non-negative INTEGER, as used for certificate serial
/// numbers.
///
/// The wire form is minimal big-endian content with one leading zero byte
/// added exactly when the top bit would otherwise read as a sign bit.
/// Decoding strips that byte; the numeric value is what is compared and
/// hashed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnsignedInteger {
    inner: BigUint,
}

impl UnsignedInteger {
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        UnsignedInteger {
            inner: BigUint::from_bytes_be(bytes),
        }
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.inner.to_bytes_be()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.inner
    }

    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(&self.inner).ok()
    }
}

impl From<u64> for UnsignedInteger {
    fn from(value: u64) -> Self {
        UnsignedInteger {
            inner: BigUint::from(value),
        }
    }
}

impl From<BigUint> for UnsignedInteger {
    fn from(value: BigUint) -> Self {
        UnsignedInteger { inner: value }
    }
}

impl Codable for UnsignedInteger {
    type Error = Error;

    fn matches(tag: Tag) -> bool {
        tag == Tag::Universal(UniversalTag::Integer)
    }

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Error> {
        let bytes = container.decode_bytes(Tag::Universal(UniversalTag::Integer))?;
        if bytes.is_empty() {
            return Err(Error::InvalidEncoding(
                "integer content is empty".to_string(),
            ));
        }
        // BigUint drops the sign-disambiguating 0x00 pad along with any
        // other leading zeros.
        Ok(UnsignedInteger::from_bytes_be(bytes))
    }

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Error> {
        let mut content = self.inner.to_bytes_be();
        if content[0] & 0x80 != 0 {
            content.insert(0, 0x00);
        }
        container.encode_bytes(Tag::Universal(UniversalTag::Integer), &content);
        Ok(())
    }
}

impl Display for UnsignedInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for UnsignedInteger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for UnsignedInteger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let inner = s.parse::<BigUint>().map_err(serde::de::Error::custom)?;
        Ok(UnsignedInteger { inner })
    }
}
