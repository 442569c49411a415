//! ASN.1 Distinguished Encoding Rules (DER) codec.
//!
//! Values move between typed and wire form through a pair of hierarchical
//! containers:
//!
//! ```text
//! bytes → DecodingContainer → Codable::decode → typed value
//! typed value → Codable::encode → EncodingContainer → bytes
//! ```
//!
//! [`DecodingContainer`] carves nested read-only containers out of a
//! borrowed byte slice; [`EncodingContainer`] accumulates output and defers
//! each child's tag-length header until the child's content is complete,
//! because DER writes the length before the content. Schema types implement
//! [`Codable`] and never touch raw bytes directly.
//!
//! Only the canonical DER subset is handled: indefinite lengths are
//! rejected, boolean and integer contents must be in their single valid
//! form, and every container decode is expected to end with
//! [`DecodingContainer::assert_at_end`].

#![forbid(unsafe_code)]

pub mod bit_string;
pub mod cursor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod integer;
pub mod length;
pub mod octet_string;
pub mod oid;
pub mod string;
pub mod tag;
pub mod time;

pub use bit_string::BitString;
pub use cursor::ByteCursor;
pub use decode::DecodingContainer;
pub use encode::EncodingContainer;
pub use error::Error;
pub use integer::UnsignedInteger;
pub use length::{decode_length, encode_length};
pub use octet_string::OctetString;
pub use oid::Oid;
pub use string::{Asn1String, StringEncoding};
pub use tag::{Tag, UniversalTag};
pub use time::UtcTime;

/// Capability contract for every type that crosses the DER boundary.
///
/// Containers use it to transcode nested types, lists of types
/// ([`DecodingContainer::decode_list`]) and OPTIONAL fields
/// ([`DecodingContainer::decode_if_present`]) uniformly.
pub trait Codable: Sized {
    /// Error produced by this type's transcoding; it must absorb the codec
    /// errors raised by the containers themselves.
    type Error: From<Error>;

    /// Whether `tag` can open an encoding of this type.
    fn matches(tag: Tag) -> bool;

    fn decode(container: &mut DecodingContainer<'_>) -> Result<Self, Self::Error>;

    fn encode(&self, container: &mut EncodingContainer) -> Result<(), Self::Error>;
}
