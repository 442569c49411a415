//! PKCS#10 certification requests (RFC 2986) over the `der` containers and
//! the X.509 schema types.

pub mod attribute;
pub mod error;
pub mod oid;
pub mod request;

pub use attribute::Attribute;
pub use error::Error;
pub use request::{CertificationRequest, CertificationRequestInfo};
