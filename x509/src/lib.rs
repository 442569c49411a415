//! X.509 certificate schema (RFC 5280) over the `der` containers.
//!
//! Every type decodes as a straight-line composition of container
//! operations in the field order the RFC mandates, and rejects malformed
//! input outright; there is no partial acceptance of a broken certificate.
//! Decoded names and TBS structures keep their raw bytes so that
//! re-encoding is byte-exact where signatures depend on it.

pub mod algorithm;
pub mod certificate;
pub mod error;
pub mod extensions;
pub mod name;
pub mod oid;
pub mod provider;
pub mod subject_public_key_info;
pub mod validity;

pub use algorithm::AlgorithmIdentifier;
pub use certificate::{Certificate, TBSCertificate};
pub use error::Error;
pub use extensions::{BasicConstraints, ExtendedKeyUsage, Extension, KeyUsage};
pub use name::Name;
pub use provider::{Digester, ProviderError, Signer, Verifier};
pub use subject_public_key_info::SubjectPublicKeyInfo;
pub use validity::Validity;
