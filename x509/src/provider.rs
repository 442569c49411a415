//! Interfaces to the external digest/signature provider.
//!
//! The codec computes nothing cryptographic itself: fingerprints and
//! signatures are produced and checked by a collaborator behind these
//! traits, always over DER-encoded bytes.

use thiserror::Error;

/// Failure raised by the external security provider, carried through
/// unchanged.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

pub trait Digester {
    /// Digest of `bytes` under this provider's algorithm.
    fn digest(&self, bytes: &[u8]) -> Vec<u8>;
}

pub trait Signer {
    /// Signature over `bytes` (a DER-encoded to-be-signed range).
    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, ProviderError>;
}

pub trait Verifier {
    /// Whether `signature` verifies over `bytes`.
    fn verify(&self, bytes: &[u8], signature: &[u8]) -> Result<bool, ProviderError>;
}
