use der::Oid;
use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("der: {0}")]
    Der(#[from] der::Error),
    #[error("unrecognized name attribute {0}")]
    UnrecognizedNameAttribute(Oid),
    #[error("unrecognized critical extension {0}")]
    DisallowedCriticalExtension(Oid),
    #[error("unsupported certificate version {0}")]
    InvalidVersion(u64),
    #[error("security provider: {0}")]
    Provider(#[from] ProviderError),
}
