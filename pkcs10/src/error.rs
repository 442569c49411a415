use thiserror::Error;

use x509::ProviderError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("der: {0}")]
    Der(#[from] der::Error),
    #[error("x509: {0}")]
    X509(#[from] x509::Error),
    #[error("unsupported request version {0}")]
    UnsupportedVersion(u64),
    #[error("security provider: {0}")]
    Provider(#[from] ProviderError),
}
