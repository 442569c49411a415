use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing encapsulation boundary")]
    MissingBoundary,
    #[error("invalid encapsulation boundary")]
    InvalidBoundary,
    #[error("mismatched encapsulation labels: {begin} / {end}")]
    LabelMismatch { begin: String, end: String },
    #[error("unknown label: {0}")]
    UnknownLabel(String),
    #[error("base64: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}
