use thiserror::Error;

use crate::tag::Tag;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected end of input")]
    Truncated,
    #[error("unrecognized tag byte {0:#04x}")]
    UnrecognizedTag(u8),
    #[error("expected tag {expected:?}, found {found:?}")]
    UnexpectedTag { expected: Tag, found: Tag },
    #[error("indefinite length is not supported")]
    IndefiniteLength,
    #[error("trailing data after a complete value")]
    TrailingData,
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}
