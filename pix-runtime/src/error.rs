//! Typed failures for payload generation and decoding.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Field too long: tag {tag} carries {len} bytes (max 99)")]
    FieldTooLong { tag: String, len: usize },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}
