//! Error types for the exposure core.

use thiserror::Error;

/// Errors raised when decoding values handed over by the native layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unrecognized authorization status: {0}")]
    InvalidAuthorization(String),

    #[error("unrecognized enablement status: {0}")]
    InvalidEnablement(String),

    #[error("unrecognized notification status: {0}")]
    InvalidNotification(String),

    #[error("exposure key material must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("exposure key material is not valid base64: {0}")]
    InvalidKeyEncoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
