//! Error types for the submission module.
//!
//! Transport failures are converted into a failed submission result at the
//! client boundary. The remaining variants surface from construction, key
//! handling and body encoding, before any request is made.

use thiserror::Error;

/// Errors that can occur around diagnosis submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Transport-level error (DNS, connect, TLS, body read).
    #[error("transport error: {0}")]
    TransportError(String),

    /// The request did not complete in time.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    ClientSetup(String),

    /// An HMAC key could not be decoded.
    #[error("invalid hmac key: {0}")]
    InvalidHmacKey(String),

    /// The request body could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_become_serialization() {
        let json_error = serde_json::from_str::<u8>("not json").unwrap_err();
        let error: SubmitError = json_error.into();
        assert!(matches!(error, SubmitError::Serialization(_)));
        assert!(error.to_string().starts_with("serialization error:"));
    }
}
