//! Error types for the native capability boundary.

use thiserror::Error;

/// Errors a native capability may report.
///
/// These never leave the controller: every failed query or prompt is mapped
/// to a fail-closed status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// The capability is not present on this device or OS version.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// The native call failed.
    #[error("native call failed: {0}")]
    Native(String),

    /// The user dismissed the prompt without a decision.
    #[error("prompt cancelled")]
    Cancelled,
}

/// Result type for native capability calls.
pub type Result<T> = std::result::Result<T, CapabilityError>;
