//! Error types for the facade.

use exposure_submit::SubmitError;
use thiserror::Error;

/// Errors that can occur while setting up an exposure context.
///
/// Runtime operations (permission checks, submissions) do not fail; they
/// resolve to statuses and tagged results instead.
#[derive(Debug, Error)]
pub enum ExposureError {
    /// A required setting was not provided.
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    /// A setting was provided but could not be used.
    #[error("invalid setting {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },

    /// The config file could not be read.
    #[error("config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The config file is not valid JSON for the expected shape.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Submission client error.
    #[error("submission error: {0}")]
    Submit(#[from] SubmitError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, ExposureError>;
