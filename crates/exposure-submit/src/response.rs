//! Classified outcome of a network call.

use serde::{Deserialize, Serialize};

use crate::payload::PostKeysSuccess;

/// A network call's outcome: a body on success, a typed error otherwise.
///
/// Serializes with a `kind` tag:
/// `{"kind":"success","body":...}` or `{"kind":"failure","error":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NetworkResponse<T, E> {
    Success {
        body: T,
    },
    Failure {
        error: E,
        /// Raw error code from the server, when it sent one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl<T, E> NetworkResponse<T, E> {
    pub fn success(body: T) -> Self {
        NetworkResponse::Success { body }
    }

    pub fn failure(error: E, message: Option<String>) -> Self {
        NetworkResponse::Failure { error, message }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NetworkResponse::Success { .. })
    }

    /// Convert into a `Result`, dropping the raw message.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            NetworkResponse::Success { body } => Ok(body),
            NetworkResponse::Failure { error, .. } => Err(error),
        }
    }
}

/// Submission error kinds.
///
/// Backend error codes are not modelled individually; every code collapses
/// to `Unknown` and the raw code travels as the response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostKeysError {
    Unknown,
}

impl PostKeysError {
    /// Resolve a server error code to a kind.
    pub fn from_code(_code: Option<&str>) -> Self {
        PostKeysError::Unknown
    }
}

/// Outcome of a diagnosis key submission.
pub type SubmissionResult = NetworkResponse<PostKeysSuccess, PostKeysError>;
