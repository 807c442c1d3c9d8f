//! Wire types for the diagnosis-key endpoint.
//!
//! Request:
//!
//! ```text
//! { temporaryExposureKeys, regions, appPackageName,
//!   verificationPayload, hmackey, padding: "" }
//! ```
//!
//! Response bodies are `{ body: { revocationCertificate } }` on success and
//! `{ error }` otherwise.

use serde::{Deserialize, Serialize};

use exposure_core::ExposureKey;

use crate::error::Result;

/// Padding sent with every request. Reserved by the key server; always empty.
pub const DEFAULT_PADDING: &str = "";

/// Request headers for the key server.
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [
    ("content-type", "application/json"),
    ("accept", "application/json"),
];

/// A single diagnosis report. Built fresh per submission; never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisSubmissionRequest {
    pub temporary_exposure_keys: Vec<ExposureKey>,
    pub regions: Vec<String>,
    pub app_package_name: String,
    /// The verification certificate, opaque to this client.
    pub verification_payload: String,
    #[serde(rename = "hmackey")]
    pub hmac_key: String,
    /// Always sent empty; any incoming value is discarded.
    #[serde(skip_deserializing)]
    padding: String,
}

impl DiagnosisSubmissionRequest {
    pub fn new(
        keys: Vec<ExposureKey>,
        regions: Vec<String>,
        certificate: impl Into<String>,
        hmac_key: impl Into<String>,
        app_package_name: impl Into<String>,
    ) -> Self {
        Self {
            temporary_exposure_keys: keys,
            regions,
            app_package_name: app_package_name.into(),
            verification_payload: certificate.into(),
            hmac_key: hmac_key.into(),
            padding: DEFAULT_PADDING.to_string(),
        }
    }

    pub fn padding(&self) -> &str {
        &self.padding
    }

    /// Encode as the JSON request body.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

// The certificate and HMAC key are credentials; keep them out of logs.
impl std::fmt::Debug for DiagnosisSubmissionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisSubmissionRequest")
            .field("temporary_exposure_keys", &self.temporary_exposure_keys.len())
            .field("regions", &self.regions)
            .field("app_package_name", &self.app_package_name)
            .field("verification_payload", &"<redacted>")
            .field("hmac_key", &"<redacted>")
            .finish()
    }
}

/// Payload of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostKeysSuccess {
    /// Token that allows the submitted keys to be retracted later.
    pub revocation_certificate: String,
}

/// Success response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessEnvelope {
    pub body: PostKeysSuccess,
}

/// Failure response envelope. Any other fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct FailureEnvelope {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use exposure_core::KEY_DATA_LEN;

    #[test]
    fn test_padding_present_and_empty() {
        let request = DiagnosisSubmissionRequest::new(
            vec![ExposureKey::new([0x01; KEY_DATA_LEN], 2_650_000, 144, 2)],
            vec!["US".into(), "CA".into()],
            "cert123",
            "hmac1",
            "com.example.app",
        );

        let value: serde_json::Value = serde_json::from_slice(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["padding"], serde_json::json!(""));

        let parsed: DiagnosisSubmissionRequest = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.padding(), "");
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_incoming_padding_is_discarded() {
        let parsed: DiagnosisSubmissionRequest = serde_json::from_str(
            r#"{"temporaryExposureKeys":[],"regions":["US"],"appPackageName":"pkg","verificationPayload":"cert123","hmackey":"hmac1","padding":"xxxx"}"#,
        )
        .unwrap();
        assert_eq!(parsed.padding(), "");

        let value: serde_json::Value = serde_json::from_slice(&parsed.to_json().unwrap()).unwrap();
        assert_eq!(value["padding"], serde_json::json!(""));

        let without: DiagnosisSubmissionRequest = serde_json::from_str(
            r#"{"temporaryExposureKeys":[],"regions":[],"appPackageName":"pkg","verificationPayload":"c","hmackey":"h"}"#,
        )
        .unwrap();
        assert_eq!(without.padding(), "");
    }

    #[test]
    fn test_field_names() {
        let request = DiagnosisSubmissionRequest::new(vec![], vec![], "cert123", "hmac1", "pkg");
        let json = String::from_utf8(request.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"temporaryExposureKeys":[],"regions":[],"appPackageName":"pkg","verificationPayload":"cert123","hmackey":"hmac1","padding":""}"#
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let request = DiagnosisSubmissionRequest::new(vec![], vec![], "secret-cert", "secret-hmac", "pkg");
        let debug = format!("{:?}", request);
        assert!(!debug.contains("secret-cert"));
        assert!(!debug.contains("secret-hmac"));
    }

    #[test]
    fn test_failure_envelope_tolerates_missing_error() {
        let envelope: FailureEnvelope = serde_json::from_str(r#"{"code":400}"#).unwrap();
        assert_eq!(envelope.error, None);
    }
}
