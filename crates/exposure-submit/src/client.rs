//! Diagnosis key submission client.
//!
//! One call, one POST, one classified result. The client is stateless and
//! every failure path ends in [`NetworkResponse::Failure`]; nothing is
//! thrown past `submit`.

use std::time::Duration;

use exposure_core::ExposureKey;

use crate::error::Result;
use crate::payload::{
    DiagnosisSubmissionRequest, FailureEnvelope, SuccessEnvelope, DEFAULT_HEADERS,
};
use crate::response::{NetworkResponse, PostKeysError, SubmissionResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Configuration for the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// URL the diagnosis keys are POSTed to.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SubmissionConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the diagnosis-key endpoint.
pub struct DiagnosisKeySubmissionClient<T: HttpTransport> {
    transport: T,
    config: SubmissionConfig,
}

impl DiagnosisKeySubmissionClient<ReqwestTransport> {
    /// Create a client backed by `reqwest`.
    pub fn connect(config: SubmissionConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: HttpTransport> DiagnosisKeySubmissionClient<T> {
    pub fn new(transport: T, config: SubmissionConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit a diagnosis report.
    ///
    /// `keys` may be empty. `certificate` is passed through unchecked.
    /// Performs exactly one round trip.
    pub async fn submit(
        &self,
        keys: &[ExposureKey],
        region_codes: &[String],
        certificate: &str,
        hmac_key: &str,
        app_package_name: &str,
    ) -> SubmissionResult {
        let request = DiagnosisSubmissionRequest::new(
            keys.to_vec(),
            region_codes.to_vec(),
            certificate,
            hmac_key,
            app_package_name,
        );
        self.submit_request(&request).await
    }

    /// Submit a prebuilt request.
    pub async fn submit_request(&self, request: &DiagnosisSubmissionRequest) -> SubmissionResult {
        let body = match request.to_json() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("failed to encode diagnosis submission: {}", e);
                return NetworkResponse::failure(PostKeysError::Unknown, None);
            }
        };

        tracing::debug!(
            keys = request.temporary_exposure_keys.len(),
            regions = request.regions.len(),
            "posting diagnosis keys"
        );

        let http_request = HttpRequest {
            url: self.config.endpoint.clone(),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body,
        };

        match self.transport.post(http_request).await {
            Ok(response) => classify(response),
            Err(e) => {
                tracing::warn!("diagnosis key submission failed in transport: {}", e);
                NetworkResponse::failure(PostKeysError::Unknown, None)
            }
        }
    }
}

/// Map an HTTP response onto a submission result.
fn classify(response: HttpResponse) -> SubmissionResult {
    if response.is_success() {
        match serde_json::from_slice::<SuccessEnvelope>(&response.body) {
            Ok(envelope) => {
                tracing::info!("diagnosis keys accepted");
                NetworkResponse::success(envelope.body)
            }
            Err(e) => {
                tracing::warn!(
                    status = response.status,
                    "unreadable success body from key server: {}",
                    e
                );
                NetworkResponse::failure(PostKeysError::Unknown, None)
            }
        }
    } else {
        match serde_json::from_slice::<FailureEnvelope>(&response.body) {
            Ok(envelope) => {
                tracing::warn!(
                    status = response.status,
                    error = envelope.error.as_deref().unwrap_or("<none>"),
                    "key server rejected diagnosis keys"
                );
                let kind = PostKeysError::from_code(envelope.error.as_deref());
                NetworkResponse::failure(kind, envelope.error)
            }
            Err(e) => {
                tracing::warn!(
                    status = response.status,
                    "unreadable error body from key server: {}",
                    e
                );
                NetworkResponse::failure(PostKeysError::Unknown, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PostKeysSuccess;
    use crate::transport::memory::{Scripted, ScriptedTransport};
    use exposure_core::KEY_DATA_LEN;
    use serde_json::json;

    const ENDPOINT: &str = "https://keys.example.test/v1/publish";

    fn client(reply: Scripted) -> DiagnosisKeySubmissionClient<ScriptedTransport> {
        DiagnosisKeySubmissionClient::new(
            ScriptedTransport::replying(reply),
            SubmissionConfig::new(ENDPOINT),
        )
    }

    fn keys() -> Vec<ExposureKey> {
        vec![ExposureKey::new([0x07; KEY_DATA_LEN], 2_650_000, 144, 1)]
    }

    #[tokio::test]
    async fn test_success_with_empty_keys() {
        let client = client(Scripted::Respond(HttpResponse::json(
            200,
            &json!({ "body": { "revocationCertificate": "R1" } }),
        )));

        let result = client
            .submit(&[], &[], "cert123", "hmac1", "com.example.app")
            .await;

        assert_eq!(
            result,
            NetworkResponse::Success {
                body: PostKeysSuccess {
                    revocation_certificate: "R1".into()
                }
            }
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "kind": "success", "body": { "revocationCertificate": "R1" } })
        );
    }

    #[tokio::test]
    async fn test_rejection_collapses_to_unknown() {
        let client = client(Scripted::Respond(HttpResponse::json(
            400,
            &json!({ "error": "INVALID_CERTIFICATE" }),
        )));

        let result = client
            .submit(&keys(), &["US".to_string()], "cert123", "hmac1", "pkg")
            .await;

        assert_eq!(
            result,
            NetworkResponse::Failure {
                error: PostKeysError::Unknown,
                message: Some("INVALID_CERTIFICATE".into()),
            }
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "failure");
        assert_eq!(value["error"], "Unknown");
    }

    #[tokio::test]
    async fn test_unreachable_network_is_a_failure() {
        let client = client(Scripted::Unreachable("network unreachable".into()));

        let result = client
            .submit(&keys(), &["US".to_string()], "cert123", "hmac1", "pkg")
            .await;

        assert_eq!(result, NetworkResponse::failure(PostKeysError::Unknown, None));
    }

    #[tokio::test]
    async fn test_timeout_is_a_failure() {
        let client = client(Scripted::TimedOut);
        let result = client.submit(&[], &[], "cert123", "hmac1", "pkg").await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_failures() {
        let ok_garbage = client(Scripted::Respond(HttpResponse::new(200, "<html>")));
        assert_eq!(
            ok_garbage.submit(&[], &[], "c", "h", "p").await,
            NetworkResponse::failure(PostKeysError::Unknown, None)
        );

        let ok_missing_body = client(Scripted::Respond(HttpResponse::json(200, &json!({}))));
        assert!(!ok_missing_body.submit(&[], &[], "c", "h", "p").await.is_success());

        let err_garbage = client(Scripted::Respond(HttpResponse::new(502, "Bad Gateway")));
        assert_eq!(
            err_garbage.submit(&[], &[], "c", "h", "p").await,
            NetworkResponse::failure(PostKeysError::Unknown, None)
        );

        let err_no_code = client(Scripted::Respond(HttpResponse::json(500, &json!({}))));
        assert_eq!(
            err_no_code.submit(&[], &[], "c", "h", "p").await,
            NetworkResponse::failure(PostKeysError::Unknown, None)
        );
    }

    #[tokio::test]
    async fn test_exactly_one_request_with_expected_shape() {
        let client = client(Scripted::Respond(HttpResponse::json(
            500,
            &json!({ "error": "INTERNAL" }),
        )));

        client
            .submit(&keys(), &["US".to_string()], "cert123", "hmac1", "pkg")
            .await;

        let requests = client.transport().requests().await;
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.url, ENDPOINT);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("accept"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["verificationPayload"], "cert123");
        assert_eq!(body["hmackey"], "hmac1");
        assert_eq!(body["appPackageName"], "pkg");
        assert_eq!(body["regions"], json!(["US"]));
        assert_eq!(body["padding"], "");
        assert_eq!(body["temporaryExposureKeys"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_are_independent() {
        let transport = ScriptedTransport::new();
        transport
            .push(Scripted::Respond(HttpResponse::json(
                200,
                &json!({ "body": { "revocationCertificate": "R" } }),
            )))
            .await;
        transport
            .push(Scripted::Respond(HttpResponse::json(
                200,
                &json!({ "body": { "revocationCertificate": "R" } }),
            )))
            .await;
        let client = DiagnosisKeySubmissionClient::new(transport, SubmissionConfig::new(ENDPOINT));

        let (a, b) = tokio::join!(
            client.submit(&[], &[], "cert-a", "h", "p"),
            client.submit(&[], &[], "cert-b", "h", "p"),
        );

        assert!(a.is_success() && b.is_success());
        assert_eq!(client.transport().requests().await.len(), 2);
    }
}
