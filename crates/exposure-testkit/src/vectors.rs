//! Golden vectors for the submission wire format.
//!
//! These pin the exact request body and key-set HMAC so that any client
//! talking to the same key server produces byte-identical output.

use exposure_core::{ExposureKey, KEY_DATA_LEN};
use exposure_submit::{tek_hmac, tek_message, DiagnosisSubmissionRequest, HmacKey};

/// Inputs for one key, kept as plain data so vectors stay `'static`.
#[derive(Debug, Clone, Copy)]
pub struct KeyInput {
    pub fill: u8,
    pub rolling_start_number: u32,
    pub rolling_period: u32,
    pub transmission_risk: u8,
}

impl KeyInput {
    pub fn to_key(&self) -> ExposureKey {
        ExposureKey::new(
            [self.fill; KEY_DATA_LEN],
            self.rolling_start_number,
            self.rolling_period,
            self.transmission_risk,
        )
    }
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub keys: &'static [KeyInput],
    pub regions: &'static [&'static str],
    pub certificate: &'static str,
    pub app_package_name: &'static str,
    /// Raw HMAC secret.
    pub hmac_secret: &'static [u8],
    /// Expected `tek_message` output.
    pub expected_message: &'static str,
    /// Expected base64 HMAC-SHA256 over the message.
    pub expected_hmac: &'static str,
    /// Expected request body, byte for byte.
    pub expected_body: &'static str,
}

impl GoldenVector {
    pub fn keys(&self) -> Vec<ExposureKey> {
        self.keys.iter().map(KeyInput::to_key).collect()
    }

    pub fn hmac_key(&self) -> HmacKey {
        HmacKey::from_bytes(self.hmac_secret.to_vec())
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.iter().map(|r| r.to_string()).collect()
    }

    pub fn request(&self) -> DiagnosisSubmissionRequest {
        DiagnosisSubmissionRequest::new(
            self.keys(),
            self.regions(),
            self.certificate,
            self.hmac_key().to_base64(),
            self.app_package_name,
        )
    }
}

const SECRET_SEQUENCE: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31,
];

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty key set",
            keys: &[],
            regions: &[],
            certificate: "cert123",
            app_package_name: "pkg",
            hmac_secret: b"secret",
            expected_message: "",
            expected_hmac: "+eZuF5tnR65UEI+C+K3os8Jddv0wr95sOVgixTAZYWk=",
            expected_body: concat!(
                r#"{"temporaryExposureKeys":[],"regions":[],"appPackageName":"pkg","#,
                r#""verificationPayload":"cert123","hmackey":"c2VjcmV0","padding":""}"#,
            ),
        },
        GoldenVector {
            name: "single key",
            keys: &[KeyInput {
                fill: 0x01,
                rolling_start_number: 2_650_000,
                rolling_period: 144,
                transmission_risk: 0,
            }],
            regions: &["US"],
            certificate: "eyJhbGciOiJFUzI1NiJ9.e30.sig",
            app_package_name: "org.example.app",
            hmac_secret: &SECRET_SEQUENCE,
            expected_message: "AQEBAQEBAQEBAQEBAQEBAQ==.2650000.144.0",
            expected_hmac: "yL0Mqa0NPaf17gPOOh827csM1+hlm8gxCwNcaY5Bdkg=",
            expected_body: concat!(
                r#"{"temporaryExposureKeys":[{"key":"AQEBAQEBAQEBAQEBAQEBAQ==","#,
                r#""rollingStartNumber":2650000,"rollingPeriod":144,"transmissionRisk":0}],"#,
                r#""regions":["US"],"appPackageName":"org.example.app","#,
                r#""verificationPayload":"eyJhbGciOiJFUzI1NiJ9.e30.sig","#,
                r#""hmackey":"AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=","padding":""}"#,
            ),
        },
        GoldenVector {
            name: "two keys, message sorted",
            keys: &[
                KeyInput {
                    fill: 0x01,
                    rolling_start_number: 2_650_000,
                    rolling_period: 144,
                    transmission_risk: 0,
                },
                KeyInput {
                    fill: 0x00,
                    rolling_start_number: 2_650_144,
                    rolling_period: 144,
                    transmission_risk: 2,
                },
            ],
            regions: &["US", "CA"],
            certificate: "cert123",
            app_package_name: "pkg",
            hmac_secret: b"secret",
            expected_message: concat!(
                "AAAAAAAAAAAAAAAAAAAAAA==.2650144.144.2,",
                "AQEBAQEBAQEBAQEBAQEBAQ==.2650000.144.0",
            ),
            expected_hmac: "uGjgappJUID3Z8Rmt51r59TDrK88GKGREYAKqBuXd8o=",
            expected_body: concat!(
                r#"{"temporaryExposureKeys":["#,
                r#"{"key":"AQEBAQEBAQEBAQEBAQEBAQ==","rollingStartNumber":2650000,"rollingPeriod":144,"transmissionRisk":0},"#,
                r#"{"key":"AAAAAAAAAAAAAAAAAAAAAA==","rollingStartNumber":2650144,"rollingPeriod":144,"transmissionRisk":2}],"#,
                r#""regions":["US","CA"],"appPackageName":"pkg","#,
                r#""verificationPayload":"cert123","hmackey":"c2VjcmV0","padding":""}"#,
            ),
        },
    ]
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorReport {
    pub name: String,
    pub message_matches: bool,
    pub hmac_matches: bool,
    pub body_matches: bool,
    pub body: String,
}

impl VectorReport {
    pub fn passed(&self) -> bool {
        self.message_matches && self.hmac_matches && self.body_matches
    }
}

/// Check every golden vector against this implementation.
pub fn verify_all_vectors() -> Vec<VectorReport> {
    all_vectors().iter().map(verify_vector).collect()
}

pub fn verify_vector(vector: &GoldenVector) -> VectorReport {
    let keys = vector.keys();
    let body = match vector.request().to_json() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => format!("<encode error: {e}>"),
    };

    VectorReport {
        name: vector.name.to_string(),
        message_matches: tek_message(&keys) == vector.expected_message,
        hmac_matches: tek_hmac(&keys, &vector.hmac_key()) == vector.expected_hmac,
        body_matches: body == vector.expected_body,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for report in verify_all_vectors() {
            assert!(report.passed(), "vector '{}' failed: {:?}", report.name, report);
        }
    }

    #[test]
    fn test_key_order_changes_body_not_hmac() {
        let vector = &all_vectors()[2];
        let mut reversed = vector.keys();
        reversed.reverse();

        assert_eq!(tek_hmac(&reversed, &vector.hmac_key()), vector.expected_hmac);

        let request = DiagnosisSubmissionRequest::new(
            reversed,
            vector.regions(),
            vector.certificate,
            vector.hmac_key().to_base64(),
            vector.app_package_name,
        );
        let body = request.to_json().unwrap();
        assert_ne!(body, vector.expected_body.as_bytes());
    }
}
