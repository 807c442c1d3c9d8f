//! Golden vectors for the submission wire format.
//!
//! Every client of the key server must produce identical request bodies and
//! key-set HMACs for the same inputs.

use anyhow::Result;
use exposure_kit::submit::{tek_hmac, tek_message};
use exposure_testkit::{all_vectors, init_tracing, verify_all_vectors, TestFixture};

#[test]
fn golden_vectors_match() {
    init_tracing();
    for report in verify_all_vectors() {
        assert!(report.message_matches, "message mismatch in '{}'", report.name);
        assert!(report.hmac_matches, "hmac mismatch in '{}'", report.name);
        assert!(
            report.body_matches,
            "body mismatch in '{}': {}",
            report.name, report.body
        );
    }
}

#[test]
fn vectors_are_deterministic() {
    for vector in all_vectors() {
        let keys = vector.keys();
        assert_eq!(tek_message(&keys), tek_message(&vector.keys()));
        assert_eq!(
            tek_hmac(&keys, &vector.hmac_key()),
            tek_hmac(&vector.keys(), &vector.hmac_key())
        );
        assert_eq!(vector.request().to_json().ok(), vector.request().to_json().ok());
    }
}

#[tokio::test]
async fn context_sends_golden_body() -> Result<()> {
    init_tracing();
    let vector = all_vectors()
        .into_iter()
        .find(|v| v.name == "single key")
        .ok_or_else(|| anyhow::anyhow!("missing vector"))?;

    let fixture = TestFixture::builder().regions(vector.regions).build();
    fixture.accept("R1").await;

    let keys = vector.keys();
    assert_eq!(fixture.context.diagnosis_hmac(&keys, &vector.hmac_key()), vector.expected_hmac);

    let result = fixture
        .context
        .submit_diagnosis(&keys, vector.certificate, &vector.hmac_key())
        .await;
    assert!(result.is_success());

    let requests = fixture.transport().requests().await;
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    let mut expected: serde_json::Value = serde_json::from_str(vector.expected_body)?;
    // The fixture's package name differs from the vector's.
    expected["appPackageName"] = serde_json::json!(exposure_testkit::TEST_PACKAGE);
    assert_eq!(sent, expected);
    Ok(())
}
