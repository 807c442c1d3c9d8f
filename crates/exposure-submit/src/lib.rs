//! # Exposure Submit
//!
//! Client for reporting a verified positive diagnosis to the key server.
//!
//! ## Overview
//!
//! A submission carries the device's temporary exposure keys, the region
//! codes they apply to, the verification certificate issued for the test
//! result, and the HMAC key that binds the two together. The client sends it
//! in a single POST and classifies the reply:
//!
//! - **2xx** with a `{ body: { revocationCertificate } }` body: success
//! - **non-2xx**: failure, error kind resolved from the server's `error` code
//! - **anything else** (transport errors, unreadable bodies): failure `Unknown`
//!
//! There is no retry; whether to try again is up to the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exposure_submit::{
//!     DiagnosisKeySubmissionClient, HmacKey, NetworkResponse, SubmissionConfig,
//! };
//!
//! async fn example(keys: Vec<exposure_core::ExposureKey>, certificate: String) {
//!     let config = SubmissionConfig::new("https://keys.example.org/v1/publish");
//!     let client = DiagnosisKeySubmissionClient::connect(config).unwrap();
//!     let hmac_key = HmacKey::generate();
//!
//!     let result = client
//!         .submit(&keys, &["US".into()], &certificate, &hmac_key.to_base64(), "org.example.app")
//!         .await;
//!
//!     match result {
//!         NetworkResponse::Success { body } => println!("revocation: {}", body.revocation_certificate),
//!         NetworkResponse::Failure { error, .. } => println!("failed: {:?}", error),
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod hmac;
pub mod payload;
pub mod response;
pub mod transport;

pub use client::{DiagnosisKeySubmissionClient, SubmissionConfig};
pub use error::{Result, SubmitError};
pub use crate::hmac::{tek_hmac, tek_message, HmacKey, HMAC_KEY_LEN};
pub use payload::{DiagnosisSubmissionRequest, PostKeysSuccess, DEFAULT_HEADERS, DEFAULT_PADDING};
pub use response::{NetworkResponse, PostKeysError, SubmissionResult};
pub use transport::{
    memory::Scripted, memory::ScriptedTransport, HttpRequest, HttpResponse, HttpTransport,
    ReqwestTransport,
};
