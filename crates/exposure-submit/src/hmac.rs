//! HMAC binding between a key set and its verification certificate.
//!
//! Before a certificate is issued, the client sends the verification server
//! an HMAC over the keys it intends to upload. The same HMAC key is later
//! sent as `hmackey` so the key server can check that the uploaded keys are
//! the ones the certificate was issued for.
//!
//! The message is each key formatted as
//! `base64(key).rollingStartNumber.rollingPeriod.transmissionRisk`, sorted,
//! and joined with `,`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use exposure_core::ExposureKey;

use crate::error::{Result, SubmitError};

type HmacSha256 = Hmac<Sha256>;

/// Length of a generated HMAC key in bytes.
pub const HMAC_KEY_LEN: usize = 32;

/// Secret key used to compute the key-set HMAC.
#[derive(Clone, PartialEq, Eq)]
pub struct HmacKey(Vec<u8>);

impl HmacKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; HMAC_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a key from the base64 form sent as `hmackey`.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| SubmitError::InvalidHmacKey(e.to_string()))?;
        if bytes.is_empty() {
            return Err(SubmitError::InvalidHmacKey("empty key".into()));
        }
        Ok(Self(bytes))
    }

    /// The form sent as `hmackey`.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HmacKey(<{} bytes>)", self.0.len())
    }
}

/// The canonical message the HMAC is computed over.
pub fn tek_message(keys: &[ExposureKey]) -> String {
    let mut parts: Vec<String> = keys
        .iter()
        .map(|k| {
            format!(
                "{}.{}.{}.{}",
                k.key_base64(),
                k.rolling_start_number,
                k.rolling_period,
                k.transmission_risk
            )
        })
        .collect();
    parts.sort();
    parts.join(",")
}

/// HMAC-SHA256 over [`tek_message`], base64 encoded.
pub fn tek_hmac(keys: &[ExposureKey], key: &HmacKey) -> String {
    let mut mac =
        HmacSha256::new_from_slice(&key.0).expect("HMAC can take key of any size");
    mac.update(tek_message(keys).as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
