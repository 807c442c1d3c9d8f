//! Temporary exposure keys.
//!
//! Keys are produced by the native exposure-notification framework and only
//! passed through this system. The JSON shape matches what the framework
//! bridge hands over and what the key server accepts:
//!
//! ```json
//! { "key": "<base64>", "rollingStartNumber": 2650000, "rollingPeriod": 144, "transmissionRisk": 0 }
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Length of temporary exposure key material in bytes.
pub const KEY_DATA_LEN: usize = 16;

/// Default number of 10-minute intervals a key is valid for (one day).
pub const DEFAULT_ROLLING_PERIOD: u32 = 144;

/// A temporary exposure key with its rolling interval bounds.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureKey {
    #[serde(with = "key_base64")]
    key: [u8; KEY_DATA_LEN],
    pub rolling_start_number: u32,
    pub rolling_period: u32,
    pub transmission_risk: u8,
}

impl ExposureKey {
    pub fn new(
        key: [u8; KEY_DATA_LEN],
        rolling_start_number: u32,
        rolling_period: u32,
        transmission_risk: u8,
    ) -> Self {
        Self {
            key,
            rolling_start_number,
            rolling_period,
            transmission_risk,
        }
    }

    /// Decode a key whose material arrives base64 encoded from the native bridge.
    pub fn from_base64(
        key: &str,
        rolling_start_number: u32,
        rolling_period: u32,
        transmission_risk: u8,
    ) -> Result<Self> {
        let key = key_base64::decode(key)?;
        Ok(Self::new(key, rolling_start_number, rolling_period, transmission_risk))
    }

    /// Raw key material.
    pub fn key_data(&self) -> &[u8; KEY_DATA_LEN] {
        &self.key
    }

    /// Key material as standard base64.
    pub fn key_base64(&self) -> String {
        STANDARD.encode(self.key)
    }

    /// First interval number after this key stops being valid.
    pub fn rolling_end_number(&self) -> u32 {
        self.rolling_start_number.saturating_add(self.rolling_period)
    }
}

// Key material is sensitive; only a short fingerprint is printed.
impl fmt::Debug for ExposureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExposureKey")
            .field("key", &format_args!("{}..", &hex::encode(self.key)[..8]))
            .field("rolling_start_number", &self.rolling_start_number)
            .field("rolling_period", &self.rolling_period)
            .field("transmission_risk", &self.transmission_risk)
            .finish()
    }
}

mod key_base64 {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn decode(encoded: &str) -> Result<[u8; KEY_DATA_LEN]> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CoreError::InvalidKeyEncoding(e.to_string()))?;
        <[u8; KEY_DATA_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
            CoreError::InvalidKeyLength {
                expected: KEY_DATA_LEN,
                actual: bytes.len(),
            }
        })
    }

    pub fn serialize<S: Serializer>(
        key: &[u8; KEY_DATA_LEN],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(key))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<[u8; KEY_DATA_LEN], D::Error> {
        let encoded = String::deserialize(deserializer)?;
        decode(&encoded).map_err(serde::de::Error::custom)
    }
}
