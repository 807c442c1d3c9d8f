//! Configuration for an exposure context.
//!
//! Settings come from the environment or from a JSON file:
//!
//! | Environment variable | JSON key | Default |
//! |---|---|---|
//! | `POST_DIAGNOSIS_KEYS_URL` | `postDiagnosisKeysUrl` | required |
//! | `EXPOSURE_APP_PACKAGE_NAME` | `appPackageName` | required |
//! | `EXPOSURE_SUBMIT_TIMEOUT_SECS` | `submitTimeoutSecs` | 30 |
//! | `EXPOSURE_PLATFORM` | `platform` | `android` |
//! | `EXPOSURE_REGION_CODES` (comma separated) | `regionCodes` | `US` |

use std::path::Path;
use std::time::Duration;

use exposure_perms::Platform;
use exposure_submit::SubmissionConfig;
use serde::Deserialize;

use crate::error::{ExposureError, Result};

pub const ENV_ENDPOINT: &str = "POST_DIAGNOSIS_KEYS_URL";
pub const ENV_APP_PACKAGE_NAME: &str = "EXPOSURE_APP_PACKAGE_NAME";
pub const ENV_TIMEOUT_SECS: &str = "EXPOSURE_SUBMIT_TIMEOUT_SECS";
pub const ENV_PLATFORM: &str = "EXPOSURE_PLATFORM";
pub const ENV_REGION_CODES: &str = "EXPOSURE_REGION_CODES";

/// Region codes used when none are configured.
pub const DEFAULT_REGION_CODES: &[&str] = &["US"];

/// Configuration for an [`ExposureContext`](crate::ExposureContext).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureConfig {
    /// Submission endpoint and timeout.
    pub submission: SubmissionConfig,
    /// Platform the app runs on; decides the settings-redirect branch.
    pub platform: Platform,
    /// Package identifier sent with every submission.
    pub app_package_name: String,
    /// Regions the submitted keys apply to.
    pub region_codes: Vec<String>,
}

/// Raw settings before validation. Every field is optional here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSettings {
    post_diagnosis_keys_url: Option<String>,
    app_package_name: Option<String>,
    submit_timeout_secs: Option<u64>,
    platform: Option<String>,
    region_codes: Option<Vec<String>>,
}

impl ExposureConfig {
    pub fn new(submission: SubmissionConfig, app_package_name: impl Into<String>) -> Self {
        Self {
            submission,
            platform: Platform::default(),
            app_package_name: app_package_name.into(),
            region_codes: DEFAULT_REGION_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_region_codes(mut self, region_codes: Vec<String>) -> Self {
        self.region_codes = region_codes;
        self
    }

    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup, using the environment variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let submit_timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ExposureError::InvalidSetting {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        let region_codes = lookup(ENV_REGION_CODES).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(String::from)
                .collect()
        });

        Self::from_raw(RawSettings {
            post_diagnosis_keys_url: lookup(ENV_ENDPOINT),
            app_package_name: lookup(ENV_APP_PACKAGE_NAME),
            submit_timeout_secs,
            platform: lookup(ENV_PLATFORM),
            region_codes,
        })
    }

    /// Load from a JSON file using the camelCase keys.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawSettings = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let endpoint = non_empty(raw.post_diagnosis_keys_url)
            .ok_or(ExposureError::MissingSetting(ENV_ENDPOINT))?;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ExposureError::InvalidSetting {
                key: ENV_ENDPOINT,
                value: endpoint,
            });
        }

        let app_package_name = non_empty(raw.app_package_name)
            .ok_or(ExposureError::MissingSetting(ENV_APP_PACKAGE_NAME))?;

        let mut submission = SubmissionConfig::new(endpoint);
        if let Some(secs) = raw.submit_timeout_secs {
            if secs == 0 {
                return Err(ExposureError::InvalidSetting {
                    key: ENV_TIMEOUT_SECS,
                    value: secs.to_string(),
                });
            }
            submission = submission.with_timeout(Duration::from_secs(secs));
        }

        let platform = match raw.platform {
            Some(raw) => raw.parse::<Platform>().map_err(|_| ExposureError::InvalidSetting {
                key: ENV_PLATFORM,
                value: raw,
            })?,
            None => Platform::default(),
        };

        let mut config = Self::new(submission, app_package_name).with_platform(platform);
        if let Some(codes) = raw.region_codes.filter(|codes| !codes.is_empty()) {
            config = config.with_region_codes(codes);
        }

        tracing::debug!(
            platform = ?config.platform,
            regions = ?config.region_codes,
            "exposure config loaded"
        );
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_lookup_uses_defaults() {
        let config = ExposureConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://keys.example.test/v1/publish"),
            (ENV_APP_PACKAGE_NAME, "org.example.app"),
        ]))
        .unwrap();

        assert_eq!(config.submission.endpoint, "https://keys.example.test/v1/publish");
        assert_eq!(config.submission.timeout, SubmissionConfig::DEFAULT_TIMEOUT);
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.region_codes, vec!["US".to_string()]);
    }

    #[test]
    fn test_full_lookup() {
        let config = ExposureConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://keys.example.test/v1/publish"),
            (ENV_APP_PACKAGE_NAME, "org.example.app"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_PLATFORM, "ios"),
            (ENV_REGION_CODES, "US, CA,,MX"),
        ]))
        .unwrap();

        assert_eq!(config.submission.timeout, Duration::from_secs(5));
        assert_eq!(config.platform, Platform::Ios);
        assert_eq!(config.region_codes, vec!["US", "CA", "MX"]);
    }

    #[test]
    fn test_missing_endpoint() {
        let err = ExposureConfig::from_lookup(lookup(&[(ENV_APP_PACKAGE_NAME, "pkg")])).unwrap_err();
        assert!(matches!(err, ExposureError::MissingSetting(ENV_ENDPOINT)));
    }

    #[test]
    fn test_invalid_values() {
        let err = ExposureConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "ftp://keys.example.test"),
            (ENV_APP_PACKAGE_NAME, "pkg"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ExposureError::InvalidSetting { key: ENV_ENDPOINT, .. }));

        let err = ExposureConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://keys.example.test"),
            (ENV_APP_PACKAGE_NAME, "pkg"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ExposureError::InvalidSetting { key: ENV_TIMEOUT_SECS, .. }));

        let err = ExposureConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://keys.example.test"),
            (ENV_APP_PACKAGE_NAME, "pkg"),
            (ENV_PLATFORM, "symbian"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ExposureError::InvalidSetting { key: ENV_PLATFORM, .. }));
    }

    #[test]
    fn test_json_settings() {
        let config = ExposureConfig::from_json_str(
            r#"{
                "postDiagnosisKeysUrl": "https://keys.example.test/v1/publish",
                "appPackageName": "org.example.app",
                "submitTimeoutSecs": 10,
                "platform": "android",
                "regionCodes": ["CA"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.submission.timeout, Duration::from_secs(10));
        assert_eq!(config.region_codes, vec!["CA"]);
    }

    #[test]
    fn test_json_rejects_unknown_keys() {
        let err = ExposureConfig::from_json_str(r#"{"postDiagnosisKeysUrl": "https://x", "retries": 3}"#)
            .unwrap_err();
        assert!(matches!(err, ExposureError::ConfigParse(_)));
    }
}
