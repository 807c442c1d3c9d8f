//! Loading configuration from disk.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use exposure_kit::{ExposureConfig, ExposureError, Platform};

#[test]
fn loads_json_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "postDiagnosisKeysUrl": "https://keys.example.test/v1/publish",
            "appPackageName": "org.example.exposure",
            "submitTimeoutSecs": 12,
            "platform": "iOS",
            "regionCodes": ["US", "MX"]
        }}"#
    )?;

    let config = ExposureConfig::from_json_file(file.path())?;
    assert_eq!(config.submission.endpoint, "https://keys.example.test/v1/publish");
    assert_eq!(config.submission.timeout, Duration::from_secs(12));
    assert_eq!(config.platform, Platform::Ios);
    assert_eq!(config.region_codes, vec!["US", "MX"]);
    Ok(())
}

#[test]
fn missing_file_is_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = ExposureConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ExposureError::ConfigIo(_)));
    Ok(())
}

#[test]
fn file_without_package_name_is_rejected() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{ "postDiagnosisKeysUrl": "https://keys.example.test" }}"#)?;

    let err = ExposureConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ExposureError::MissingSetting(_)));
    Ok(())
}
