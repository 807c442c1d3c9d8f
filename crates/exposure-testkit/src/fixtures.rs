//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;
use std::time::Duration;

use exposure_core::{
    AuthorizationStatus, EnablementStatus, ExposureKey, NotificationStatus, PermissionStatus,
    DEFAULT_ROLLING_PERIOD, KEY_DATA_LEN,
};
use exposure_kit::{ExposureConfig, ExposureContext};
use exposure_perms::memory::{
    MemoryExposureCapability, MemoryNotificationCapability, MemorySettingsRedirect,
};
use exposure_perms::{NativeCapabilities, Platform};
use exposure_submit::{HttpResponse, Scripted, ScriptedTransport, SubmissionConfig};

/// Endpoint used by every fixture.
pub const TEST_ENDPOINT: &str = "https://keys.example.test/v1/publish";

/// Package name used by every fixture.
pub const TEST_PACKAGE: &str = "org.example.exposure";

/// A context wired to in-memory capabilities and a scripted transport.
///
/// The capability handles are kept so tests can change what the "OS"
/// reports and count prompts.
pub struct TestFixture {
    pub exposure: Arc<MemoryExposureCapability>,
    pub notifications: Arc<MemoryNotificationCapability>,
    pub settings: Arc<MemorySettingsRedirect>,
    pub context: ExposureContext<ScriptedTransport>,
}

/// Builder for [`TestFixture`].
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    platform: Platform,
    exposure: PermissionStatus,
    granted: PermissionStatus,
    notifications: NotificationStatus,
    bluetooth: bool,
    prompt_delay: Duration,
    regions: Vec<String>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            platform: Platform::Android,
            exposure: PermissionStatus::UNRESOLVED,
            granted: PermissionStatus::new(AuthorizationStatus::Authorized, EnablementStatus::Enabled),
            notifications: NotificationStatus::Unknown,
            bluetooth: true,
            prompt_delay: Duration::ZERO,
            regions: vec!["US".to_string()],
        }
    }
}

impl FixtureBuilder {
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Status the OS reports before any prompt.
    pub fn exposure(mut self, status: PermissionStatus) -> Self {
        self.exposure = status;
        self
    }

    /// Status the OS moves to when the prompt is accepted.
    pub fn granted(mut self, status: PermissionStatus) -> Self {
        self.granted = status;
        self
    }

    pub fn notifications(mut self, status: NotificationStatus) -> Self {
        self.notifications = status;
        self
    }

    pub fn bluetooth(mut self, on: bool) -> Self {
        self.bluetooth = on;
        self
    }

    /// How long each OS prompt stays open.
    pub fn prompt_delay(mut self, delay: Duration) -> Self {
        self.prompt_delay = delay;
        self
    }

    pub fn regions(mut self, regions: &[&str]) -> Self {
        self.regions = regions.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn build(self) -> TestFixture {
        let exposure = Arc::new(
            MemoryExposureCapability::new(self.exposure)
                .with_granted_status(self.granted)
                .with_bluetooth(self.bluetooth)
                .with_request_delay(self.prompt_delay),
        );
        let notifications = Arc::new(
            MemoryNotificationCapability::new(self.notifications)
                .with_request_delay(self.prompt_delay),
        );
        let settings = Arc::new(MemorySettingsRedirect::new());

        let capabilities = NativeCapabilities {
            exposure: exposure.clone(),
            notifications: notifications.clone(),
            settings: settings.clone(),
        };
        let config = ExposureConfig::new(SubmissionConfig::new(TEST_ENDPOINT), TEST_PACKAGE)
            .with_platform(self.platform)
            .with_region_codes(self.regions);

        TestFixture {
            exposure,
            notifications,
            settings,
            context: ExposureContext::with_transport(config, capabilities, ScriptedTransport::new()),
        }
    }
}

impl TestFixture {
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }

    /// Android, unresolved status, Bluetooth on.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn transport(&self) -> &ScriptedTransport {
        self.context.submission().transport()
    }

    /// Queue a reply for the next submission.
    pub async fn reply(&self, reply: Scripted) {
        self.transport().push(reply).await;
    }

    /// Queue a 200 carrying `revocation_certificate`.
    pub async fn accept(&self, revocation_certificate: &str) {
        self.reply(Scripted::Respond(HttpResponse::json(
            200,
            &serde_json::json!({ "body": { "revocationCertificate": revocation_certificate } }),
        )))
        .await;
    }

    /// Queue an error reply with the given server code.
    pub async fn reject(&self, status: u16, code: &str) {
        self.reply(Scripted::Respond(HttpResponse::json(
            status,
            &serde_json::json!({ "error": code }),
        )))
        .await;
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fourteen days of keys ending at `last_day`, oldest first.
pub fn sample_keys(last_day: u32) -> Vec<ExposureKey> {
    (0..14u32)
        .rev()
        .map(|offset| {
            let day = last_day.saturating_sub(offset);
            let mut key = [0u8; KEY_DATA_LEN];
            key[..4].copy_from_slice(&day.to_be_bytes());
            ExposureKey::new(key, day * DEFAULT_ROLLING_PERIOD, DEFAULT_ROLLING_PERIOD, 0)
        })
        .collect()
}
