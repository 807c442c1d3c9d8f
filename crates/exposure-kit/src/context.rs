//! The exposure context: one object holding permission state and the
//! submission client for an app session.

use std::sync::Arc;

use exposure_core::{ExposureKey, ExposureNotificationState, SystemActivity};
use exposure_perms::{NativeCapabilities, PermissionsController, PermissionsSnapshot};
use exposure_submit::{
    tek_hmac, DiagnosisKeySubmissionClient, HmacKey, HttpTransport, ReqwestTransport,
    SubmissionResult,
};

use crate::config::ExposureConfig;
use crate::error::Result;

/// Permission state and diagnosis submission for one app session.
///
/// The controller is shared so UI layers can hold their own handle and
/// subscribe to status changes.
pub struct ExposureContext<T: HttpTransport = ReqwestTransport> {
    config: ExposureConfig,
    permissions: Arc<PermissionsController>,
    submission: DiagnosisKeySubmissionClient<T>,
}

impl ExposureContext<ReqwestTransport> {
    /// Create a context that submits over HTTP with `reqwest`.
    pub fn connect(config: ExposureConfig, capabilities: NativeCapabilities) -> Result<Self> {
        let transport = ReqwestTransport::new(config.submission.timeout)?;
        Ok(Self::with_transport(config, capabilities, transport))
    }
}

impl<T: HttpTransport> ExposureContext<T> {
    pub fn with_transport(
        config: ExposureConfig,
        capabilities: NativeCapabilities,
        transport: T,
    ) -> Self {
        let permissions = Arc::new(PermissionsController::new(config.platform, capabilities));
        let submission = DiagnosisKeySubmissionClient::new(transport, config.submission.clone());
        Self {
            config,
            permissions,
            submission,
        }
    }

    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    pub fn permissions(&self) -> &Arc<PermissionsController> {
        &self.permissions
    }

    pub fn submission(&self) -> &DiagnosisKeySubmissionClient<T> {
        &self.submission
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission state
    // ─────────────────────────────────────────────────────────────────────────

    /// Last known statuses, without querying the OS.
    pub fn snapshot(&self) -> PermissionsSnapshot {
        self.permissions.snapshot()
    }

    /// Derived exposure-notification flags from the last known status.
    pub fn exposure_state(&self) -> ExposureNotificationState {
        self.snapshot().exposure_state()
    }

    pub fn activity(&self) -> SystemActivity {
        self.snapshot().activity()
    }

    /// Re-query every status from the OS.
    ///
    /// Call when the app returns to the foreground; the user may have
    /// changed settings while it was in the background.
    pub async fn refresh(&self) -> PermissionsSnapshot {
        self.permissions.check_all().await
    }

    /// Whether the diagnosis code flow should accept input.
    pub fn can_submit_diagnosis(&self) -> bool {
        self.exposure_state().can_submit_diagnosis()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit keys with the configured regions and package name.
    ///
    /// `certificate` must have been issued for [`tek_hmac`] of these keys
    /// under `hmac_key`; use [`diagnosis_hmac`](Self::diagnosis_hmac) to get
    /// the value the verification server expects.
    pub async fn submit_diagnosis(
        &self,
        keys: &[ExposureKey],
        certificate: &str,
        hmac_key: &HmacKey,
    ) -> SubmissionResult {
        if !self.can_submit_diagnosis() {
            tracing::debug!("submitting diagnosis while exposure notifications are disabled");
        }

        self.submission
            .submit(
                keys,
                &self.config.region_codes,
                certificate,
                &hmac_key.to_base64(),
                &self.config.app_package_name,
            )
            .await
    }

    /// The key-set HMAC sent to the verification server before a
    /// certificate is issued.
    pub fn diagnosis_hmac(&self, keys: &[ExposureKey], hmac_key: &HmacKey) -> String {
        tek_hmac(keys, hmac_key)
    }
}
