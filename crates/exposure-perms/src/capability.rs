//! Native capability abstraction.
//!
//! The OS exposure-notification framework, the notification permission API,
//! and the system settings app are consumed through these traits. Platform
//! bridges implement them; the [`memory`] module provides in-process
//! implementations for tests and simulators.

use std::sync::Arc;

use async_trait::async_trait;
use exposure_core::{NotificationStatus, PermissionStatus};

use crate::error::Result;

/// The OS exposure-notification framework.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ExposureNotificationCapability: Send + Sync {
    /// Current (authorization, enablement) pair.
    async fn status(&self) -> Result<PermissionStatus>;

    /// Show the OS prompt (or enable directly where allowed) and resolve to
    /// the status after the user responds.
    async fn request_enable(&self) -> Result<PermissionStatus>;

    /// Whether the Bluetooth adapter is powered on.
    async fn bluetooth_enabled(&self) -> Result<bool>;
}

/// The user-facing notification permission.
#[async_trait]
pub trait NotificationCapability: Send + Sync {
    async fn status(&self) -> Result<NotificationStatus>;

    async fn request(&self) -> Result<NotificationStatus>;
}

/// Redirects the user to the system settings app.
#[async_trait]
pub trait SettingsRedirect: Send + Sync {
    async fn open_settings(&self) -> Result<()>;
}

/// The platform the app runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    #[default]
    Android,
}

impl Platform {
    /// Whether a denied exposure-notification authorization must be changed
    /// in system settings because the OS will not show its prompt again.
    pub fn supports_settings_redirect(&self) -> bool {
        matches!(self, Platform::Ios)
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// The set of native capabilities the controller is built from.
#[derive(Clone)]
pub struct NativeCapabilities {
    pub exposure: Arc<dyn ExposureNotificationCapability>,
    pub notifications: Arc<dyn NotificationCapability>,
    pub settings: Arc<dyn SettingsRedirect>,
}

/// In-memory capabilities for testing.
///
/// Each capability counts its native calls so tests can assert how many
/// prompts were shown.
pub mod memory {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use exposure_core::{AuthorizationStatus, EnablementStatus};
    use tokio::sync::Mutex;

    use crate::error::CapabilityError;

    #[derive(Debug)]
    struct ExposureState {
        status: PermissionStatus,
        /// Status the framework moves to when a prompt is accepted.
        granted: PermissionStatus,
        bluetooth: bool,
        failure: Option<CapabilityError>,
    }

    /// In-memory exposure-notification framework.
    #[derive(Debug)]
    pub struct MemoryExposureCapability {
        state: Mutex<ExposureState>,
        request_delay: Duration,
        request_count: AtomicUsize,
        status_count: AtomicUsize,
    }

    impl MemoryExposureCapability {
        /// Create a framework reporting `status`, with Bluetooth on.
        pub fn new(status: PermissionStatus) -> Self {
            Self {
                state: Mutex::new(ExposureState {
                    status,
                    granted: PermissionStatus::new(
                        AuthorizationStatus::Authorized,
                        EnablementStatus::Enabled,
                    ),
                    bluetooth: true,
                    failure: None,
                }),
                request_delay: Duration::ZERO,
                request_count: AtomicUsize::new(0),
                status_count: AtomicUsize::new(0),
            }
        }

        /// Hold every prompt open for `delay` before resolving.
        pub fn with_request_delay(mut self, delay: Duration) -> Self {
            self.request_delay = delay;
            self
        }

        /// Status the framework moves to when a prompt resolves.
        pub fn with_granted_status(mut self, granted: PermissionStatus) -> Self {
            self.state.get_mut().granted = granted;
            self
        }

        pub fn with_bluetooth(mut self, on: bool) -> Self {
            self.state.get_mut().bluetooth = on;
            self
        }

        /// Change the status, as if the user toggled it in settings.
        pub async fn set_status(&self, status: PermissionStatus) {
            self.state.lock().await.status = status;
        }

        pub async fn set_bluetooth(&self, on: bool) {
            self.state.lock().await.bluetooth = on;
        }

        /// Make every subsequent call fail with `failure` (or succeed again with `None`).
        pub async fn set_failure(&self, failure: Option<CapabilityError>) {
            self.state.lock().await.failure = failure;
        }

        /// Number of prompts shown.
        pub fn request_count(&self) -> usize {
            self.request_count.load(Ordering::SeqCst)
        }

        /// Number of status queries answered.
        pub fn status_count(&self) -> usize {
            self.status_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExposureNotificationCapability for MemoryExposureCapability {
        async fn status(&self) -> Result<PermissionStatus> {
            self.status_count.fetch_add(1, Ordering::SeqCst);
            let state = self.state.lock().await;
            match &state.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(state.status),
            }
        }

        async fn request_enable(&self) -> Result<PermissionStatus> {
            self.request_count.fetch_add(1, Ordering::SeqCst);
            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            let mut state = self.state.lock().await;
            if let Some(failure) = &state.failure {
                return Err(failure.clone());
            }
            state.status = state.granted;
            Ok(state.status)
        }

        async fn bluetooth_enabled(&self) -> Result<bool> {
            let state = self.state.lock().await;
            match &state.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(state.bluetooth),
            }
        }
    }

    #[derive(Debug)]
    struct NotificationState {
        status: NotificationStatus,
        granted: NotificationStatus,
        failure: Option<CapabilityError>,
    }

    /// In-memory notification permission.
    #[derive(Debug)]
    pub struct MemoryNotificationCapability {
        state: Mutex<NotificationState>,
        request_delay: Duration,
        request_count: AtomicUsize,
    }

    impl MemoryNotificationCapability {
        /// Create a permission reporting `status` that is granted when prompted.
        pub fn new(status: NotificationStatus) -> Self {
            Self {
                state: Mutex::new(NotificationState {
                    status,
                    granted: NotificationStatus::Granted,
                    failure: None,
                }),
                request_delay: Duration::ZERO,
                request_count: AtomicUsize::new(0),
            }
        }

        pub fn with_request_delay(mut self, delay: Duration) -> Self {
            self.request_delay = delay;
            self
        }

        /// Status the permission moves to when a prompt resolves.
        pub fn with_granted_status(mut self, granted: NotificationStatus) -> Self {
            self.state.get_mut().granted = granted;
            self
        }

        pub async fn set_failure(&self, failure: Option<CapabilityError>) {
            self.state.lock().await.failure = failure;
        }

        pub fn request_count(&self) -> usize {
            self.request_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NotificationCapability for MemoryNotificationCapability {
        async fn status(&self) -> Result<NotificationStatus> {
            let state = self.state.lock().await;
            match &state.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(state.status),
            }
        }

        async fn request(&self) -> Result<NotificationStatus> {
            self.request_count.fetch_add(1, Ordering::SeqCst);
            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            let mut state = self.state.lock().await;
            if let Some(failure) = &state.failure {
                return Err(failure.clone());
            }
            state.status = state.granted;
            Ok(state.status)
        }
    }

    /// Settings redirect that only counts how often it was used.
    #[derive(Debug, Default)]
    pub struct MemorySettingsRedirect {
        open_count: AtomicUsize,
    }

    impl MemorySettingsRedirect {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn open_count(&self) -> usize {
            self.open_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SettingsRedirect for MemorySettingsRedirect {
        async fn open_settings(&self) -> Result<()> {
            self.open_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
