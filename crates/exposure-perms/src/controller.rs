//! The permissions controller.
//!
//! One controller is built at startup and shared by handle. It is the only
//! writer of permission status; everyone else reads snapshots or watches.

use std::sync::Arc;

use exposure_core::{
    AuthorizationStatus, ExposureNotificationState, NotificationStatus, PermissionStatus,
    SystemActivity,
};
use futures::future::FutureExt;
use tokio::sync::watch;

use crate::capability::{
    ExposureNotificationCapability, NativeCapabilities, NotificationCapability, Platform,
    SettingsRedirect,
};
use crate::error::Result;
use crate::slot::StatusSlot;

/// Result of asking for exposure notifications to be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The native prompt ran (or was joined) and status was refreshed.
    Updated(PermissionStatus),
    /// Authorization was denied and the OS will not prompt again; route the
    /// user to system settings.
    SettingsRedirectRequired(PermissionStatus),
}

impl RequestOutcome {
    pub fn status(&self) -> PermissionStatus {
        match self {
            RequestOutcome::Updated(status) | RequestOutcome::SettingsRedirectRequired(status) => {
                *status
            }
        }
    }

    pub fn needs_settings_redirect(&self) -> bool {
        matches!(self, RequestOutcome::SettingsRedirectRequired(_))
    }
}

/// A consistent read of every tracked status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionsSnapshot {
    pub exposure: PermissionStatus,
    pub notifications: NotificationStatus,
    /// `None` until the adapter has been queried successfully.
    pub bluetooth: Option<bool>,
}

impl PermissionsSnapshot {
    pub fn exposure_state(&self) -> ExposureNotificationState {
        ExposureNotificationState::derive(self.exposure)
    }

    pub fn activity(&self) -> SystemActivity {
        SystemActivity::derive(self.exposure, self.bluetooth)
    }
}

/// Owns the permission state for the process lifetime.
pub struct PermissionsController {
    platform: Platform,
    exposure_capability: Arc<dyn ExposureNotificationCapability>,
    notification_capability: Arc<dyn NotificationCapability>,
    settings: Arc<dyn SettingsRedirect>,
    exposure: StatusSlot<PermissionStatus>,
    notifications: StatusSlot<NotificationStatus>,
    bluetooth: StatusSlot<Option<bool>>,
}

impl PermissionsController {
    /// Create a controller. Statuses start unresolved until the first check.
    pub fn new(platform: Platform, capabilities: NativeCapabilities) -> Self {
        Self {
            platform,
            exposure_capability: capabilities.exposure,
            notification_capability: capabilities.notifications,
            settings: capabilities.settings,
            exposure: StatusSlot::new(PermissionStatus::UNRESOLVED),
            notifications: StatusSlot::new(NotificationStatus::Unknown),
            bluetooth: StatusSlot::new(None),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    pub fn exposure_status(&self) -> PermissionStatus {
        self.exposure.current()
    }

    pub fn notification_status(&self) -> NotificationStatus {
        self.notifications.current()
    }

    pub fn bluetooth_status(&self) -> Option<bool> {
        self.bluetooth.current()
    }

    pub fn snapshot(&self) -> PermissionsSnapshot {
        PermissionsSnapshot {
            exposure: self.exposure_status(),
            notifications: self.notification_status(),
            bluetooth: self.bluetooth_status(),
        }
    }

    pub fn subscribe_exposure(&self) -> watch::Receiver<PermissionStatus> {
        self.exposure.subscribe()
    }

    pub fn subscribe_notifications(&self) -> watch::Receiver<NotificationStatus> {
        self.notifications.subscribe()
    }

    pub fn subscribe_bluetooth(&self) -> watch::Receiver<Option<bool>> {
        self.bluetooth.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exposure notifications
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-query the framework and store the result.
    pub async fn check_exposure_notifications(&self) -> PermissionStatus {
        let status = exposure_or_unresolved(self.exposure_capability.status().await);
        self.exposure.publish(status)
    }

    /// Prompt the user to enable exposure notifications.
    ///
    /// If authorization was denied on a platform whose OS will not prompt a
    /// second time, no prompt is issued and the caller is told to redirect
    /// to settings. Overlapping calls share one prompt.
    pub async fn request_exposure_notifications(&self) -> RequestOutcome {
        let current = self.exposure.current();
        if current.authorization == AuthorizationStatus::Unauthorized
            && self.platform.supports_settings_redirect()
        {
            tracing::info!("exposure notifications unauthorized, settings redirect required");
            return RequestOutcome::SettingsRedirectRequired(current);
        }

        let capability = Arc::clone(&self.exposure_capability);
        let status = self
            .exposure
            .coalesce(move || {
                async move { exposure_or_unresolved(capability.request_enable().await) }.boxed()
            })
            .await;

        tracing::debug!(%status, "exposure notification request resolved");
        RequestOutcome::Updated(status)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn check_notifications(&self) -> NotificationStatus {
        let status = notification_or_unknown(self.notification_capability.status().await);
        self.notifications.publish(status)
    }

    /// Prompt for the notification permission. Overlapping calls share one prompt.
    pub async fn request_notifications(&self) -> NotificationStatus {
        let capability = Arc::clone(&self.notification_capability);
        let status = self
            .notifications
            .coalesce(move || {
                async move { notification_or_unknown(capability.request().await) }.boxed()
            })
            .await;

        tracing::debug!(%status, "notification permission request resolved");
        status
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bluetooth
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn check_bluetooth(&self) -> Option<bool> {
        let on = match self.exposure_capability.bluetooth_enabled().await {
            Ok(on) => Some(on),
            Err(e) => {
                tracing::warn!("bluetooth query failed, treating adapter as off: {}", e);
                None
            }
        };
        self.bluetooth.publish(on)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Combined
    // ─────────────────────────────────────────────────────────────────────────

    /// Refresh every status concurrently.
    pub async fn check_all(&self) -> PermissionsSnapshot {
        let (exposure, notifications, bluetooth) = tokio::join!(
            self.check_exposure_notifications(),
            self.check_notifications(),
            self.check_bluetooth(),
        );
        PermissionsSnapshot {
            exposure,
            notifications,
            bluetooth,
        }
    }

    /// Send the user to the system settings app.
    ///
    /// Returns whether the redirect was handed to the OS.
    pub async fn open_settings(&self) -> bool {
        match self.settings.open_settings().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to open system settings: {}", e);
                false
            }
        }
    }
}

fn exposure_or_unresolved(result: Result<PermissionStatus>) -> PermissionStatus {
    result.unwrap_or_else(|e| {
        tracing::warn!("exposure notification query failed, failing closed: {}", e);
        PermissionStatus::UNRESOLVED
    })
}

fn notification_or_unknown(result: Result<NotificationStatus>) -> NotificationStatus {
    result.unwrap_or_else(|e| {
        tracing::warn!("notification permission query failed: {}", e);
        NotificationStatus::Unknown
    })
}
