//! # Exposure Permissions
//!
//! Native capability interfaces and the controller that owns permission
//! state.
//!
//! ## Overview
//!
//! The controller tracks three things:
//!
//! - **Exposure notifications**: the OS framework's (authorization, enablement) pair
//! - **Notifications**: the user-facing notification permission
//! - **Bluetooth**: whether the adapter is powered on
//!
//! Each kind has a `check` that re-queries the OS and, where applicable, a
//! `request` that shows the OS prompt. Native failures never surface as
//! errors; they collapse to fail-closed statuses.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use exposure_core::{NotificationStatus, PermissionStatus};
//! use exposure_perms::memory::{
//!     MemoryExposureCapability, MemoryNotificationCapability, MemorySettingsRedirect,
//! };
//! use exposure_perms::{NativeCapabilities, PermissionsController, Platform};
//!
//! async fn example() {
//!     let controller = Arc::new(PermissionsController::new(
//!         Platform::Ios,
//!         NativeCapabilities {
//!             exposure: Arc::new(MemoryExposureCapability::new(PermissionStatus::UNRESOLVED)),
//!             notifications: Arc::new(MemoryNotificationCapability::new(NotificationStatus::Unknown)),
//!             settings: Arc::new(MemorySettingsRedirect::new()),
//!         },
//!     ));
//!
//!     controller.check_all().await;
//!     let outcome = controller.request_exposure_notifications().await;
//!     if outcome.needs_settings_redirect() {
//!         controller.open_settings().await;
//!     }
//! }
//! ```

pub mod capability;
pub mod controller;
pub mod error;
mod slot;

pub use capability::{
    memory, ExposureNotificationCapability, NativeCapabilities, NotificationCapability, Platform,
    SettingsRedirect,
};
pub use controller::{PermissionsController, PermissionsSnapshot, RequestOutcome};
pub use error::{CapabilityError, Result};
