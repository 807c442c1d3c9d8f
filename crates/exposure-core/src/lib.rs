//! # Exposure Core
//!
//! Pure data model for the exposure-notification subsystem: permission
//! statuses reported by the native layer, the rules that combine them into a
//! single "is the user protected" signal, and the exposure keys that are
//! passed through to diagnosis submission.
//!
//! This crate contains no I/O, no async, no networking.
//!
//! ## Key Types
//!
//! - [`PermissionStatus`] - (authorization, enablement) pair from the OS
//! - [`ExposureNotificationState`] - booleans derived from a status
//! - [`SystemActivity`] - exposure state combined with the Bluetooth adapter
//! - [`ExposureKey`] - a temporary exposure key, opaque to this system
//!
//! ## Fail Closed
//!
//! `Unknown` authorization is never treated as authorized, and a missing
//! Bluetooth reading is treated as off:
//!
//! ```rust
//! use exposure_core::{AuthorizationStatus, EnablementStatus, PermissionStatus, SystemActivity};
//!
//! let status = PermissionStatus::new(AuthorizationStatus::Unknown, EnablementStatus::Enabled);
//! let activity = SystemActivity::derive(status, Some(true));
//! assert!(!activity.is_fully_active());
//! ```

pub mod derive;
pub mod error;
pub mod keys;
pub mod status;

pub use derive::{Blocker, ExposureNotificationState, SystemActivity};
pub use error::{CoreError, Result};
pub use keys::{ExposureKey, DEFAULT_ROLLING_PERIOD, KEY_DATA_LEN};
pub use status::{AuthorizationStatus, EnablementStatus, NotificationStatus, PermissionStatus};
