//! # Exposure Kit
//!
//! The unified API for the exposure-notification subsystem: permission
//! state, the flags derived from it, and diagnosis key submission.
//!
//! ## Overview
//!
//! - **Status**: the (authorization, enablement) pair the OS reports
//! - **Derivation**: pure rules turning a status into "is the user protected"
//! - **Permissions**: a controller that queries, prompts, and publishes changes
//! - **Submission**: one POST of the user's keys after a positive diagnosis
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exposure_kit::{ExposureConfig, ExposureContext, HmacKey, NativeCapabilities};
//!
//! async fn example(capabilities: NativeCapabilities, keys: Vec<exposure_kit::ExposureKey>) {
//!     let config = ExposureConfig::from_env().unwrap();
//!     let context = ExposureContext::connect(config, capabilities).unwrap();
//!
//!     // Foregrounded: re-read everything from the OS.
//!     context.refresh().await;
//!
//!     if context.can_submit_diagnosis() {
//!         let hmac_key = HmacKey::generate();
//!         let _hmac = context.diagnosis_hmac(&keys, &hmac_key);
//!         // ...exchange the verification code and hmac for a certificate...
//!         let result = context.submit_diagnosis(&keys, "certificate", &hmac_key).await;
//!         println!("submitted: {}", result.is_success());
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `exposure_kit::core` - statuses, derivation, exposure keys
//! - `exposure_kit::perms` - native capabilities and the permissions controller
//! - `exposure_kit::submit` - the diagnosis key submission client

pub mod config;
pub mod context;
pub mod error;

pub use exposure_core as core;
pub use exposure_perms as perms;
pub use exposure_submit as submit;

pub use config::ExposureConfig;
pub use context::ExposureContext;
pub use error::{ExposureError, Result};

pub use exposure_core::{
    AuthorizationStatus, Blocker, EnablementStatus, ExposureKey, ExposureNotificationState,
    NotificationStatus, PermissionStatus, SystemActivity,
};
pub use exposure_perms::{
    NativeCapabilities, Platform, PermissionsController, PermissionsSnapshot, RequestOutcome,
};
pub use exposure_submit::{
    HmacKey, NetworkResponse, PostKeysError, PostKeysSuccess, SubmissionConfig, SubmissionResult,
};
