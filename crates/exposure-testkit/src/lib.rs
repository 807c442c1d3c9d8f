//! # Exposure Testkit
//!
//! Testing utilities for exposure-kit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: pinned request bodies and key-set HMACs for the key server
//! - **Generators**: Proptest strategies for statuses and exposure keys
//! - **Fixtures**: a context wired to in-memory capabilities and a scripted transport
//!
//! ## Golden Vectors
//!
//! ```rust
//! use exposure_testkit::vectors::verify_all_vectors;
//!
//! for report in verify_all_vectors() {
//!     assert!(report.passed(), "{}", report.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use exposure_core::ExposureNotificationState;
//! use exposure_testkit::generators::permission_status;
//!
//! proptest! {
//!     #[test]
//!     fn active_implies_authorized(status in permission_status()) {
//!         let state = ExposureNotificationState::derive(status);
//!         prop_assert!(!state.is_active || state.is_authorized);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use exposure_perms::Platform;
//! use exposure_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::builder().platform(Platform::Ios).build();
//! assert_eq!(fixture.context.permissions().platform(), Platform::Ios);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{sample_keys, FixtureBuilder, TestFixture, TEST_ENDPOINT, TEST_PACKAGE};
pub use generators::{exposure_key, exposure_keys, permission_status};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector, VectorReport};

/// Install a test subscriber that honors `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
