//! Derivation of the "is the system protecting the user" signal.
//!
//! Nothing here is stored. Callers derive from the live status on every read
//! so a derived value can never go stale.

use serde::Serialize;

use crate::status::{AuthorizationStatus, EnablementStatus, PermissionStatus};

/// Booleans derived from a [`PermissionStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExposureNotificationState {
    pub is_authorized: bool,
    pub is_enabled: bool,
    pub is_active: bool,
}

impl ExposureNotificationState {
    /// Derive the state from a status pair.
    ///
    /// `Unknown` authorization counts as not authorized, so an
    /// (Unknown, Enabled) pair is not active.
    pub fn derive(status: PermissionStatus) -> Self {
        let is_authorized = status.authorization == AuthorizationStatus::Authorized;
        let is_enabled = status.enablement == EnablementStatus::Enabled;
        Self {
            is_authorized,
            is_enabled,
            is_active: is_authorized && is_enabled,
        }
    }

    /// Whether the verification code form may be shown.
    ///
    /// Gated on enablement alone; authorization is settled by the OS before
    /// enablement can be on.
    pub fn can_submit_diagnosis(&self) -> bool {
        self.is_enabled
    }
}

impl From<PermissionStatus> for ExposureNotificationState {
    fn from(status: PermissionStatus) -> Self {
        Self::derive(status)
    }
}

/// The first requirement that keeps the system from being fully active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocker {
    NotAuthorized,
    NotEnabled,
    BluetoothOff,
}

/// Exposure-notification state combined with the Bluetooth adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemActivity {
    pub exposure: ExposureNotificationState,
    pub bluetooth_on: bool,
}

impl SystemActivity {
    /// Combine a status pair with a Bluetooth reading.
    ///
    /// `None` means the adapter was never queried or the query failed and is
    /// treated as off.
    pub fn derive(status: PermissionStatus, bluetooth: Option<bool>) -> Self {
        Self {
            exposure: ExposureNotificationState::derive(status),
            bluetooth_on: bluetooth.unwrap_or(false),
        }
    }

    /// Authorized, enabled, and Bluetooth on. Any one false makes this false.
    pub fn is_fully_active(&self) -> bool {
        self.exposure.is_active && self.bluetooth_on
    }

    /// Reason code for the presentation layer, checked in a fixed order.
    pub fn blocker(&self) -> Option<Blocker> {
        if !self.exposure.is_authorized {
            Some(Blocker::NotAuthorized)
        } else if !self.exposure.is_enabled {
            Some(Blocker::NotEnabled)
        } else if !self.bluetooth_on {
            Some(Blocker::BluetoothOff)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn authorization() -> impl Strategy<Value = AuthorizationStatus> {
        prop_oneof![
            Just(AuthorizationStatus::Authorized),
            Just(AuthorizationStatus::Unauthorized),
            Just(AuthorizationStatus::Unknown),
        ]
    }

    fn enablement() -> impl Strategy<Value = EnablementStatus> {
        prop_oneof![Just(EnablementStatus::Enabled), Just(EnablementStatus::Disabled)]
    }

    proptest! {
        #[test]
        fn active_iff_authorized_and_enabled(auth in authorization(), en in enablement()) {
            let state = ExposureNotificationState::derive(PermissionStatus::new(auth, en));
            prop_assert_eq!(
                state.is_active,
                auth == AuthorizationStatus::Authorized && en == EnablementStatus::Enabled
            );
        }

        #[test]
        fn unknown_authorization_is_never_active(en in enablement(), bt in any::<Option<bool>>()) {
            let status = PermissionStatus::new(AuthorizationStatus::Unknown, en);
            prop_assert!(!ExposureNotificationState::derive(status).is_active);
            prop_assert!(!SystemActivity::derive(status, bt).is_fully_active());
        }

        #[test]
        fn blocker_is_none_iff_fully_active(
            auth in authorization(),
            en in enablement(),
            bt in any::<Option<bool>>(),
        ) {
            let activity = SystemActivity::derive(PermissionStatus::new(auth, en), bt);
            prop_assert_eq!(activity.blocker().is_none(), activity.is_fully_active());
        }
    }

    #[test]
    fn test_unknown_and_enabled_is_inactive() {
        let status = PermissionStatus::new(AuthorizationStatus::Unknown, EnablementStatus::Enabled);
        let state = ExposureNotificationState::derive(status);
        assert!(!state.is_authorized);
        assert!(state.is_enabled);
        assert!(!state.is_active);
    }

    #[test]
    fn test_fully_active_is_and_of_bluetooth_and_exposure() {
        let active = PermissionStatus::new(AuthorizationStatus::Authorized, EnablementStatus::Enabled);
        let inactive = PermissionStatus::new(AuthorizationStatus::Authorized, EnablementStatus::Disabled);

        assert!(SystemActivity::derive(active, Some(true)).is_fully_active());
        assert!(!SystemActivity::derive(active, Some(false)).is_fully_active());
        assert!(!SystemActivity::derive(inactive, Some(true)).is_fully_active());
        assert!(!SystemActivity::derive(inactive, Some(false)).is_fully_active());
    }

    #[test]
    fn test_missing_bluetooth_reading_is_off() {
        let active = PermissionStatus::new(AuthorizationStatus::Authorized, EnablementStatus::Enabled);
        let activity = SystemActivity::derive(active, None);
        assert!(!activity.is_fully_active());
        assert_eq!(activity.blocker(), Some(Blocker::BluetoothOff));
    }

    #[test]
    fn test_blocker_order() {
        let status = PermissionStatus::new(AuthorizationStatus::Unauthorized, EnablementStatus::Disabled);
        assert_eq!(
            SystemActivity::derive(status, Some(false)).blocker(),
            Some(Blocker::NotAuthorized)
        );

        let status = PermissionStatus::new(AuthorizationStatus::Authorized, EnablementStatus::Disabled);
        assert_eq!(
            SystemActivity::derive(status, Some(false)).blocker(),
            Some(Blocker::NotEnabled)
        );
    }

    #[test]
    fn test_code_input_gated_on_enablement() {
        let status = PermissionStatus::new(AuthorizationStatus::Unknown, EnablementStatus::Enabled);
        assert!(ExposureNotificationState::derive(status).can_submit_diagnosis());

        let status = PermissionStatus::new(AuthorizationStatus::Authorized, EnablementStatus::Disabled);
        assert!(!ExposureNotificationState::derive(status).can_submit_diagnosis());
    }
}
