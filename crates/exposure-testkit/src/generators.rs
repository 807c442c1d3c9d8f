//! Proptest generators for property-based testing.

use proptest::prelude::*;

use exposure_core::{
    AuthorizationStatus, EnablementStatus, ExposureKey, NotificationStatus, PermissionStatus,
    DEFAULT_ROLLING_PERIOD, KEY_DATA_LEN,
};

/// Generate an AuthorizationStatus.
pub fn authorization_status() -> impl Strategy<Value = AuthorizationStatus> {
    prop_oneof![
        Just(AuthorizationStatus::Authorized),
        Just(AuthorizationStatus::Unauthorized),
        Just(AuthorizationStatus::Unknown),
    ]
}

/// Generate an EnablementStatus.
pub fn enablement_status() -> impl Strategy<Value = EnablementStatus> {
    prop_oneof![Just(EnablementStatus::Enabled), Just(EnablementStatus::Disabled)]
}

/// Generate any of the six permission statuses.
pub fn permission_status() -> impl Strategy<Value = PermissionStatus> {
    (authorization_status(), enablement_status())
        .prop_map(|(authorization, enablement)| PermissionStatus::new(authorization, enablement))
}

pub fn notification_status() -> impl Strategy<Value = NotificationStatus> {
    prop_oneof![
        Just(NotificationStatus::Granted),
        Just(NotificationStatus::Denied),
        Just(NotificationStatus::Unknown),
    ]
}

/// Bluetooth reading, including "never read".
pub fn bluetooth_reading() -> impl Strategy<Value = Option<bool>> {
    any::<Option<bool>>()
}

/// Generate a plausible exposure key: a day-aligned start and a period of
/// at most one day.
pub fn exposure_key() -> impl Strategy<Value = ExposureKey> {
    (
        any::<[u8; KEY_DATA_LEN]>(),
        2_600_000u32..2_800_000u32,
        1u32..=DEFAULT_ROLLING_PERIOD,
        0u8..=8u8,
    )
        .prop_map(|(key, interval, period, risk)| {
            let start = interval - interval % DEFAULT_ROLLING_PERIOD;
            ExposureKey::new(key, start, period, risk)
        })
}

/// Generate up to `max_len` keys, as exported for a diagnosis.
pub fn exposure_keys(max_len: usize) -> impl Strategy<Value = Vec<ExposureKey>> {
    prop::collection::vec(exposure_key(), 0..=max_len)
}

/// Generate a list of ISO-style region codes.
pub fn region_codes() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z]{2}", 0..=4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exposure_core::{ExposureNotificationState, SystemActivity};
    use exposure_submit::{tek_hmac, HmacKey};

    proptest! {
        #[test]
        fn test_generated_keys_are_day_aligned(key in exposure_key()) {
            prop_assert_eq!(key.rolling_start_number % DEFAULT_ROLLING_PERIOD, 0);
            prop_assert!(key.rolling_period <= DEFAULT_ROLLING_PERIOD);
        }

        #[test]
        fn test_full_activity_implies_active(
            status in permission_status(),
            bluetooth in bluetooth_reading(),
        ) {
            let activity = SystemActivity::derive(status, bluetooth);
            if activity.is_fully_active() {
                prop_assert!(ExposureNotificationState::derive(status).is_active);
                prop_assert_eq!(bluetooth, Some(true));
            }
        }

        #[test]
        fn test_hmac_ignores_key_order(keys in exposure_keys(8)) {
            let secret = HmacKey::from_bytes(b"secret".to_vec());
            let mut shuffled = keys.clone();
            shuffled.reverse();
            prop_assert_eq!(tek_hmac(&keys, &secret), tek_hmac(&shuffled, &secret));
        }
    }
}
