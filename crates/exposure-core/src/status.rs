//! Permission statuses as reported by the native layer.
//!
//! The native bridge reports exposure-notification status as a pair of
//! upper-case strings, e.g. `["AUTHORIZED", "ENABLED"]`. These types keep the
//! same spelling on the wire and in `FromStr`/`Display`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether the OS has granted the app use of the exposure-notification
/// framework. Written only by the native capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationStatus {
    Authorized,
    Unauthorized,
    /// The OS has not been queried yet, or the query failed.
    ///
    /// Distinct from an explicit denial.
    Unknown,
}

/// Whether exposure notifications are switched on at the OS level,
/// independent of app authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnablementStatus {
    Enabled,
    Disabled,
}

/// Status of the user-facing notification permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Granted,
    Denied,
    #[default]
    Unknown,
}

/// The (authorization, enablement) pair for exposure notifications.
///
/// Both halves are always populated. Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(AuthorizationStatus, EnablementStatus)",
    into = "(AuthorizationStatus, EnablementStatus)"
)]
pub struct PermissionStatus {
    pub authorization: AuthorizationStatus,
    pub enablement: EnablementStatus,
}

impl PermissionStatus {
    /// Status before the first query, and the status a failed native call
    /// collapses to.
    pub const UNRESOLVED: Self = Self {
        authorization: AuthorizationStatus::Unknown,
        enablement: EnablementStatus::Disabled,
    };

    pub const fn new(authorization: AuthorizationStatus, enablement: EnablementStatus) -> Self {
        Self {
            authorization,
            enablement,
        }
    }
}

impl Default for PermissionStatus {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

impl From<(AuthorizationStatus, EnablementStatus)> for PermissionStatus {
    fn from((authorization, enablement): (AuthorizationStatus, EnablementStatus)) -> Self {
        Self::new(authorization, enablement)
    }
}

impl From<PermissionStatus> for (AuthorizationStatus, EnablementStatus) {
    fn from(status: PermissionStatus) -> Self {
        (status.authorization, status.enablement)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.authorization, self.enablement)
    }
}

impl AuthorizationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::Authorized => "AUTHORIZED",
            AuthorizationStatus::Unauthorized => "UNAUTHORIZED",
            AuthorizationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl EnablementStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EnablementStatus::Enabled => "ENABLED",
            EnablementStatus::Disabled => "DISABLED",
        }
    }
}

impl NotificationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Granted => "GRANTED",
            NotificationStatus::Denied => "DENIED",
            NotificationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for AuthorizationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTHORIZED" => Ok(AuthorizationStatus::Authorized),
            "UNAUTHORIZED" => Ok(AuthorizationStatus::Unauthorized),
            "UNKNOWN" => Ok(AuthorizationStatus::Unknown),
            other => Err(CoreError::InvalidAuthorization(other.to_string())),
        }
    }
}

impl FromStr for EnablementStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENABLED" => Ok(EnablementStatus::Enabled),
            "DISABLED" => Ok(EnablementStatus::Disabled),
            other => Err(CoreError::InvalidEnablement(other.to_string())),
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GRANTED" => Ok(NotificationStatus::Granted),
            "DENIED" => Ok(NotificationStatus::Denied),
            "UNKNOWN" => Ok(NotificationStatus::Unknown),
            other => Err(CoreError::InvalidNotification(other.to_string())),
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EnablementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_native_pair() {
        let status = PermissionStatus::new(
            AuthorizationStatus::Authorized,
            EnablementStatus::Enabled,
        );
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"["AUTHORIZED","ENABLED"]"#);

        let parsed: PermissionStatus = serde_json::from_str(r#"["UNAUTHORIZED","DISABLED"]"#).unwrap();
        assert_eq!(parsed.authorization, AuthorizationStatus::Unauthorized);
        assert_eq!(parsed.enablement, EnablementStatus::Disabled);
    }

    #[test]
    fn test_default_is_unresolved() {
        let status = PermissionStatus::default();
        assert_eq!(status.authorization, AuthorizationStatus::Unknown);
        assert_eq!(status.enablement, EnablementStatus::Disabled);
        assert_eq!(NotificationStatus::default(), NotificationStatus::Unknown);
    }

    #[test]
    fn test_from_str_matches_display() {
        for auth in [
            AuthorizationStatus::Authorized,
            AuthorizationStatus::Unauthorized,
            AuthorizationStatus::Unknown,
        ] {
            assert_eq!(auth.to_string().parse::<AuthorizationStatus>().unwrap(), auth);
        }
        for enablement in [EnablementStatus::Enabled, EnablementStatus::Disabled] {
            assert_eq!(
                enablement.to_string().parse::<EnablementStatus>().unwrap(),
                enablement
            );
        }
    }

    #[test]
    fn test_from_str_rejects_lowercase() {
        assert_eq!(
            "authorized".parse::<AuthorizationStatus>(),
            Err(CoreError::InvalidAuthorization("authorized".into()))
        );
        assert!("granted".parse::<NotificationStatus>().is_err());
    }
}
