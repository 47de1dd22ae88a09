//! Account roles consulted by authorisation checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attached to every account.
///
/// Stored as lower-case text (`standard` or `admin`) both in the `users`
/// table and in the session cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account; sees only its own reports.
    #[default]
    Standard,
    /// Administrator; sees every report and the user directory.
    Admin,
}

impl Role {
    /// Text form persisted to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Admin => "admin",
        }
    }

    /// Whether this role grants administrator access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when stored role text is neither `standard` nor `admin`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Standard, "standard")]
    #[case(Role::Admin, "admin")]
    fn text_form_parses_back(#[case] role: Role, #[case] text: &str) {
        assert_eq!(role.as_str(), text);
        assert_eq!(text.parse::<Role>(), Ok(role));
    }

    #[rstest]
    #[case("Admin")]
    #[case("user")]
    #[case("")]
    fn rejects_unknown_text(#[case] text: &str) {
        assert_eq!(text.parse::<Role>(), Err(UnknownRole(text.to_owned())));
    }

    #[rstest]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Standard.is_admin());
        assert_eq!(Role::default(), Role::Standard);
    }
}
