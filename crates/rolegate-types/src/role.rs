//! Project membership roles.

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A membership level within a project.
///
/// Roles are independent keys into the role permission table. There is no
/// inheritance between them: `ADMIN` does not implicitly hold what `MEMBER`
/// holds, each role's grants are listed explicitly. The derived ordering
/// follows declaration order and exists only for deterministic iteration.
///
/// # Example
///
/// ```
/// use rolegate_types::Role;
///
/// let role: Role = "member".parse().unwrap();
/// assert_eq!(role, Role::Member);
/// assert_eq!(role.as_str(), "MEMBER");
/// assert_eq!(Role::ALL.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control, including deleting or transferring the project.
    #[serde(rename = "OWNER")]
    Owner,
    /// Project management without destructive project-level actions.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Day-to-day contributor.
    #[serde(rename = "MEMBER")]
    Member,
    /// Read-only participant.
    #[serde(rename = "VIEWER")]
    Viewer,
    /// Listed as a member but granted nothing.
    #[serde(rename = "NONE")]
    NoAccess,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Owner,
        Role::Admin,
        Role::Member,
        Role::Viewer,
        Role::NoAccess,
    ];

    /// Returns the canonical (serialized) name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
            Self::Viewer => "VIEWER",
            Self::NoAccess => "NONE",
        }
    }

    /// Parses a role name (case-insensitive).
    ///
    /// ```
    /// use rolegate_types::Role;
    ///
    /// assert_eq!(Role::parse("Owner"), Some(Role::Owner));
    /// assert_eq!(Role::parse("none"), Some(Role::NoAccess));
    /// assert_eq!(Role::parse("superuser"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct ParseRoleError(pub String);

impl ErrorCode for ParseRoleError {
    fn code(&self) -> &'static str {
        "ROLE_UNKNOWN"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
