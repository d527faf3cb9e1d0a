//! Reason-bearing decision outcome.
//!
//! [`Decision`] records which step of the evaluation chain settled the
//! outcome. It feeds logs and tests; callers that act on a decision only
//! look at [`Decision::is_allowed`], and the failure raised on denial
//! ([`AccessDenied`](crate::AccessDenied)) never carries the reason.

/// Outcome of a single evaluation.
///
/// # Example
///
/// ```
/// use rolegate_auth::Decision;
///
/// assert!(Decision::AdminReadOverride.is_allowed());
/// assert!(Decision::NoMembership.is_denied());
/// assert_eq!(Decision::NotGranted.as_str(), "not_granted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Admin asking for a `:read` scope; the role table was not consulted.
    AdminReadOverride,
    /// The actor's role grants the scope.
    Granted,
    /// No role could be resolved for the actor.
    NoMembership,
    /// The role exists but does not grant the scope.
    NotGranted,
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::AdminReadOverride | Self::Granted)
    }

    #[must_use]
    pub fn is_denied(self) -> bool {
        !self.is_allowed()
    }

    /// Stable snake_case label, used as a log field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdminReadOverride => "admin_read_override",
            Self::Granted => "granted",
            Self::NoMembership => "no_membership",
            Self::NotGranted => "not_granted",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_variants() {
        assert!(Decision::AdminReadOverride.is_allowed());
        assert!(Decision::Granted.is_allowed());
        assert!(!Decision::Granted.is_denied());
    }

    #[test]
    fn denied_variants() {
        assert!(Decision::NoMembership.is_denied());
        assert!(Decision::NotGranted.is_denied());
        assert!(!Decision::NotGranted.is_allowed());
    }

    #[test]
    fn labels() {
        assert_eq!(Decision::AdminReadOverride.to_string(), "admin_read_override");
        assert_eq!(Decision::Granted.as_str(), "granted");
        assert_eq!(Decision::NoMembership.as_str(), "no_membership");
    }
}
