//! Authorization failure.
//!
//! [`AccessDenied`] is the only failure an access check produces. Every
//! reason for denial (no session, no membership in the project, a role
//! that lacks the scope) collapses into the same variant so that callers
//! cannot learn anything about membership from the error.

use rolegate_types::ErrorCode;
use thiserror::Error;

/// Fixed, client-visible message carried by [`AccessDenied::Unauthorized`].
pub const UNAUTHORIZED_MESSAGE: &str =
    "Unauthorized, user does not have access to this resource or action";

/// Raised by [`AccessEvaluator::ensure_access`](crate::AccessEvaluator::ensure_access)
/// when the decision is a denial.
///
/// Transport layers translate this into their own rejection
/// (`UNAUTHORIZED` RPC code, HTTP 401) without adding detail.
///
/// # Example
///
/// ```
/// use rolegate_auth::{AccessDenied, UNAUTHORIZED_MESSAGE};
/// use rolegate_types::ErrorCode;
///
/// let err = AccessDenied::Unauthorized;
/// assert_eq!(err.code(), "UNAUTHORIZED");
/// assert_eq!(err.http_status(), 401);
/// assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The actor's role (or lack of one) does not grant the scope.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,
}

impl AccessDenied {
    /// HTTP status a transport layer should answer with.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_fixed() {
        assert_eq!(AccessDenied::Unauthorized.to_string(), UNAUTHORIZED_MESSAGE);
    }

    #[test]
    fn code_and_status() {
        let err = AccessDenied::Unauthorized;
        assert_eq!(err.code(), "UNAUTHORIZED");
        assert!(!err.is_recoverable());
        assert_eq!(err.http_status(), 401);
    }
}
