//! Machine-readable error codes.
//!
//! Every rolegate error type implements [`ErrorCode`] so transport layers
//! (RPC resolvers, HTTP handlers) can map failures to protocol responses
//! without matching on concrete types.
//!
//! # Example
//!
//! ```
//! use rolegate_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     NotFound,
//!     Timeout,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound => "LOOKUP_NOT_FOUND",
//!             Self::Timeout => "LOOKUP_TIMEOUT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! assert_eq!(LookupError::Timeout.code(), "LOOKUP_TIMEOUT");
//! assert!(!LookupError::NotFound.is_recoverable());
//! ```

/// Unified error code interface for rolegate errors.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"UNAUTHORIZED"`, `"TABLE_UNKNOWN_SCOPE"`
/// - **Stable**: codes are part of the API contract once published
///
/// # Recoverability
///
/// An error is recoverable when retrying, or a user action, may succeed.
/// Authorization denials are never recoverable by retry.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the naming conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use rolegate_types::{assert_error_code, ErrorCode};
///
/// struct Expired;
///
/// impl ErrorCode for Expired {
///     fn code(&self) -> &'static str { "SESSION_EXPIRED" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Expired, "SESSION_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Asserts every error in `errors` with [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
