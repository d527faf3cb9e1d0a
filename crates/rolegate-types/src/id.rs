//! Identifier types.
//!
//! Identifiers are opaque strings issued by the surrounding application
//! (database keys, auth-provider subjects). They are compared verbatim.

use serde::{Deserialize, Serialize};

/// Identifier of a project, the resource boundary roles are scoped to.
///
/// # Example
///
/// ```
/// use rolegate_types::ProjectId;
///
/// let id = ProjectId::new("proj-7");
/// assert_eq!(id.as_str(), "proj-7");
/// assert_eq!(id, ProjectId::from("proj-7"));
/// assert_eq!(format!("{id}"), "project:proj-7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wraps an application-issued project key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "project:{}", self.0)
    }
}

/// Identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an auth-provider subject.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw subject.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_compares_verbatim() {
        assert_eq!(ProjectId::new("a"), ProjectId::from("a".to_string()));
        assert_ne!(ProjectId::new("a"), ProjectId::new("A"));
        assert_ne!(ProjectId::new("a"), ProjectId::new("a "));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&ProjectId::new("p1")).expect("serialize");
        assert_eq!(json, "\"p1\"");

        let user: UserId = serde_json::from_str("\"u-42\"").expect("deserialize");
        assert_eq!(user.as_str(), "u-42");
        assert_eq!(user.to_string(), "user:u-42");
    }
}
