//! Authenticated session shape.
//!
//! The session is produced by an external authentication layer and handed
//! to this crate read-only. Only two things are read from it: the
//! user-level admin flag and the list of project memberships.

use rolegate_types::{ProjectId, Role, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated caller as delivered by the auth layer.
///
/// # Example
///
/// ```
/// use rolegate_auth::Session;
/// use rolegate_types::{ProjectId, Role};
///
/// let session: Session = serde_json::from_str(r#"{
///     "user": { "id": "u1", "admin": false },
///     "projects": [
///         { "id": "p1", "role": "MEMBER" },
///         { "id": "p2", "role": "VIEWER" }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(session.role_in(&ProjectId::new("p2")), Some(Role::Viewer));
/// assert_eq!(session.role_in(&ProjectId::new("p3")), None);
/// assert!(!session.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in user.
    pub user: SessionUser,
    /// Projects the user is a member of.
    #[serde(default)]
    pub projects: Vec<ProjectMembership>,
}

/// User-level attributes of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Auth-provider subject.
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Global (not project-scoped) administrator flag.
    #[serde(default)]
    pub admin: bool,
}

/// A single project membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
    pub id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

impl Session {
    /// Creates a session for a non-admin user with no memberships.
    #[must_use]
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user: SessionUser {
                id: user_id.into(),
                name: None,
                email: None,
                admin: false,
            },
            projects: Vec::new(),
        }
    }

    /// Sets the admin flag.
    #[must_use]
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.user.admin = admin;
        self
    }

    /// Appends a membership.
    #[must_use]
    pub fn with_membership(mut self, project_id: impl Into<ProjectId>, role: Role) -> Self {
        self.projects.push(ProjectMembership {
            id: project_id.into(),
            name: None,
            role,
        });
        self
    }

    /// Returns the user-level admin flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.admin
    }

    /// Returns the role of the first membership whose id matches.
    #[must_use]
    pub fn role_in(&self, project_id: &ProjectId) -> Option<Role> {
        self.projects
            .iter()
            .find(|membership| membership.id == *project_id)
            .map(|membership| membership.role)
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_admin() { "admin" } else { "standard" };
        write!(f, "{}@{}", self.user.id, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_defaults_to_false_when_absent() {
        let session: Session =
            serde_json::from_str(r#"{ "user": { "id": "u1" } }"#).expect("deserialize");
        assert!(!session.is_admin());
        assert!(session.projects.is_empty());
    }

    #[test]
    fn first_matching_membership_wins() {
        let session = Session::new("u1")
            .with_membership("p1", Role::Viewer)
            .with_membership("p1", Role::Owner);

        assert_eq!(session.role_in(&ProjectId::new("p1")), Some(Role::Viewer));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = serde_json::from_str::<Session>(
            r#"{ "user": { "id": "u1" }, "projects": [{ "id": "p1", "role": "ROOT" }] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn display_shows_level() {
        assert_eq!(Session::new("u1").to_string(), "user:u1@standard");
        assert_eq!(
            Session::new("u1").with_admin(true).to_string(),
            "user:u1@admin"
        );
    }
}
