//! Decision input.

use crate::Session;
use rolegate_types::{ProjectId, Role};

/// Who is asking, resolved to the two facts a decision needs: a role in
/// the target project and the global admin flag.
///
/// The two shapes are mutually exclusive:
///
/// | Variant | Role from | Admin from |
/// |---------|-----------|------------|
/// | `Direct` | supplied by the caller | supplied by the caller |
/// | `SessionDerived` | first membership matching `project_id` | `session.user.admin` |
///
/// The session is borrowed; the evaluator never keeps or modifies it.
///
/// # Example
///
/// ```
/// use rolegate_auth::{ActorContext, Session};
/// use rolegate_types::{ProjectId, Role};
///
/// let direct = ActorContext::direct(Role::Member);
/// assert_eq!(direct.role(), Some(Role::Member));
/// assert!(!direct.is_admin());
///
/// let session = Session::new("u1").with_admin(true).with_membership("p1", Role::Viewer);
/// let project = ProjectId::new("p1");
/// let derived = ActorContext::from_session(Some(&session), &project);
/// assert_eq!(derived.role(), Some(Role::Viewer));
/// assert!(derived.is_admin());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorContext<'a> {
    /// Role already known to the caller (e.g. a resolver that loaded the
    /// membership itself).
    Direct {
        role: Option<Role>,
        admin: bool,
    },

    /// Role looked up in the caller's session for `project_id`.
    SessionDerived {
        session: Option<&'a Session>,
        project_id: &'a ProjectId,
    },
}

impl<'a> ActorContext<'a> {
    /// Direct actor holding `role`, not an admin.
    #[must_use]
    pub fn direct(role: Role) -> Self {
        Self::Direct {
            role: Some(role),
            admin: false,
        }
    }

    /// Direct actor with an explicit admin flag and optional role.
    #[must_use]
    pub fn direct_with_admin(role: Option<Role>, admin: bool) -> Self {
        Self::Direct { role, admin }
    }

    /// Session-derived actor. `session` is `None` when nobody is signed in.
    #[must_use]
    pub fn from_session(session: Option<&'a Session>, project_id: &'a ProjectId) -> Self {
        Self::SessionDerived {
            session,
            project_id,
        }
    }

    /// Global admin flag. Absent session means not an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Direct { admin, .. } => *admin,
            Self::SessionDerived { session, .. } => session.is_some_and(Session::is_admin),
        }
    }

    /// Role in the target project, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Direct { role, .. } => *role,
            Self::SessionDerived {
                session,
                project_id,
            } => session.and_then(|session| session.role_in(project_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_without_role() {
        let actor = ActorContext::direct_with_admin(None, true);
        assert_eq!(actor.role(), None);
        assert!(actor.is_admin());
    }

    #[test]
    fn missing_session_has_no_role_and_no_admin() {
        let project = ProjectId::new("p1");
        let actor = ActorContext::from_session(None, &project);
        assert_eq!(actor.role(), None);
        assert!(!actor.is_admin());
    }

    #[test]
    fn session_without_matching_membership() {
        let session = Session::new("u1")
            .with_admin(true)
            .with_membership("p2", Role::Owner);
        let project = ProjectId::new("p1");
        let actor = ActorContext::from_session(Some(&session), &project);

        assert_eq!(actor.role(), None);
        assert!(actor.is_admin());
    }
}
