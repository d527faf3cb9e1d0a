//! Access policy trait.
//!
//! [`AccessPolicy`] is the seam callers program against. Implementors
//! supply only [`evaluate`](AccessPolicy::evaluate); the boolean predicate,
//! the raising guard and the session-provider wrapper are provided on top
//! of it so that every policy turns denial into failure the same way.
//!
//! ```text
//! evaluate(actor, scope) -> Decision        (implementor)
//!     ├── decide()          -> bool         (pure predicate)
//!     │     └── ensure_access() -> Result   (the only place denial becomes an error)
//!     └── use_has_access()  -> bool         (Unresolved session ⇒ false)
//! ```

use crate::{AccessDenied, ActorContext, Decision, SessionProvider, SessionState};
use rolegate_types::{ProjectId, Scope};

/// Abstract project-scoped access policy.
///
/// # Example
///
/// ```
/// use rolegate_auth::{AccessPolicy, ActorContext, Decision};
/// use rolegate_types::{Role, Scope};
///
/// /// Lets owners do anything, nobody else anything.
/// struct OwnersOnly;
///
/// impl AccessPolicy for OwnersOnly {
///     fn evaluate(&self, actor: &ActorContext<'_>, _scope: Scope) -> Decision {
///         match actor.role() {
///             Some(Role::Owner) => Decision::Granted,
///             Some(_) => Decision::NotGranted,
///             None => Decision::NoMembership,
///         }
///     }
/// }
///
/// let policy = OwnersOnly;
/// assert!(policy.decide(&ActorContext::direct(Role::Owner), Scope::ProjectsDelete));
/// assert!(policy.ensure_access(&ActorContext::direct(Role::Admin), Scope::TracesRead).is_err());
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Runs the decision chain and reports which step settled it.
    fn evaluate(&self, actor: &ActorContext<'_>, scope: Scope) -> Decision;

    /// Pure predicate. Never fails: missing role or session is `false`.
    fn decide(&self, actor: &ActorContext<'_>, scope: Scope) -> bool {
        self.evaluate(actor, scope).is_allowed()
    }

    /// Guard for imperative call sites.
    ///
    /// # Errors
    ///
    /// [`AccessDenied::Unauthorized`] exactly when [`decide`](Self::decide)
    /// is `false`.
    fn ensure_access(&self, actor: &ActorContext<'_>, scope: Scope) -> Result<(), AccessDenied> {
        if self.decide(actor, scope) {
            Ok(())
        } else {
            tracing::warn!(scope = %scope, "access denied");
            Err(AccessDenied::Unauthorized)
        }
    }

    /// Decision for UI contexts, reading the caller's session from
    /// `provider`. While the session is unresolved this is `false`.
    fn use_has_access(
        &self,
        provider: &dyn SessionProvider,
        project_id: &ProjectId,
        scope: Scope,
    ) -> bool {
        self.decide_for_state(&provider.session_state(), project_id, scope)
    }

    /// Same as [`use_has_access`](Self::use_has_access) for a state
    /// snapshot already in hand.
    fn decide_for_state(&self, state: &SessionState, project_id: &ProjectId, scope: Scope) -> bool {
        match state {
            SessionState::Unresolved => false,
            SessionState::Resolved(session) => {
                let actor = ActorContext::from_session(session.as_deref(), project_id);
                self.decide(&actor, scope)
            }
        }
    }
}
