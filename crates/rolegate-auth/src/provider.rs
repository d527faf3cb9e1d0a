//! Session retrieval boundary.
//!
//! Session retrieval is asynchronous and owned by the application. This
//! module models its result as an explicit three-state input:
//!
//! ```text
//! Unresolved              ─► decision is false (fail closed)
//! Resolved(None)          ─► evaluated: no session, so false
//! Resolved(Some(session)) ─► evaluated against the session
//! ```
//!
//! [`SessionHandle`] is a ready-made provider backed by a
//! [`tokio::sync::watch`] channel, and [`AccessWatch`] recomputes a
//! decision every time the handle publishes a new state.

use crate::{AccessEvaluator, AccessPolicy, Session};
use rolegate_types::{ProjectId, Scope};
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of the caller's session as seen by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Retrieval has not finished.
    #[default]
    Unresolved,
    /// Retrieval finished; `None` means nobody is signed in.
    Resolved(Option<Arc<Session>>),
}

impl SessionState {
    /// Resolved state carrying `session`.
    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        Self::Resolved(Some(Arc::new(session)))
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The session, if resolved and signed in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(session) => session.as_deref(),
        }
    }
}

/// Source of the caller's current session.
pub trait SessionProvider: Send + Sync {
    /// Returns the latest state without blocking.
    fn session_state(&self) -> SessionState;
}

impl SessionProvider for SessionState {
    fn session_state(&self) -> SessionState {
        self.clone()
    }
}

/// Publishes session state to any number of watchers.
///
/// Starts [`Unresolved`](SessionState::Unresolved). The auth layer calls
/// [`resolve`](Self::resolve) once retrieval finishes, and again whenever
/// the session changes.
///
/// # Example
///
/// ```
/// use rolegate_auth::{AccessEvaluator, AccessPolicy, Session, SessionHandle};
/// use rolegate_types::{ProjectId, Role, Scope};
///
/// let evaluator = AccessEvaluator::builtin();
/// let handle = SessionHandle::new();
/// let project = ProjectId::new("p1");
///
/// // Still loading: fail closed.
/// assert!(!evaluator.use_has_access(&handle, &project, Scope::TracesRead));
///
/// handle.resolve(Some(Session::new("u1").with_membership("p1", Role::Viewer)));
/// assert!(evaluator.use_has_access(&handle, &project, Scope::TracesRead));
/// ```
#[derive(Debug)]
pub struct SessionHandle {
    tx: watch::Sender<SessionState>,
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Unresolved);
        Self { tx }
    }

    /// Publishes the outcome of session retrieval.
    pub fn resolve(&self, session: Option<Session>) {
        tracing::debug!(signed_in = session.is_some(), "session resolved");
        self.tx
            .send_replace(SessionState::Resolved(session.map(Arc::new)));
    }

    /// Publishes a signed-out state.
    pub fn sign_out(&self) {
        self.resolve(None);
    }

    /// Returns to the unresolved state, e.g. while a session is refreshed.
    pub fn invalidate(&self) {
        self.tx.send_replace(SessionState::Unresolved);
    }

    /// New receiver positioned at the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for SessionHandle {
    fn session_state(&self) -> SessionState {
        self.tx.borrow().clone()
    }
}

/// Reactive decision for one `(project, scope)` pair.
///
/// Created by [`AccessEvaluator::watch_access`].
#[derive(Debug)]
pub struct AccessWatch {
    evaluator: AccessEvaluator,
    rx: watch::Receiver<SessionState>,
    project_id: ProjectId,
    scope: Scope,
}

impl AccessWatch {
    pub(crate) fn new(
        evaluator: AccessEvaluator,
        rx: watch::Receiver<SessionState>,
        project_id: ProjectId,
        scope: Scope,
    ) -> Self {
        Self {
            evaluator,
            rx,
            project_id,
            scope,
        }
    }

    /// Decision for the latest published state.
    #[must_use]
    pub fn current(&self) -> bool {
        let state = self.rx.borrow().clone();
        self.evaluator
            .decide_for_state(&state, &self.project_id, self.scope)
    }

    /// Waits for the next published state and returns the new decision.
    ///
    /// Returns `None` once the [`SessionHandle`] is dropped.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_types::Role;

    #[test]
    fn default_state_is_unresolved() {
        let state = SessionState::default();
        assert!(!state.is_resolved());
        assert!(state.session().is_none());
    }

    #[test]
    fn handle_transitions() {
        let handle = SessionHandle::new();
        assert_eq!(handle.session_state(), SessionState::Unresolved);

        handle.resolve(Some(Session::new("u1")));
        assert_eq!(
            handle.session_state().session().map(|s| s.user.id.as_str()),
            Some("u1")
        );

        handle.sign_out();
        assert_eq!(handle.session_state(), SessionState::Resolved(None));

        handle.invalidate();
        assert_eq!(handle.session_state(), SessionState::Unresolved);
    }

    #[test]
    fn resolve_without_subscribers_is_kept() {
        let handle = SessionHandle::new();
        handle.resolve(Some(Session::new("u1").with_membership("p1", Role::Member)));
        let rx = handle.subscribe();
        assert!(rx.borrow().is_resolved());
    }

    #[test]
    fn watch_current_reflects_latest_state() {
        let handle = SessionHandle::new();
        let watch = AccessEvaluator::builtin().watch_access(
            handle.subscribe(),
            ProjectId::new("p1"),
            Scope::PromptsCud,
        );
        assert!(!watch.current());

        handle.resolve(Some(Session::new("u1").with_membership("p1", Role::Member)));
        assert!(watch.current());
        assert_eq!(watch.scope(), Scope::PromptsCud);
        assert_eq!(watch.project_id().as_str(), "p1");
    }
}
