//! Project-scoped authorization decisions for rolegate.
//!
//! Given who is asking (an [`ActorContext`]) and what they want to do (a
//! [`Scope`]), decide allow or deny.
//!
//! # Decision Model
//!
//! ```text
//! allowed = (admin ∧ scope is :read) ∨ RolePermissionTable[role].contains(scope)
//! ```
//!
//! where `role` is the actor's role in the target project, and a missing
//! role denies everything the admin override does not cover.
//!
//! | Item | Role |
//! |------|------|
//! | [`RolePermissionTable`] | Static role → scope grants, configured once |
//! | [`ActorContext`] | Direct role, or role looked up in a [`Session`] |
//! | [`AccessPolicy`] | `decide` / `ensure_access` / `use_has_access` |
//! | [`AccessEvaluator`] | The table-backed policy |
//! | [`SessionHandle`] / [`AccessWatch`] | Session-provider boundary for UI state |
//!
//! # Failure
//!
//! Decisions are booleans and never fail. Only
//! [`ensure_access`](AccessPolicy::ensure_access) raises, and always the
//! same [`AccessDenied::Unauthorized`], whatever the reason for denial.
//!
//! # Example
//!
//! ```
//! use rolegate_auth::{ensure_access, has_access, ActorContext, Session};
//! use rolegate_types::{ProjectId, Role, Scope};
//!
//! let session = Session::new("u1").with_membership("p1", Role::Member);
//! let project = ProjectId::new("p1");
//! let actor = ActorContext::from_session(Some(&session), &project);
//!
//! assert!(has_access(&actor, Scope::PromptsCud));
//! assert!(ensure_access(&actor, Scope::ProjectsDelete).is_err());
//! ```

mod actor;
pub mod config;
mod decision;
mod error;
mod evaluator;
mod policy;
mod provider;
mod session;
pub mod table;

pub use actor::ActorContext;
pub use decision::Decision;
pub use error::{AccessDenied, UNAUTHORIZED_MESSAGE};
pub use evaluator::AccessEvaluator;
pub use policy::AccessPolicy;
pub use provider::{AccessWatch, SessionHandle, SessionProvider, SessionState};
pub use session::{ProjectMembership, Session, SessionUser};
pub use table::{RolePermissionTable, TableError};

pub use rolegate_types::{ProjectId, Role, Scope};

/// [`AccessPolicy::decide`] against the process-wide table.
#[must_use]
pub fn has_access(actor: &ActorContext<'_>, scope: Scope) -> bool {
    AccessEvaluator::global().decide(actor, scope)
}

/// [`AccessPolicy::ensure_access`] against the process-wide table.
///
/// # Errors
///
/// [`AccessDenied::Unauthorized`] when [`has_access`] is `false`.
pub fn ensure_access(actor: &ActorContext<'_>, scope: Scope) -> Result<(), AccessDenied> {
    AccessEvaluator::global().ensure_access(actor, scope)
}

/// [`AccessPolicy::use_has_access`] against the process-wide table.
#[must_use]
pub fn use_has_access(provider: &dyn SessionProvider, project_id: &ProjectId, scope: Scope) -> bool {
    AccessEvaluator::global().use_has_access(provider, project_id, scope)
}
