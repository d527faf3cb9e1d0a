//! The role-table access evaluator.
//!
//! # Decision chain
//!
//! The steps run in order and the first one that settles the outcome wins:
//!
//! | Step | Condition | Outcome |
//! |------|-----------|---------|
//! | 1 | admin flag set and scope ends in `:read` | allow ([`Decision::AdminReadOverride`]) |
//! | 2 | no role resolved for the actor | deny ([`Decision::NoMembership`]) |
//! | 3 | role table grants the scope to the role | allow ([`Decision::Granted`]) |
//! | 4 | otherwise | deny ([`Decision::NotGranted`]) |
//!
//! The admin override covers read scopes only. An admin asking for a
//! write, delete or create scope goes through the role table like anyone
//! else, and is denied without a membership.
//!
//! # Example
//!
//! ```
//! use rolegate_auth::{AccessEvaluator, AccessPolicy, ActorContext};
//! use rolegate_types::{Role, Scope};
//!
//! let evaluator = AccessEvaluator::builtin();
//!
//! let viewer_admin = ActorContext::direct_with_admin(Some(Role::Viewer), true);
//! assert!(evaluator.decide(&viewer_admin, Scope::ProjectsRead));
//! assert!(!evaluator.decide(&viewer_admin, Scope::ProjectsDelete));
//! ```

use crate::provider::AccessWatch;
use crate::{table, AccessPolicy, ActorContext, Decision, RolePermissionTable, SessionState};
use rolegate_types::{ProjectId, Scope};
use std::sync::Arc;
use tokio::sync::watch;

/// [`AccessPolicy`] backed by a [`RolePermissionTable`].
///
/// Cheap to clone; the table is shared and read-only, so evaluators can be
/// used from any number of threads at once.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    table: Arc<RolePermissionTable>,
}

impl AccessEvaluator {
    /// Evaluator over an explicit table.
    #[must_use]
    pub fn new(table: Arc<RolePermissionTable>) -> Self {
        Self { table }
    }

    /// Evaluator over the process-wide table (see [`table::global`]).
    #[must_use]
    pub fn global() -> Self {
        Self::new(Arc::clone(table::global()))
    }

    /// Evaluator over the built-in grants, ignoring the process-wide slot.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Arc::new(RolePermissionTable::builtin()))
    }

    #[must_use]
    pub fn table(&self) -> &RolePermissionTable {
        &self.table
    }

    /// Starts watching the decision for `(project_id, scope)` as the
    /// session behind `rx` changes.
    #[must_use]
    pub fn watch_access(
        &self,
        rx: watch::Receiver<SessionState>,
        project_id: ProjectId,
        scope: Scope,
    ) -> AccessWatch {
        AccessWatch::new(self.clone(), rx, project_id, scope)
    }
}

impl AccessPolicy for AccessEvaluator {
    fn evaluate(&self, actor: &ActorContext<'_>, scope: Scope) -> Decision {
        let admin = actor.is_admin();

        let decision = if admin && scope.is_read() {
            Decision::AdminReadOverride
        } else {
            match actor.role() {
                None => Decision::NoMembership,
                Some(role) if self.table.grants(role, scope) => Decision::Granted,
                Some(_) => Decision::NotGranted,
            }
        };

        tracing::debug!(
            scope = %scope,
            admin = admin,
            decision = %decision,
            "access evaluated"
        );

        decision
    }
}

impl From<RolePermissionTable> for AccessEvaluator {
    fn from(table: RolePermissionTable) -> Self {
        Self::new(Arc::new(table))
    }
}
