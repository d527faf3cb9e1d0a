//! Role → scope grants.
//!
//! [`RolePermissionTable`] is plain data: a map from every [`Role`] to the
//! set of [`Scope`]s it grants. It is built once (from the built-in grants
//! or from a configuration file), installed into the process-wide slot,
//! and only read afterwards.
//!
//! # Invariants
//!
//! - Every role in [`Role::ALL`] has an entry, possibly empty.
//! - Every scope in an entry is a catalog member (guaranteed by the type).
//! - The table is never mutated after construction.

use rolegate_types::{ErrorCode, Role, Scope};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Errors raised while building or installing a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// An entry is keyed by a name that is not a role.
    #[error("unknown role '{0}' in role table")]
    UnknownRole(String),

    /// An entry grants a token that is not in the scope catalog.
    #[error("unknown scope '{scope}' granted to role {role}")]
    UnknownScope { role: Role, scope: String },

    /// A role has no entry at all.
    #[error("role table has no entry for role {0}")]
    MissingRole(Role),

    /// A role is keyed more than once, e.g. `VIEWER` and `viewer`.
    #[error("role {0} is listed more than once in role table")]
    DuplicateRole(Role),

    /// The process-wide table was already set.
    #[error("a role table is already installed")]
    AlreadyInstalled,
}

impl ErrorCode for TableError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "TABLE_UNKNOWN_ROLE",
            Self::UnknownScope { .. } => "TABLE_UNKNOWN_SCOPE",
            Self::MissingRole(_) => "TABLE_MISSING_ROLE",
            Self::DuplicateRole(_) => "TABLE_DUPLICATE_ROLE",
            Self::AlreadyInstalled => "TABLE_ALREADY_INSTALLED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

use Scope::*;

/// Read-only view shared by every role that can see project content.
const CONTENT_READ: &[Scope] = &[
    ProjectsRead,
    MembersRead,
    TracesRead,
    ScoresRead,
    PromptsRead,
    DatasetsRead,
    ModelsRead,
    EvalTemplatesRead,
    EvalJobsRead,
];

const CONTRIBUTOR: &[Scope] = &[
    TracesBookmark,
    TracesTag,
    ScoresCud,
    PromptsCud,
    DatasetsCud,
    EvalTemplatesCreate,
    EvalJobsCud,
    LlmApiKeysRead,
];

const MANAGEMENT: &[Scope] = &[
    ProjectsUpdate,
    MembersCreate,
    MembersDelete,
    ApiKeysRead,
    ApiKeysCreate,
    ApiKeysDelete,
    IntegrationsCrud,
    TracesDelete,
    ModelsCud,
    LlmApiKeysCreate,
    LlmApiKeysDelete,
];

const OWNER_ONLY: &[Scope] = &[ProjectsDelete, ProjectsTransfer];

/// Grants compiled into the binary, used when no table file is configured.
const BUILTIN_GRANTS: &[(Role, &[&[Scope]])] = &[
    (
        Role::Owner,
        &[CONTENT_READ, CONTRIBUTOR, MANAGEMENT, OWNER_ONLY],
    ),
    (Role::Admin, &[CONTENT_READ, CONTRIBUTOR, MANAGEMENT]),
    (Role::Member, &[CONTENT_READ, CONTRIBUTOR]),
    (Role::Viewer, &[CONTENT_READ]),
    (Role::NoAccess, &[]),
];

/// Immutable mapping from every role to the scopes it grants.
///
/// # Example
///
/// ```
/// use rolegate_auth::RolePermissionTable;
/// use rolegate_types::{Role, Scope};
///
/// let table = RolePermissionTable::builtin();
/// assert!(table.grants(Role::Member, Scope::TracesRead));
/// assert!(!table.grants(Role::Member, Scope::TracesDelete));
/// assert!(!table.grants(Role::Viewer, Scope::ProjectsDelete));
/// assert_eq!(table.scopes(Role::NoAccess).count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionTable {
    grants: BTreeMap<Role, BTreeSet<Scope>>,
}

impl RolePermissionTable {
    /// The grants compiled into the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_grants(BUILTIN_GRANTS.iter().map(|(role, groups)| {
            (*role, groups.iter().flat_map(|group| group.iter().copied()))
        }))
    }

    /// Builds a table from typed grants.
    ///
    /// Roles that do not appear get an empty entry. A role listed twice
    /// accumulates both lists.
    ///
    /// ```
    /// use rolegate_auth::RolePermissionTable;
    /// use rolegate_types::{Role, Scope};
    ///
    /// let table = RolePermissionTable::from_grants([(Role::Member, [Scope::TracesRead])]);
    /// assert!(table.grants(Role::Member, Scope::TracesRead));
    /// assert_eq!(table.scopes(Role::Owner).count(), 0);
    /// ```
    pub fn from_grants<I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, S)>,
        S: IntoIterator<Item = Scope>,
    {
        let mut table = Self::empty();
        for (role, scopes) in grants {
            table.grants.entry(role).or_default().extend(scopes);
        }
        table
    }

    /// Builds a table from string-keyed entries, as read from configuration.
    ///
    /// Unlike [`from_grants`](Self::from_grants) this is strict: every role
    /// must be listed exactly once (names are case-insensitive, so `VIEWER`
    /// and `viewer` are the same key), and every token must be a catalog
    /// scope. Duplicate tokens within an entry are collapsed.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownRole`], [`TableError::DuplicateRole`],
    /// [`TableError::UnknownScope`] or [`TableError::MissingRole`].
    pub fn from_entries<I, K, V, T>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut grants: BTreeMap<Role, BTreeSet<Scope>> = BTreeMap::new();

        for (name, tokens) in entries {
            let name = name.as_ref();
            let role = Role::parse(name).ok_or_else(|| TableError::UnknownRole(name.to_string()))?;
            if grants.contains_key(&role) {
                return Err(TableError::DuplicateRole(role));
            }
            let entry = grants.entry(role).or_default();

            for token in tokens {
                let token = token.as_ref();
                let scope: Scope = token.parse().map_err(|_| TableError::UnknownScope {
                    role,
                    scope: token.to_string(),
                })?;
                if !entry.insert(scope) {
                    tracing::warn!(role = %role, scope = %scope, "duplicate scope in role table");
                }
            }
        }

        if let Some(missing) = Role::ALL.into_iter().find(|role| !grants.contains_key(role)) {
            return Err(TableError::MissingRole(missing));
        }

        Ok(Self { grants })
    }

    fn empty() -> Self {
        Self {
            grants: Role::ALL
                .into_iter()
                .map(|role| (role, BTreeSet::new()))
                .collect(),
        }
    }

    /// Set-membership test: does `role` grant exactly `scope`?
    #[must_use]
    pub fn grants(&self, role: Role, scope: Scope) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|scopes| scopes.contains(&scope))
    }

    /// Scopes granted to `role`, in catalog order.
    pub fn scopes(&self, role: Role) -> impl Iterator<Item = Scope> + '_ {
        self.grants.get(&role).into_iter().flatten().copied()
    }

    /// Roles that grant `scope`, in role order.
    pub fn roles_granting(&self, scope: Scope) -> impl Iterator<Item = Role> + '_ {
        self.grants
            .iter()
            .filter(move |(_, scopes)| scopes.contains(&scope))
            .map(|(role, _)| *role)
    }

    /// Iterates over every `(role, scopes)` entry.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &BTreeSet<Scope>)> + '_ {
        self.grants.iter().map(|(role, scopes)| (*role, scopes))
    }

    /// Renders the table in the configuration file format.
    ///
    /// # Errors
    ///
    /// Propagates TOML serialization failures.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let doc: BTreeMap<&str, Vec<&str>> = self
            .grants
            .iter()
            .map(|(role, scopes)| (role.as_str(), scopes.iter().map(|s| s.as_str()).collect()))
            .collect();
        toml::to_string(&doc)
    }
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

static GLOBAL_TABLE: OnceLock<Arc<RolePermissionTable>> = OnceLock::new();

/// Installs the process-wide table.
///
/// Must run before the first decision that uses [`global`]; once any table
/// is in place (installed, or defaulted by a call to [`global`]) the slot
/// is frozen.
///
/// # Errors
///
/// [`TableError::AlreadyInstalled`] if the slot is already set.
pub fn install(table: RolePermissionTable) -> Result<(), TableError> {
    GLOBAL_TABLE
        .set(Arc::new(table))
        .map_err(|_| TableError::AlreadyInstalled)?;
    tracing::info!("role table installed");
    Ok(())
}

/// Returns the process-wide table, defaulting to [`RolePermissionTable::builtin`].
pub fn global() -> &'static Arc<RolePermissionTable> {
    GLOBAL_TABLE.get_or_init(|| {
        tracing::debug!("no role table installed, using built-in grants");
        Arc::new(RolePermissionTable::builtin())
    })
}
