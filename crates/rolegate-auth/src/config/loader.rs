//! Role table loader.

use super::{ConfigError, TABLE_ENV_VAR};
use crate::{table, RolePermissionTable};
use std::collections::BTreeMap;
use std::env::VarError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolves and loads the role table.
///
/// # Example
///
/// ```ignore
/// use rolegate_auth::config::TableLoader;
///
/// // At process start, before serving any request:
/// TableLoader::new()
///     .with_file("/etc/rolegate/roles.toml")
///     .load_and_install()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    /// Explicit table file; takes precedence over the environment.
    path: Option<PathBuf>,

    /// Skip environment variable lookup.
    skip_env: bool,
}

impl TableLoader {
    /// Creates a loader that consults the environment, then the built-in grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the table from `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Ignores [`TABLE_ENV_VAR`].
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads the table from the first configured source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the environment variable is malformed, or
    /// the configured file cannot be read, parsed or validated.
    pub fn load(&self) -> Result<RolePermissionTable, ConfigError> {
        match self.resolve_path()? {
            Some(path) => {
                let table = load_file(&path)?;
                info!(path = %path.display(), "loaded role table");
                Ok(table)
            }
            None => {
                debug!("no role table configured, using built-in grants");
                Ok(RolePermissionTable::builtin())
            }
        }
    }

    /// Loads the table and installs it as the process-wide table.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), plus [`ConfigError::Install`] when a
    /// table is already installed.
    pub fn load_and_install(&self) -> Result<(), ConfigError> {
        let table = self.load()?;
        table::install(table).map_err(ConfigError::Install)
    }

    fn resolve_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(ref path) = self.path {
            return Ok(Some(path.clone()));
        }
        if self.skip_env {
            return Ok(None);
        }

        match std::env::var(TABLE_ENV_VAR) {
            Ok(val) if val.trim().is_empty() => {
                Err(ConfigError::invalid_env_var(TABLE_ENV_VAR, "expected a file path"))
            }
            Ok(val) => Ok(Some(PathBuf::from(val))),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                Err(ConfigError::invalid_env_var(TABLE_ENV_VAR, "not valid unicode"))
            }
        }
    }
}

fn load_file(path: &Path) -> Result<RolePermissionTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let entries: BTreeMap<String, Vec<String>> =
        toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

    RolePermissionTable::from_entries(entries).map_err(|e| ConfigError::invalid_table(path, e))
}

/// Writes `table` to `path` in the loader's file format.
///
/// # Errors
///
/// Returns [`ConfigError`] if the table cannot be rendered or written.
pub fn save_table(table: &RolePermissionTable, path: &Path) -> Result<(), ConfigError> {
    let rendered = table.to_toml()?;
    std::fs::write(path, rendered).map_err(|e| ConfigError::write_file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableError;
    use rolegate_types::{Role, Scope};
    use tempfile::TempDir;

    fn write_table(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("roles.toml");
        std::fs::write(&path, content).expect("write table file");
        path
    }

    const COMPLETE: &str = r#"
OWNER = ["projects:read", "projects:delete"]
ADMIN = ["projects:read"]
MEMBER = ["traces:read"]
VIEWER = []
NONE = []
"#;

    #[test]
    fn defaults_to_builtin() {
        let table = TableLoader::new().skip_env_vars().load().expect("load");
        assert_eq!(table, RolePermissionTable::builtin());
    }

    #[test]
    fn loads_explicit_file() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_table(temp.path(), COMPLETE);

        let table = TableLoader::new()
            .with_file(&path)
            .skip_env_vars()
            .load()
            .expect("load");

        assert!(table.grants(Role::Owner, Scope::ProjectsDelete));
        assert!(table.grants(Role::Member, Scope::TracesRead));
        assert!(!table.grants(Role::Member, Scope::TracesDelete));
        assert_eq!(table.scopes(Role::Viewer).count(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let err = TableLoader::new()
            .with_file(temp.path().join("absent.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }), "got: {err}");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_table(temp.path(), "OWNER = \"projects:read\"\n");

        let err = TableLoader::new().with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }), "got: {err}");
    }

    #[test]
    fn unknown_scope_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_table(temp.path(), &COMPLETE.replace("traces:read", "traces:list"));

        let err = TableLoader::new().with_file(&path).load().unwrap_err();
        match err {
            ConfigError::InvalidTable { source, .. } => assert_eq!(
                source,
                TableError::UnknownScope {
                    role: Role::Member,
                    scope: "traces:list".to_string(),
                }
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_role_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_table(temp.path(), &COMPLETE.replace("NONE = []\n", ""));

        let err = TableLoader::new().with_file(&path).load().unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::InvalidTable {
                    source: TableError::MissingRole(Role::NoAccess),
                    ..
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn role_keyed_twice_in_different_case_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let content = format!("{COMPLETE}viewer = [\"traces:delete\"]\n");
        let path = write_table(temp.path(), &content);

        let err = TableLoader::new().with_file(&path).load().unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::InvalidTable {
                    source: TableError::DuplicateRole(Role::Viewer),
                    ..
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn saved_table_loads_back() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("builtin.toml");
        save_table(&RolePermissionTable::builtin(), &path).expect("save");

        let table = TableLoader::new().with_file(&path).load().expect("load");
        assert_eq!(table, RolePermissionTable::builtin());
    }
}
