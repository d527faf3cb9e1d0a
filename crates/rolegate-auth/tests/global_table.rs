//! Process-wide table installation from the environment.
//!
//! Kept in its own test binary: the table slot and the environment are
//! process-global.

use rolegate_auth::config::{ConfigError, TableLoader, TABLE_ENV_VAR};
use rolegate_auth::{
    ensure_access, has_access, table, use_has_access, ActorContext, RolePermissionTable, Session,
    SessionState, TableError,
};
use rolegate_types::{ProjectId, Role, Scope};

#[test]
fn env_configured_table_is_installed_once() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let path = temp.path().join("roles.toml");
    std::fs::write(
        &path,
        r#"
OWNER = ["projects:delete"]
ADMIN = []
MEMBER = []
VIEWER = ["traces:delete"]
NONE = []
"#,
    )
    .expect("write table");

    std::env::set_var(TABLE_ENV_VAR, &path);
    TableLoader::new().load_and_install().expect("install");
    std::env::remove_var(TABLE_ENV_VAR);

    // Viewer gets a write scope it lacks in the built-in table.
    let viewer = ActorContext::direct(Role::Viewer);
    assert!(has_access(&viewer, Scope::TracesDelete));
    assert!(ensure_access(&viewer, Scope::TracesRead).is_err());

    // The provider wrapper reads the same installed table.
    let project = ProjectId::new("p1");
    assert!(!use_has_access(&SessionState::Unresolved, &project, Scope::TracesDelete));
    let signed_in =
        SessionState::signed_in(Session::new("u1").with_membership("p1", Role::Viewer));
    assert!(use_has_access(&signed_in, &project, Scope::TracesDelete));
    assert!(!use_has_access(&signed_in, &project, Scope::TracesRead));
    assert!(!use_has_access(&SessionState::Resolved(None), &project, Scope::TracesDelete));

    let err = table::install(RolePermissionTable::builtin()).unwrap_err();
    assert_eq!(err, TableError::AlreadyInstalled);

    let err = TableLoader::new()
        .skip_env_vars()
        .load_and_install()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Install(TableError::AlreadyInstalled)));
}
