//! Role table configuration.
//!
//! The role table is a reviewable artifact in its own right. It can be
//! supplied as a TOML file with one key per role:
//!
//! ```toml
//! OWNER  = ["projects:read", "projects:delete", "traces:read"]
//! ADMIN  = ["projects:read", "traces:read"]
//! MEMBER = ["traces:read"]
//! VIEWER = ["traces:read"]
//! NONE   = []
//! ```
//!
//! # Resolution Order
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  1. Explicit file (TableLoader::with_file)    │
//! ├───────────────────────────────────────────────┤
//! │  2. ROLEGATE_ROLE_TABLE environment variable  │
//! ├───────────────────────────────────────────────┤
//! │  3. Built-in grants (compile-time)            │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The first source present wins; tables are not merged. A configured file
//! that cannot be read is an error rather than a silent fallback.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{save_table, TableLoader};

/// Environment variable naming a role table file.
pub const TABLE_ENV_VAR: &str = "ROLEGATE_ROLE_TABLE";
