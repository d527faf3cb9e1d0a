//! Core vocabulary for rolegate.
//!
//! This crate holds the pure data types that the authorization crate and
//! its callers share. It carries no decision logic.
//!
//! # Crate Architecture
//!
//! ```text
//! rolegate-types  (Role, Scope, ProjectId, ErrorCode)  ◄── HERE
//!       ↑
//! rolegate-auth   (RolePermissionTable, ActorContext, AccessEvaluator)
//!       ↑
//! application     (RPC resolvers, UI state, session retrieval)
//! ```
//!
//! # Example
//!
//! ```
//! use rolegate_types::{ProjectId, Role, Scope};
//!
//! let role: Role = "VIEWER".parse().unwrap();
//! let scope: Scope = "traces:read".parse().unwrap();
//! let project = ProjectId::new("proj-1");
//!
//! assert_eq!(role, Role::Viewer);
//! assert!(scope.is_read());
//! assert_eq!(project.as_str(), "proj-1");
//! ```

mod error;
mod id;
mod role;
mod scope;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ProjectId, UserId};
pub use role::{ParseRoleError, Role};
pub use scope::{ParseScopeError, Scope, READ_SUFFIX};
