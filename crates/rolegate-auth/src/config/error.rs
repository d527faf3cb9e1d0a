//! Configuration errors.

use crate::TableError;
use rolegate_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a role table file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the table file.
    #[error("failed to read role table '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or not a map of role to scope list.
    #[error("failed to parse role table '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write a table file.
    #[error("failed to write role table '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to render a table as TOML.
    #[error("failed to serialize role table: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file parsed but its contents do not form a valid table.
    #[error("invalid role table '{path}': {source}")]
    InvalidTable {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    /// The table could not be installed process-wide.
    #[error(transparent)]
    Install(TableError),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid table error.
    pub fn invalid_table(path: impl Into<PathBuf>, source: TableError) -> Self {
        Self::InvalidTable {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::WriteFile { .. } => "CONFIG_WRITE_FILE",
            Self::Serialize(_) => "CONFIG_SERIALIZE",
            Self::InvalidTable { .. } => "CONFIG_INVALID_TABLE",
            Self::Install(_) => "CONFIG_INSTALL",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A missing or unreadable file can be fixed and reloaded.
        matches!(
            self,
            Self::ReadFile { .. } | Self::WriteFile { .. } | Self::InvalidEnvVar { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_types::{assert_error_code, Role};

    #[test]
    fn invalid_table_display_names_path_and_cause() {
        let err = ConfigError::invalid_table("/etc/roles.toml", TableError::MissingRole(Role::Viewer));
        let msg = err.to_string();
        assert!(msg.contains("/etc/roles.toml"), "got: {msg}");
        assert!(msg.contains("VIEWER"), "got: {msg}");
        assert_error_code(&err, "CONFIG_");
    }

    #[test]
    fn read_file_is_recoverable() {
        let err = ConfigError::read_file(
            "/missing.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.is_recoverable());
        assert_eq!(err.code(), "CONFIG_READ_FILE");
    }
}
