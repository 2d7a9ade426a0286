//! Error types and exit codes for taskvault.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_QUERY: i32 = 2;
    pub const VAULT_NOT_FOUND: i32 = 3;
}

/// Main error type for taskvault operations.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A file the caller asked about could not be stat'ed or read.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filter input was rejected before any task was scanned.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl TaskError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TaskError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TaskError::InvalidQuery(_) => ExitCode::InvalidQuery,
            TaskError::VaultNotFound(_) => ExitCode::VaultNotFound,
            _ => ExitCode::GeneralError,
        }
    }
}

/// Result type alias for taskvault operations.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    InvalidQuery,
    VaultNotFound,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::InvalidQuery => exit_code::INVALID_QUERY,
            ExitCode::VaultNotFound => exit_code::VAULT_NOT_FOUND,
        }
    }
}
