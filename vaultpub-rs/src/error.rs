//! Error types and exit codes for vaultpub.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const VAULT_NOT_FOUND: i32 = 3;
    pub const QUERY_UNAVAILABLE: i32 = 4;
    pub const INVALID_FRONTMATTER: i32 = 5;
    pub const WRITE_FAILED: i32 = 6;
}

/// Main error type for vaultpub operations.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Note index unavailable: {0}")]
    QueryUnavailable(String),

    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Failed to write {destination}: {message}")]
    WriteFailed { destination: String, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl PublishError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishError::NoteNotFound(_) => exit_code::NOTE_NOT_FOUND,
            PublishError::VaultNotFound(_) => exit_code::VAULT_NOT_FOUND,
            PublishError::QueryUnavailable(_) => exit_code::QUERY_UNAVAILABLE,
            PublishError::InvalidFrontmatter { .. } => exit_code::INVALID_FRONTMATTER,
            PublishError::WriteFailed { .. } => exit_code::WRITE_FAILED,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultpub operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    WriteFailed,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::WriteFailed => exit_code::WRITE_FAILED,
        }
    }
}
