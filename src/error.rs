//! Error types for inventory-lint
//!
//! Errors are split by the stage that raises them. Rule and configuration
//! errors abort a run before any inventory is read; inventory errors are
//! scoped to a single file and never stop a batch.

use std::path::PathBuf;

/// Configuration-file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or shape error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule loading errors
///
/// Any of these makes the whole rule set untrustworthy, so loading stops at
/// the first one.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Pattern failed to compile
    #[error("Regex passed is invalid! \"{pattern}\" for rule {rule}: {message}")]
    InvalidRegex {
        rule: String,
        pattern: String,
        message: String,
    },

    /// Declaration file is malformed
    #[error("Invalid rule declaration {path}: {message}")]
    InvalidDeclaration { path: PathBuf, message: String },

    /// Declaration lives in a directory that names no known scope
    #[error("Unknown rule scope '{scope}' for {path}")]
    UnknownScope { scope: String, path: PathBuf },

    /// Two declarations share a number
    #[error("Duplicate rule number {number} in {path}")]
    DuplicateNumber { number: String, path: PathBuf },

    /// A declaration claimed the number of the default host rule
    #[error("Rule number 000 is reserved for the default host rule ({path})")]
    ReservedNumber { path: PathBuf },

    /// Failed to read a rule directory or declaration
    #[error("Failed to read rules from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors scoped to a single inventory file
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The path does not exist
    #[error("No such file as {}", path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The path exists but could not be read as text
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl InventoryError {
    /// Classify an I/O error raised while reading `path`
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            InventoryError::NotFound { path, source }
        } else {
            InventoryError::Read { path, source }
        }
    }

    /// Path of the inventory that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            InventoryError::NotFound { path, .. } | InventoryError::Read { path, .. } => path,
        }
    }
}

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// File discovery error
    #[error("File walker error: {0}")]
    FileWalker(#[from] crate::engine::file_walker::FileWalkerError),
}
