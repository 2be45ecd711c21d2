//! Error types for covmap operations.
//!
//! The coverage core is fail-soft and has no error type of its own: bad rows
//! are dropped and counted. Errors only arise at the edges, when reading
//! and writing configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for covmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// TOML parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Wrap an I/O error with a message and path
    pub fn io_at(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Path associated with the error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FileSystem { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
