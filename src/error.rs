//! Error types for memodisk
//!
//! All modules use `MemoResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for memodisk operations
pub type MemoResult<T> = Result<T, MemoError>;

/// All errors that can occur in memodisk
#[derive(Error, Debug)]
pub enum MemoError {
    // Key derivation errors
    #[error("Source text unavailable for {function}; cannot derive a cache key")]
    SourceUnavailable { function: String },

    #[error("Invalid cache key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    // Storage errors
    #[error("Cache folder not set. Pass a folder explicitly or set MEMODISK_CACHE_DIR")]
    FolderUnresolved,

    #[error("Invalid entry extension {extension:?}: {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("Serialization failed for {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors outside the entry format
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl MemoError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a serialization error for an entry path
    pub fn serialization(path: impl Into<PathBuf>, source: bincode::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }

    /// Value could not be converted to or from the entry format
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Cache folder missing, unreadable or not writable
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::FolderUnresolved)
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::FolderUnresolved => Some("Run: memodisk config set cache.folder <dir>"),
            Self::SourceUnavailable { .. } => {
                Some("Build the identity with FnIdentity::new or the cacheable! macro")
            }
            Self::ConfigInvalid { .. } => Some("Run: memodisk config init --force"),
            _ => None,
        }
    }
}
