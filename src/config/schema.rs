//! Configuration schema for memodisk
//!
//! Configuration is stored at `~/.config/memodisk/config.toml`

use crate::cache::DEFAULT_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache settings
    pub cache: CacheConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Folder holding cache entries; unset means resolve from the environment per call
    pub folder: Option<PathBuf>,

    /// Extension of entry files
    pub extension: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            folder: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no -v flag is given: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Log format: "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}
