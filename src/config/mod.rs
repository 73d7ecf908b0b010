//! Configuration management for memodisk

pub mod schema;

pub use schema::Config;

use crate::cache::{normalize_extension, CACHE_DIR_ENV};
use crate::error::{MemoError, MemoResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "MEMODISK_LOG_LEVEL";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memodisk")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is missing,
    /// then apply environment overrides
    pub fn load(&self) -> MemoResult<Config> {
        let mut config = if self.config_path.exists() {
            self.load_from_file(&self.config_path)?
        } else {
            debug!("Config file not found, using defaults");
            Config::default()
        };

        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> MemoResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| MemoError::io(format!("reading config from {}", path.display()), e))?;

        let invalid = |reason: String| MemoError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        };

        let mut config: Config = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        config.cache.extension =
            normalize_extension(&config.cache.extension).map_err(|e| invalid(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> MemoResult<()> {
        self.ensure_config_dir()?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).map_err(|e| {
            MemoError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    fn ensure_config_dir(&self) -> MemoResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| MemoError::ConfigDirCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(dir) = env::var_os(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
        debug!("Cache folder from {}", CACHE_DIR_ENV);
        config.cache.folder = Some(PathBuf::from(dir));
    }
    if let Ok(level) = env::var(LOG_LEVEL_ENV) {
        if !level.is_empty() {
            config.logging.level = level.to_lowercase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var(CACHE_DIR_ENV);
        env::remove_var(LOG_LEVEL_ENV);
    }

    #[test]
    #[serial]
    fn load_default_when_missing() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.cache.folder.is_none());
    }

    #[test]
    #[serial]
    fn save_and_load_roundtrip() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.cache.folder = Some(PathBuf::from("/srv/memo"));

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.cache.folder, Some(PathBuf::from("/srv/memo")));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[cache]\nfolder = \"/from/file\"\n").unwrap();

        env::set_var(CACHE_DIR_ENV, "/from/env");
        env::set_var(LOG_LEVEL_ENV, "DEBUG");
        let config = ConfigManager::with_path(path).load();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.cache.folder, Some(PathBuf::from("/from/env")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[cache\n").unwrap();

        let err = ConfigManager::with_path(path.clone())
            .load_from_file(&path)
            .unwrap_err();
        assert!(matches!(err, MemoError::ConfigInvalid { path: ref p, .. } if *p == path));
    }

    #[test]
    fn bad_extension_in_file_is_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path.clone());

        for ext in ["", "tar.gz", "a/b"] {
            fs::write(&path, format!("[cache]\nextension = {:?}\n", ext)).unwrap();
            let err = manager.load_from_file(&path).unwrap_err();
            assert!(matches!(err, MemoError::ConfigInvalid { .. }), "{ext:?}");
        }

        fs::write(&path, "[cache]\nextension = \".memo\"\n").unwrap();
        let config = manager.load_from_file(&path).unwrap();
        assert_eq!(config.cache.extension, "memo");
    }
}
