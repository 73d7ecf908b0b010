//! Config command - show or edit configuration

use crate::cache::normalize_extension;
use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{MemoError, MemoResult};
use crate::ui;
use std::path::PathBuf;

const VALID_KEYS: [&str; 4] = [
    "cache.folder",
    "cache.extension",
    "logging.level",
    "logging.format",
];

/// Execute the config command
///
/// Only `show` needs the file to parse; `path`, `init` and `set` still work on
/// a broken file so it can be repaired.
pub fn execute(args: ConfigArgs, manager: &ConfigManager) -> MemoResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(&manager.load()?)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force)?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value)?,
    }

    Ok(())
}

fn show_config(config: &Config) -> MemoResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

fn init_config(manager: &ConfigManager, force: bool) -> MemoResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default())?;
    ui::step_ok_detail("Configuration initialized", &path.display().to_string());
    Ok(())
}

/// Set a value in the config file itself, leaving environment overrides out
fn set_value(manager: &ConfigManager, key: &str, value: &str) -> MemoResult<()> {
    let mut config = if manager.path().exists() {
        manager.load_from_file(manager.path())?
    } else {
        Config::default()
    };

    if !VALID_KEYS.contains(&key) {
        ui::step_error_detail("Unknown config key", key);
        ui::remark("Valid keys:");
        for key in VALID_KEYS {
            ui::remark(key);
        }
    }
    apply_value(&mut config, key, value)?;

    manager.save(&config)?;
    ui::step_ok(&format!("Set {} = {}", key, value));
    Ok(())
}

fn apply_value(config: &mut Config, key: &str, value: &str) -> MemoResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["cache", "folder"] => {
            config.cache.folder = (!value.is_empty()).then(|| PathBuf::from(value))
        }
        ["cache", "extension"] => config.cache.extension = normalize_extension(value)?,
        ["logging", "level"] => config.logging.level = parse_level(value)?,
        ["logging", "format"] => config.logging.format = parse_format(value)?,
        _ => return Err(MemoError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn parse_level(value: &str) -> MemoResult<String> {
    let level = value.to_lowercase();
    match level.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(level),
        _ => Err(MemoError::User(format!(
            "Invalid log level: {}. Use error/warn/info/debug/trace",
            value
        ))),
    }
}

fn parse_format(value: &str) -> MemoResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(MemoError::User(format!(
            "Invalid log format: {}. Use text/json",
            value
        ))),
    }
}
