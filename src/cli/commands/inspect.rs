//! Inspect command - locate the entry for a key

use super::resolve_folder;
use crate::cache::{CacheKey, EntryStore};
use crate::cli::args::InspectArgs;
use crate::config::Config;
use crate::error::MemoResult;
use crate::ui;
use chrono::{DateTime, Utc};

/// Execute the inspect command
pub fn execute(args: InspectArgs, config: &Config) -> MemoResult<()> {
    let key = CacheKey::parse(&args.key)?;
    let folder = resolve_folder(args.folder, config)?;
    let store = EntryStore::with_extension(&config.cache.extension)?;
    let path = store.entry_path(&folder, &key);

    ui::key_value("key", key.as_str());
    ui::key_value("path", &path.display().to_string());

    match path.metadata() {
        Ok(md) if md.is_file() => {
            ui::key_value_status("present", "yes", true);
            ui::key_value("size", &format!("{} bytes", md.len()));
            if let Ok(modified) = md.modified() {
                let modified: DateTime<Utc> = modified.into();
                ui::key_value("modified", &modified.format("%Y-%m-%d %H:%M:%S UTC").to_string());
            }
        }
        _ => ui::key_value_status("present", "no", false),
    }

    Ok(())
}
