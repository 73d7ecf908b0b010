//! List command - show entries in a cache folder

use super::resolve_folder;
use crate::cache::{EntryInfo, EntryStore};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::MemoResult;
use console::style;
use tracing::debug;

/// Execute the list command
pub fn execute(args: ListArgs, config: &Config) -> MemoResult<()> {
    let folder = resolve_folder(args.folder, config)?;
    let store = EntryStore::with_extension(&config.cache.extension)?;

    debug!("Listing cache entries in {}", folder.display());
    let entries = store.list(&folder)?;

    match args.format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[EntryInfo]) {
    if entries.is_empty() {
        println!("No cache entries found.");
        return;
    }

    println!("{:<64} {:>10} {:<20}", "KEY", "SIZE", "MODIFIED");
    println!("{}", "-".repeat(96));

    for entry in entries {
        let modified = entry
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<64} {:>10} {:<20}",
            entry.key,
            format_size(entry.size),
            style(modified).dim()
        );
    }

    println!();
    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!("Total: {} entr{} ({})", entries.len(), if entries.len() == 1 { "y" } else { "ies" }, format_size(total));
}

fn print_json(entries: &[EntryInfo]) -> MemoResult<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

fn print_plain(entries: &[EntryInfo]) {
    for entry in entries {
        println!("{}", entry.key);
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
