//! CLI command implementations

pub mod config;
pub mod inspect;
pub mod key;
pub mod list;

pub use config::execute as config;
pub use inspect::execute as inspect;
pub use key::execute as key;
pub use list::execute as list;

use crate::config::Config;
use crate::error::{MemoError, MemoResult};
use std::path::PathBuf;

/// Folder given on the command line, else the configured one
fn resolve_folder(folder: Option<PathBuf>, config: &Config) -> MemoResult<PathBuf> {
    folder
        .or_else(|| config.cache.folder.clone())
        .ok_or(MemoError::FolderUnresolved)
}
