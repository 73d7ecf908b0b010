//! On-disk entry storage
//!
//! One file per entry, `<key>.<ext>`, flat inside the cache folder. Entries are
//! bincode-encoded and written through a temp file in the same folder, then
//! renamed into place, so a failed write never leaves a readable entry.
//!
//! Entries are trusted input: anyone who can write into the cache folder can
//! change what a cached function appears to return.

use super::key::CacheKey;
use crate::error::{MemoError, MemoResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Extension of entry files
pub const DEFAULT_EXTENSION: &str = "bin";

/// An entry found in a cache folder
#[derive(Debug, Clone, Serialize)]
pub struct EntryInfo {
    pub key: CacheKey,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Reads and writes entry files with a fixed extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStore {
    extension: String,
}

/// Check an entry extension, dropping one leading dot
///
/// The extension must be a single non-empty name with no dots or path
/// separators, otherwise `list` would not recognise the files `store` writes.
pub fn normalize_extension(extension: &str) -> MemoResult<String> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    let invalid = |reason: &str| MemoError::InvalidExtension {
        extension: extension.to_string(),
        reason: reason.to_string(),
    };

    if ext.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if ext.contains('.') {
        return Err(invalid("must not contain '.'"));
    }
    if ext.contains(['/', '\\']) {
        return Err(invalid("must not contain a path separator"));
    }
    Ok(ext.to_string())
}

impl EntryStore {
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Store using a custom extension, e.g. `"memo"` or `".memo"`
    pub fn with_extension(extension: &str) -> MemoResult<Self> {
        Ok(Self {
            extension: normalize_extension(extension)?,
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the entry for `key` inside `dir`
    pub fn entry_path(&self, dir: &Path, key: &CacheKey) -> PathBuf {
        dir.join(key.file_name(&self.extension))
    }

    /// Load the entry for `key`, or `None` if there is no such entry
    pub fn load<R: DeserializeOwned>(&self, dir: &Path, key: &CacheKey) -> MemoResult<Option<R>> {
        let path = self.entry_path(dir, key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(MemoError::io(
                    format!("reading cache entry {}", path.display()),
                    e,
                ))
            }
        };

        let value = bincode::deserialize(&bytes).map_err(|e| MemoError::serialization(&path, e))?;
        debug!("Loaded cache entry {}", path.display());
        Ok(Some(value))
    }

    /// Write the entry for `key`, replacing any existing one
    ///
    /// The folder must already exist.
    pub fn store<R: Serialize>(&self, dir: &Path, key: &CacheKey, value: &R) -> MemoResult<()> {
        let path = self.entry_path(dir, key);
        let bytes = bincode::serialize(value).map_err(|e| MemoError::serialization(&path, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            MemoError::io(format!("creating temp entry in {}", dir.display()), e)
        })?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.flush())
            .map_err(|e| MemoError::io(format!("writing temp entry for {}", key), e))?;

        // Concurrent writers of the same key race here; the last rename wins.
        tmp.persist(&path).map_err(|e| {
            MemoError::io(format!("writing cache entry {}", path.display()), e.error)
        })?;

        debug!("Stored cache entry {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// List the entries in `dir`, sorted by key
    ///
    /// Files that do not look like `<key>.<ext>` are skipped.
    pub fn list(&self, dir: &Path) -> MemoResult<Vec<EntryInfo>> {
        let entries = fs::read_dir(dir)
            .map_err(|e| MemoError::io(format!("reading cache folder {}", dir.display()), e))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MemoError::io("reading cache folder entry", e))?;
            let path = entry.path();

            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| CacheKey::parse(stem).ok())
            else {
                continue;
            };

            let metadata = match entry.metadata() {
                Ok(md) if md.is_file() => md,
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(MemoError::io(
                        format!("reading metadata of {}", path.display()),
                        e,
                    ))
                }
            };

            found.push(EntryInfo {
                key,
                path,
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        found.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(found)
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Load an entry using the default extension
pub fn load<R: DeserializeOwned>(dir: &Path, key: &CacheKey) -> MemoResult<Option<R>> {
    EntryStore::new().load(dir, key)
}

/// Store an entry using the default extension
pub fn store<R: Serialize>(dir: &Path, key: &CacheKey, value: &R) -> MemoResult<()> {
    EntryStore::new().store(dir, key, value)
}
