//! Caching wrapper around a function
//!
//! [`Cache`] is the configurable form (`Cache::in_folder(dir).wrap(id, f)`),
//! [`cache`] the direct form (`cache(id, f)`). Both produce a [`Cached`] that
//! dispatches every call the same way:
//!
//! 1. resolve the cache folder
//! 2. derive the key from the function identity and the arguments
//! 3. on a hit, return the stored value without running the function
//! 4. on a miss, run the function, store the result, return it
//!
//! Two callers missing on the same key at the same time both run the function
//! and both write the entry; the last write wins. There is no locking.

use super::key::{derive_key, CacheKey, FnIdentity};
use super::store::EntryStore;
use super::value::CallArgs;
use crate::config::schema::CacheConfig;
use crate::error::{MemoError, MemoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the cache folder when none is set explicitly
pub const CACHE_DIR_ENV: &str = "MEMODISK_CACHE_DIR";

/// Cache settings applied to wrapped functions
#[derive(Debug, Clone, Default)]
pub struct Cache {
    folder: Option<PathBuf>,
    store: EntryStore,
}

impl Cache {
    /// Cache whose folder is resolved from `MEMODISK_CACHE_DIR` on every call
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache storing entries in `folder`
    pub fn in_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: Some(folder.into()),
            store: EntryStore::new(),
        }
    }

    /// Cache using the folder and extension from configuration
    pub fn from_config(config: &CacheConfig) -> MemoResult<Self> {
        Ok(Self {
            folder: config.folder.clone(),
            store: EntryStore::with_extension(&config.extension)?,
        })
    }

    pub fn with_store(mut self, store: EntryStore) -> Self {
        self.store = store;
        self
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Folder to use for the current call
    pub fn resolve_folder(&self) -> MemoResult<PathBuf> {
        if let Some(folder) = &self.folder {
            return Ok(folder.clone());
        }
        match env::var_os(CACHE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => Err(MemoError::FolderUnresolved),
        }
    }

    /// Wrap `func` so its results are cached under `identity`
    pub fn wrap<F>(&self, identity: FnIdentity, func: F) -> Cached<F> {
        Cached {
            identity,
            cache: self.clone(),
            func,
        }
    }
}

/// Wrap `func` with a cache whose folder comes from `MEMODISK_CACHE_DIR`
pub fn cache<F>(identity: FnIdentity, func: F) -> Cached<F> {
    Cache::new().wrap(identity, func)
}

/// A function whose results are cached on disk
pub struct Cached<F> {
    identity: FnIdentity,
    cache: Cache,
    func: F,
}

impl<F> Cached<F> {
    pub fn identity(&self) -> &FnIdentity {
        &self.identity
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Key the call with `args` would use
    pub fn key(&self, args: &CallArgs) -> MemoResult<CacheKey> {
        derive_key(&self.identity, args)
    }

    /// Call an infallible function through the cache
    pub fn call<R>(&self, args: &CallArgs) -> MemoResult<R>
    where
        F: Fn(&CallArgs) -> R,
        R: Serialize + DeserializeOwned,
    {
        self.dispatch(args, || Ok((self.func)(args)))
    }

    /// Call a fallible function through the cache
    ///
    /// Errors returned by the function are passed through untouched and
    /// nothing is stored for that call.
    pub fn try_call<R, E>(&self, args: &CallArgs) -> Result<R, E>
    where
        F: Fn(&CallArgs) -> Result<R, E>,
        R: Serialize + DeserializeOwned,
        E: From<MemoError>,
    {
        self.dispatch(args, || (self.func)(args))
    }

    fn dispatch<R, E>(&self, args: &CallArgs, run: impl FnOnce() -> Result<R, E>) -> Result<R, E>
    where
        R: Serialize + DeserializeOwned,
        E: From<MemoError>,
    {
        let folder = self.cache.resolve_folder()?;
        let key = self.key(args)?;
        let name = self.identity.qualified_name();

        if let Some(hit) = self.cache.store.load(&folder, &key)? {
            debug!("Cache hit for {} ({})", name, key);
            return Ok(hit);
        }

        debug!("Cache miss for {} ({})", name, key);
        let result = run()?;
        self.cache.store.store(&folder, &key, &result)?;
        Ok(result)
    }
}
