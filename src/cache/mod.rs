//! Persistent function-result cache
//!
//! Memoizes function calls across process runs. Each call is keyed by the
//! SHA256 of the function's qualified name, its source text and its
//! arguments, and the result is stored as one file per key.
//!
//! # Key Model
//!
//! - Same name + same source + same arguments = same key = cache hit
//! - Editing the function's source changes every key it produces
//! - Keyword arguments are ordered by name before hashing
//!
//! # Entry Lifecycle
//!
//! | Event | Effect |
//! |-------|--------|
//! | Miss | Function runs, result written to `<key>.bin` |
//! | Hit | Entry decoded and returned, function not run |
//! | Function error | Error returned, nothing written |
//!
//! Entries never expire and are never removed by memodisk; the cache folder
//! belongs to the caller.

pub mod decorator;
pub mod key;
pub mod store;
pub mod value;

pub use decorator::{cache, Cache, Cached, CACHE_DIR_ENV};
pub use key::{derive_key, CacheKey, FnIdentity, KEY_LEN};
pub use store::{load, normalize_extension, store, EntryInfo, EntryStore, DEFAULT_EXTENSION};
pub use value::{CallArgs, Value};
