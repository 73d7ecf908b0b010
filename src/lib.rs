//! memodisk - persistent function-result cache
//!
//! Memoizes function calls across process runs, keyed by the function's
//! identity, its source text and its call arguments.
//!
//! ```
//! use memodisk::{args, cacheable, Cache, CallArgs, Value};
//!
//! cacheable! {
//!     fn add(a: i64, b: i64) -> i64 {
//!         a + b
//!     }
//! }
//!
//! # fn main() -> memodisk::MemoResult<()> {
//! # let dir = tempfile::TempDir::new().unwrap();
//! let cached = Cache::in_folder(dir.path()).wrap(add::identity(), |args: &CallArgs| {
//!     let int = |i: usize| args.get(i).and_then(Value::as_i64).unwrap_or_default();
//!     add(int(0), int(1))
//! });
//!
//! assert_eq!(cached.call::<i64>(&args!(1, 2))?, 3); // computed and stored
//! assert_eq!(cached.call::<i64>(&args!(1, 2))?, 3); // read back from disk
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod retry;
pub mod ui;

pub use cache::{
    cache, derive_key, load, store, Cache, CacheKey, Cached, CallArgs, EntryStore, FnIdentity,
    Value,
};
pub use error::{MemoError, MemoResult};
pub use retry::Retry;
