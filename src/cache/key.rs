//! Cache key derivation
//!
//! A key is the SHA256 digest of the function's qualified name, its source
//! text and the text form of the call arguments. Same code + same arguments
//! = same key. The digest is a content fingerprint only, never a trust check.

use super::value::CallArgs;
use crate::error::{MemoError, MemoResult};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Length of a hex-encoded SHA256 digest
pub const KEY_LEN: usize = 64;

/// Identity of a cached function: where it is declared and what it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnIdentity {
    qualified_name: String,
    source: Option<String>,
}

impl FnIdentity {
    /// Identity with known source text
    pub fn new(qualified_name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            qualified_name: qualified_name.into(),
            source: (!source.is_empty()).then_some(source),
        }
    }

    /// Identity for a function built at runtime, which has no source text
    pub fn opaque(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            source: None,
        }
    }

    /// Identity whose source text is read from a file
    ///
    /// An unreadable file leaves the identity without source; key derivation
    /// then fails with `SourceUnavailable`.
    pub fn from_source_file(qualified_name: impl Into<String>, path: &Path) -> Self {
        let qualified_name = qualified_name.into();
        match fs::read_to_string(path) {
            Ok(source) => Self::new(qualified_name, source),
            Err(e) => {
                debug!("No source for {} at {}: {}", qualified_name, path.display(), e);
                Self::opaque(qualified_name)
            }
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Source text, or `SourceUnavailable` if there is none
    pub fn source(&self) -> MemoResult<&str> {
        self.source
            .as_deref()
            .ok_or_else(|| MemoError::SourceUnavailable {
                function: self.qualified_name.clone(),
            })
    }
}

/// Hex SHA256 digest addressing one cache entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Parse a key from user input, accepting only 64 hex characters
    pub fn parse(s: &str) -> MemoResult<Self> {
        let invalid = |reason: &str| MemoError::InvalidKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        if s.len() != KEY_LEN {
            return Err(invalid("expected 64 hex characters"));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("contains non-hex characters"));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Entry file name for this key
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the cache key for calling `identity` with `args`
pub fn derive_key(identity: &FnIdentity, args: &CallArgs) -> MemoResult<CacheKey> {
    let source = identity.source()?;

    let mut hasher = Sha256::new();
    hasher.update(identity.qualified_name().as_bytes());
    hasher.update(source.as_bytes());
    hasher.update(args.positional_repr().as_bytes());
    hasher.update(args.keyword_repr().as_bytes());

    Ok(CacheKey(hex::encode(hasher.finalize())))
}

/// Define a function together with a sibling module carrying its identity.
///
/// The module shares the function's name and exposes `QUALIFIED_NAME`,
/// `SOURCE` (the token text of the whole item) and `identity()`.
///
/// ```
/// use memodisk::cacheable;
///
/// cacheable! {
///     fn add(a: i64, b: i64) -> i64 {
///         a + b
///     }
/// }
///
/// assert_eq!(add(1, 2), 3);
/// assert!(add::SOURCE.contains("a + b"));
/// assert!(add::QUALIFIED_NAME.ends_with("::add"));
/// ```
///
/// Only plain `name: Type` parameters and an explicit return type are
/// accepted. Generic functions, `mut` bindings and pattern parameters are
/// rejected at compile time; rebind inside the body instead
/// (`let mut n = n;`), or build the identity with [`FnIdentity::new`].
///
/// ```compile_fail
/// use memodisk::cacheable;
///
/// cacheable! {
///     fn countdown(mut n: u32) -> u32 {
///         while n > 0 { n -= 1; }
///         n
///     }
/// }
/// ```
#[macro_export]
macro_rules! cacheable {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ($($arg:ident : $ty:ty),* $(,)?) -> $ret:ty $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name($($arg: $ty),*) -> $ret $body

        #[allow(dead_code)]
        $vis mod $name {
            pub const QUALIFIED_NAME: &str = module_path!();

            pub const SOURCE: &str =
                stringify!(fn $name($($arg: $ty),*) -> $ret $body);

            pub fn identity() -> $crate::FnIdentity {
                $crate::FnIdentity::new(QUALIFIED_NAME, SOURCE)
            }
        }
    };
    ($($other:tt)*) => {
        compile_error!(
            "cacheable! expects `fn name(arg: Type, ...) -> Ret { ... }` \
             with plain identifier parameters and no generics"
        );
    };
}
