//! Cacheable argument values and call arguments
//!
//! Arguments take part in key derivation through their canonical text form,
//! so every value type here renders deterministically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A structured value that can be passed to or returned from a cached function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integer above `i64::MAX`; smaller ones are always `Int`
    UInt(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            Self::UInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Self::List(items) => {
                write!(f, "[")?;
                write_joined(f, items.iter())?;
                write!(f, "]")
            }
            Self::Map(map) => write_map(f, map),
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_map(f: &mut fmt::Formatter<'_>, map: &BTreeMap<String, Value>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}: {}", k, v)?;
    }
    write!(f, "}}")
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Self::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Int(i),
                (None, Some(u)) => Self::UInt(u),
                _ => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Positional and keyword arguments of one call
///
/// Keyword arguments are kept sorted by name so that their text form does not
/// depend on the order in which the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing any earlier value for the same name
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword(&self) -> &BTreeMap<String, Value> {
        &self.keyword
    }

    /// Positional argument at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Keyword argument by name
    pub fn kw(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Text form of the positional arguments: `()`, `(1,)`, `(1, 2)`
    pub fn positional_repr(&self) -> String {
        let mut out = String::from("(");
        for (i, v) in self.positional.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&v.to_string());
        }
        if self.positional.len() == 1 {
            out.push(',');
        }
        out.push(')');
        out
    }

    /// Text form of the keyword arguments: `{}`, `{"a": 1}`
    pub fn keyword_repr(&self) -> String {
        Value::Map(self.keyword.clone()).to_string()
    }
}

/// Build [`CallArgs`] from positional expressions, optionally followed by
/// `; name = value` keyword pairs.
///
/// ```
/// use memodisk::args;
///
/// let args = args!(1, "two"; scale = 2.5);
/// assert_eq!(args.positional_repr(), r#"(1, "two")"#);
/// assert_eq!(args.keyword_repr(), r#"{"scale": 2.5}"#);
/// ```
#[macro_export]
macro_rules! args {
    ($($v:expr),* $(,)? $(; $($k:ident = $kv:expr),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut args = $crate::CallArgs::new();
        $( args = args.arg($v); )*
        $($( args = args.kwarg(stringify!($k), $kv); )*)?
        args
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display() {
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::from("it's").to_string(), "\"it's\"");
        assert_eq!(Value::from(&b"a\x00"[..]).to_string(), "b\"a\\x00\"");
    }

    #[test]
    fn nested_display() {
        let mut map = BTreeMap::new();
        map.insert("z".to_string(), Value::from(vec![1, 2]));
        map.insert("a".to_string(), Value::Null);
        assert_eq!(Value::Map(map).to_string(), r#"{"a": None, "z": [1, 2]}"#);
    }

    #[test]
    fn positional_repr_shapes() {
        assert_eq!(CallArgs::new().positional_repr(), "()");
        assert_eq!(CallArgs::new().arg(1).positional_repr(), "(1,)");
        assert_eq!(CallArgs::new().arg(1).arg(2).positional_repr(), "(1, 2)");
    }

    #[test]
    fn keyword_order_is_stable() {
        let a = CallArgs::new().kwarg("b", 2).kwarg("a", 1);
        let b = CallArgs::new().kwarg("a", 1).kwarg("b", 2);
        assert_eq!(a.keyword_repr(), b.keyword_repr());
        assert_eq!(a.keyword_repr(), r#"{"a": 1, "b": 2}"#);
        assert_eq!(CallArgs::new().keyword_repr(), "{}");
    }

    #[test]
    fn args_macro() {
        let args = crate::args!(1, 2);
        assert_eq!(args.positional(), &[Value::Int(1), Value::Int(2)]);
        assert!(args.keyword().is_empty());

        let args = crate::args!("x"; limit = 10, verbose = true);
        assert_eq!(args.get(0).and_then(Value::as_str), Some("x"));
        assert_eq!(args.kw("limit").and_then(Value::as_i64), Some(10));
        assert_eq!(args.kw("verbose").and_then(Value::as_bool), Some(true));

        assert_eq!(crate::args!(), CallArgs::new());
    }

    #[test]
    fn from_json() {
        let json: serde_json::Value = serde_json::from_str(r#"{"n": 3, "xs": [1.5, null]}"#).unwrap();
        let value = Value::from(json);
        assert_eq!(value.to_string(), r#"{"n": 3, "xs": [1.5, None]}"#);
    }

    #[test]
    fn wide_integers_keep_precision() {
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert_eq!(Value::from(7usize), Value::Int(7));
        assert_eq!(Value::from(-7isize), Value::Int(-7));

        let big = Value::from(u64::MAX);
        assert_eq!(big, Value::UInt(u64::MAX));
        assert_eq!(big.to_string(), "18446744073709551615");
        assert_eq!(big.as_i64(), None);

        let json: serde_json::Value = serde_json::from_str("[9223372036854775808]").unwrap();
        assert_eq!(Value::from(json).to_string(), "[9223372036854775808]");
    }
}
