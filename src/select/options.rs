//! Option maps and their canonical cache keys.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

lazy_static! {
    /// Shared empty options, used when a module has no configured defaults.
    pub(crate) static ref EMPTY_OPTIONS: Options = Options::new();
}

/// A scalar option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Boolean(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Integer(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Str(v)
    }
}

/// An options object: string keys mapped to scalar values.
///
/// Identity is independent of insertion order - two options with the same
/// key/value pairs compare equal and canonicalize to the same cache key
/// regardless of the order the keys were set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Options {
            entries: BTreeMap::new(),
        }
    }

    /// Builder form of [`Options::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Canonical cache key: keys sorted alphabetically, each serialized as
    /// `key:<JSON value>`, joined with `|`. Two options with the same
    /// pairs in any insertion order produce the same key; different values
    /// produce different keys.
    pub fn canonical_key(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| {
                let json = serde_json::to_string(value)
                    .unwrap_or_else(|_| "null".to_string());
                format!("{}:{}", key, json)
            })
            .collect::<Vec<String>>()
            .join("|")
    }
}

impl Display for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_key())
    }
}
