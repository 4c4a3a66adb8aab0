//! Document-level types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

/// A parsed resume document.
///
/// The root is a JSON object mapping section keys to loosely shaped section
/// data. Key order follows the source document, which keeps every "first
/// entry" fallback reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeDocument {
    root: Map<String, Value>,
}

impl ResumeDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(Error::NotAnObject(value_kind(&other))),
        }
    }

    /// Parse a document from a JSON string.
    pub fn parse_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Get a section's data. Null counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key).filter(|v| !v.is_null())
    }

    /// Check whether a section carries any content.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !is_blank(v))
    }

    /// Section keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Number of top-level sections.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl std::str::FromStr for ResumeDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

/// Check whether a value should be treated as absent.
///
/// Null, whitespace-only strings, empty arrays and empty objects are blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Human-readable name of a JSON value's type, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
