//! Nested metadata object output.
//!
//! The shape follows the common framework convention of a metadata object
//! (`title`, `description`, `openGraph{...}`, `twitter{...}`, `icons{...}`,
//! `robots`, `other{...}`). Callers may put any additional keys in fallback
//! or override objects; they are merged like every other key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object of metadata fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataObject(Map<String, Value>);

impl MetadataObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Returns `None` if the value is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for MetadataObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
