//! Tag-list output: one record per `<title>`, `<meta>` or `<link>`.
//!
//! Records are flat attribute maps, serialized as plain JSON objects
//! (`{"name":"description","content":"..."}`, `{"title":"..."}`,
//! `{"tagName":"link","rel":"icon","href":"..."}`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity used to decide whether two records describe the same field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Name(String),
    Property(String),
    Title,
}

impl DedupKey {
    /// Whether one source may carry several records for this key.
    ///
    /// Only `property` keys repeat (`og:image` per image).
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::Property(_))
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(value) => write!(f, "name:{}", value),
            Self::Property(value) => write!(f, "property:{}", value),
            Self::Title => f.write_str("title"),
        }
    }
}

/// A single head record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadTag {
    attributes: BTreeMap<String, String>,
}

impl HeadTag {
    /// `{title}` record.
    pub fn title(title: impl Into<String>) -> Self {
        Self::default().with_attribute("title", title)
    }

    /// `<meta name content>` record.
    pub fn meta_name(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::default()
            .with_attribute("name", name)
            .with_attribute("content", content)
    }

    /// `<meta property content>` record.
    pub fn meta_property(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self::default()
            .with_attribute("property", property)
            .with_attribute("content", content)
    }

    /// `<link rel href>` record.
    pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::default()
            .with_attribute("tagName", "link")
            .with_attribute("rel", rel)
            .with_attribute("href", href)
    }

    /// Build a record from arbitrary attributes.
    pub fn from_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set an attribute only when a value is present.
    pub fn with_optional_attribute(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_attribute(key, value),
            None => self,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Dedup identity: `name`, then `property`, then `title`.
    ///
    /// Records with none of these (links, charset) have no key and are never
    /// deduplicated.
    pub fn dedup_key(&self) -> Option<DedupKey> {
        if let Some(name) = self.attribute("name") {
            Some(DedupKey::Name(name.to_string()))
        } else if let Some(property) = self.attribute("property") {
            Some(DedupKey::Property(property.to_string()))
        } else if self.attributes.contains_key("title") {
            Some(DedupKey::Title)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "head_tag_tests.rs"]
mod tests;
