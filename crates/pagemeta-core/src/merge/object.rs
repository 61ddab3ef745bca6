//! Object-merge strategy.

use serde_json::{Map, Value};

use crate::metadata_object::MetadataObject;

/// Merge fallback, generated and override objects in priority order.
///
/// # Examples
///
/// ```rust
/// use pagemeta_core::merge::merge_objects;
/// use pagemeta_core::MetadataObject;
/// use serde_json::json;
///
/// let fallback = MetadataObject::from_value(json!({"title": "F", "description": "Fd"})).unwrap();
/// let generated = MetadataObject::from_value(json!({"title": "G"})).unwrap();
/// let overrides = MetadataObject::from_value(json!({"title": "O"})).unwrap();
///
/// let merged = merge_objects(&fallback, &generated, &overrides);
///
/// assert_eq!(merged.into_value(), json!({"title": "O", "description": "Fd"}));
/// ```
pub fn merge_objects(
    fallback: &MetadataObject,
    generated: &MetadataObject,
    overrides: &MetadataObject,
) -> MetadataObject {
    let mut merged = Map::new();
    for source in [fallback, generated, overrides] {
        deep_merge(&mut merged, source.as_map());
    }
    MetadataObject::from(merged)
}

/// Deep-merge `source` into `target`.
///
/// Nested objects merge key by key at every level. Any other value,
/// including an array, replaces what was there. `null` means "no opinion"
/// and leaves the target untouched.
pub fn deep_merge(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, incoming) in source {
        match incoming {
            Value::Null => {}
            Value::Object(incoming_map) => match target.get_mut(key) {
                Some(Value::Object(existing)) => deep_merge(existing, incoming_map),
                _ => {
                    let mut fresh = Map::new();
                    deep_merge(&mut fresh, incoming_map);
                    target.insert(key.clone(), Value::Object(fresh));
                }
            },
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
