//! Document to metadata-object conversion.

use serde_json::{Map, Value};

use crate::document::{MetadataDocument, MetadataImage, OpenGraph, TwitterCard};
use crate::metadata_object::MetadataObject;

use super::head_tags::ROBOTS_NOINDEX;

/// Convert a document into a nested metadata object.
///
/// Absent fields produce no keys. Empty sub-objects are omitted.
pub fn to_metadata_object(document: &MetadataDocument) -> MetadataObject {
    let MetadataDocument {
        title,
        description,
        favicon,
        icon,
        apple_touch_icon,
        open_graph,
        twitter,
        custom_tags,
        noindex,
    } = document;

    let mut object = Map::new();
    insert_some(&mut object, "title", title);
    insert_some(&mut object, "description", description);

    let mut icons = Map::new();
    insert_some(&mut icons, "shortcut", favicon);
    insert_list(&mut icons, "icon", icon.iter().map(icon_value).collect());
    insert_list(
        &mut icons,
        "apple",
        apple_touch_icon.iter().map(icon_value).collect(),
    );
    insert_object(&mut object, "icons", icons);

    if let Some(open_graph) = open_graph {
        insert_object(&mut object, "openGraph", open_graph_object(open_graph));
    }
    if let Some(twitter) = twitter {
        insert_object(&mut object, "twitter", twitter_object(twitter));
    }
    if *noindex == Some(true) {
        object.insert("robots".to_string(), Value::from(ROBOTS_NOINDEX));
    }

    let other: Map<String, Value> = custom_tags
        .iter()
        .map(|tag| (tag.name.clone(), Value::from(tag.content.as_str())))
        .collect();
    insert_object(&mut object, "other", other);

    MetadataObject::from(object)
}

fn open_graph_object(open_graph: &OpenGraph) -> Map<String, Value> {
    let OpenGraph {
        title,
        description,
        locale,
        site_name,
        kind,
        image: _,
        images: _,
    } = open_graph;

    let mut object = Map::new();
    insert_some(&mut object, "title", title);
    insert_some(&mut object, "description", description);
    insert_some(&mut object, "locale", locale);
    insert_some(&mut object, "siteName", site_name);
    insert_some(&mut object, "type", kind);
    insert_list(
        &mut object,
        "images",
        open_graph.all_images().map(image_value).collect(),
    );
    object
}

fn twitter_object(twitter: &TwitterCard) -> Map<String, Value> {
    let TwitterCard {
        card,
        title,
        description,
        image,
    } = twitter;

    let mut object = Map::new();
    insert_some(&mut object, "card", card);
    insert_some(&mut object, "title", title);
    insert_some(&mut object, "description", description);
    if let Some(image) = image {
        let mut entry = Map::new();
        entry.insert("url".to_string(), Value::from(image.url.as_str()));
        insert_some(&mut entry, "alt", &image.alt);
        object.insert("images".to_string(), Value::Array(vec![Value::Object(entry)]));
    }
    object
}

fn icon_value(image: &MetadataImage) -> Value {
    let mut entry = Map::new();
    entry.insert("url".to_string(), Value::from(image.url.as_str()));
    insert_some(&mut entry, "type", &image.mime_type);
    insert_some(&mut entry, "sizes", &image.sizes());
    Value::Object(entry)
}

fn image_value(image: &MetadataImage) -> Value {
    let mut entry = Map::new();
    entry.insert("url".to_string(), Value::from(image.url.as_str()));
    insert_some(&mut entry, "alt", &image.alt);
    if let Some(width) = image.width {
        entry.insert("width".to_string(), Value::from(width));
    }
    if let Some(height) = image.height {
        entry.insert("height".to_string(), Value::from(height));
    }
    insert_some(&mut entry, "type", &image.mime_type);
    Value::Object(entry)
}

fn insert_some(object: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        object.insert(key.to_string(), Value::from(value.as_str()));
    }
}

fn insert_list(object: &mut Map<String, Value>, key: &str, values: Vec<Value>) {
    if !values.is_empty() {
        object.insert(key.to_string(), Value::Array(values));
    }
}

fn insert_object(object: &mut Map<String, Value>, key: &str, value: Map<String, Value>) {
    if !value.is_empty() {
        object.insert(key.to_string(), Value::Object(value));
    }
}

#[cfg(test)]
#[path = "metadata_object_tests.rs"]
mod tests;
