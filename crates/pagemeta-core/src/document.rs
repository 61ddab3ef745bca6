//! Metadata document returned by the PageMeta service for a single path.
//!
//! Every field is independently optional. An absent field means "no opinion"
//! and is never rendered or defaulted by the converters.

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical metadata for one page.
///
/// Created by a transport per request and treated as immutable afterwards;
/// the cache hands out clones.
///
/// # Examples
///
/// ```rust
/// use pagemeta_core::MetadataDocument;
///
/// let doc: MetadataDocument = serde_json::from_str(
///     r#"{"title":"Hello","openGraph":{"siteName":"Blog"}}"#,
/// ).unwrap();
///
/// assert_eq!(doc.title.as_deref(), Some("Hello"));
/// assert!(doc.description.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL of the site favicon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub icon: Vec<MetadataImage>,

    #[serde(
        default,
        deserialize_with = "nullable_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub apple_touch_icon: Vec<MetadataImage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,

    #[serde(
        default,
        deserialize_with = "nullable_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub custom_tags: Vec<CustomTag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noindex: Option<bool>,
}

impl MetadataDocument {
    /// Returns `true` when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// An image or icon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataImage {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl MetadataImage {
    /// Create an image reference with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
            width: None,
            height: None,
            mime_type: None,
        }
    }

    /// Set the alternative text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set the pixel dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Dimensions formatted as `<width>x<height>`, when both are known.
    pub fn sizes(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(format!("{}x{}", width, height)),
            _ => None,
        }
    }
}

/// Open Graph properties.
///
/// `image` and `images` are both rendered; the singular one comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MetadataImage>,

    #[serde(
        default,
        deserialize_with = "nullable_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<MetadataImage>,
}

impl OpenGraph {
    /// All images in render order: the singular image first, then the list.
    pub fn all_images(&self) -> impl Iterator<Item = &MetadataImage> {
        self.image.iter().chain(self.images.iter())
    }
}

/// Twitter card properties.
///
/// Twitter cards carry a single image. The decoder accepts an array for
/// compatibility and keeps the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "primary_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<MetadataImage>,
}

/// A free-form `<meta name content>` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTag {
    pub name: String,
    pub content: String,
}

impl CustomTag {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Treat an explicit `null` list the same as an absent one.
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(MetadataImage),
    Many(Vec<MetadataImage>),
}

fn primary_image<'de, D>(deserializer: D) -> Result<Option<MetadataImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<OneOrMany>::deserialize(deserializer)? {
            Some(OneOrMany::One(image)) => Some(image),
            Some(OneOrMany::Many(images)) => images.into_iter().next(),
            None => None,
        },
    )
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
