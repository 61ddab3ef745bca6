//! Document to tag-list conversion.

use crate::document::{MetadataDocument, MetadataImage, OpenGraph, TwitterCard};
use crate::head_tag::HeadTag;

/// Robots directive emitted for `noindex: true`.
pub const ROBOTS_NOINDEX: &str = "noindex,nofollow";

/// Convert a document into an ordered list of head records.
///
/// Absent fields produce no records. Images are followed by their alt
/// record when alt text is present.
pub fn to_head_tags(document: &MetadataDocument) -> Vec<HeadTag> {
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

    let mut tags = Vec::new();

    if let Some(title) = title {
        tags.push(HeadTag::title(title));
    }
    if let Some(description) = description {
        tags.push(HeadTag::meta_name("description", description));
    }
    if let Some(favicon) = favicon {
        tags.push(HeadTag::link("icon", favicon));
    }
    tags.extend(icon.iter().map(|image| icon_link("icon", image)));
    tags.extend(
        apple_touch_icon
            .iter()
            .map(|image| icon_link("apple-touch-icon", image)),
    );
    if let Some(open_graph) = open_graph {
        push_open_graph(&mut tags, open_graph);
    }
    if let Some(twitter) = twitter {
        push_twitter(&mut tags, twitter);
    }
    if *noindex == Some(true) {
        tags.push(HeadTag::meta_name("robots", ROBOTS_NOINDEX));
    }
    tags.extend(
        custom_tags
            .iter()
            .map(|tag| HeadTag::meta_name(&tag.name, &tag.content)),
    );

    tags
}

fn icon_link(rel: &str, image: &MetadataImage) -> HeadTag {
    HeadTag::link(rel, &image.url)
        .with_optional_attribute("type", image.mime_type.as_deref())
        .with_optional_attribute("sizes", image.sizes())
}

fn push_open_graph(tags: &mut Vec<HeadTag>, open_graph: &OpenGraph) {
    let OpenGraph {
        title,
        description,
        locale,
        site_name,
        kind,
        image: _,
        images: _,
    } = open_graph;

    let properties = [
        ("og:title", title),
        ("og:description", description),
        ("og:locale", locale),
        ("og:site_name", site_name),
        ("og:type", kind),
    ];
    for (property, value) in properties {
        if let Some(value) = value {
            tags.push(HeadTag::meta_property(property, value));
        }
    }

    for image in open_graph.all_images() {
        tags.push(HeadTag::meta_property("og:image", &image.url));
        if let Some(alt) = &image.alt {
            tags.push(HeadTag::meta_property("og:image:alt", alt));
        }
    }
}

fn push_twitter(tags: &mut Vec<HeadTag>, twitter: &TwitterCard) {
    let TwitterCard {
        card,
        title,
        description,
        image,
    } = twitter;

    let names = [
        ("twitter:card", card),
        ("twitter:title", title),
        ("twitter:description", description),
    ];
    for (name, value) in names {
        if let Some(value) = value {
            tags.push(HeadTag::meta_name(name, value));
        }
    }

    if let Some(image) = image {
        tags.push(HeadTag::meta_name("twitter:image", &image.url));
        if let Some(alt) = &image.alt {
            tags.push(HeadTag::meta_name("twitter:image:alt", alt));
        }
    }
}

#[cfg(test)]
#[path = "head_tags_tests.rs"]
mod tests;
