//! Tests for head tag records.

use super::*;
use serde_json::json;

// ============================================================================
// Dedup Key Tests
// ============================================================================

mod dedup_key_tests {
    use super::*;

    #[test]
    fn test_name_key() {
        let tag = HeadTag::meta_name("description", "D");

        assert_eq!(tag.dedup_key(), Some(DedupKey::Name("description".to_string())));
        assert_eq!(tag.dedup_key().unwrap().to_string(), "name:description");
    }

    #[test]
    fn test_property_key() {
        let tag = HeadTag::meta_property("og:title", "T");

        assert_eq!(tag.dedup_key().unwrap().to_string(), "property:og:title");
    }

    #[test]
    fn test_title_key() {
        assert_eq!(HeadTag::title("Hello").dedup_key(), Some(DedupKey::Title));
    }

    /// Verify `name` wins over `property` and `title` when several are present.
    #[test]
    fn test_name_takes_precedence() {
        let tag = HeadTag::from_attributes([
            ("title", "T"),
            ("property", "og:x"),
            ("name", "n"),
        ]);

        assert_eq!(tag.dedup_key(), Some(DedupKey::Name("n".to_string())));
    }

    #[test]
    fn test_property_before_title() {
        let tag = HeadTag::from_attributes([("title", "T"), ("property", "og:x")]);

        assert_eq!(tag.dedup_key(), Some(DedupKey::Property("og:x".to_string())));
    }

    #[test]
    fn test_links_have_no_key() {
        assert_eq!(HeadTag::link("icon", "/favicon.ico").dedup_key(), None);
        assert_eq!(HeadTag::from_attributes([("charSet", "utf-8")]).dedup_key(), None);
    }

    #[test]
    fn test_only_property_keys_repeat() {
        assert!(DedupKey::Property("og:image".to_string()).is_repeatable());
        assert!(!DedupKey::Name("description".to_string()).is_repeatable());
        assert!(!DedupKey::Title.is_repeatable());
    }
}

// ============================================================================
// Construction Tests
// ============================================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_optional_attribute_skipped_when_absent() {
        let tag = HeadTag::link("icon", "/i.png")
            .with_optional_attribute("type", None::<String>)
            .with_optional_attribute("sizes", Some("32x32"));

        assert_eq!(tag.attribute("type"), None);
        assert_eq!(tag.attribute("sizes"), Some("32x32"));
    }

    /// Verify records serialize as flat attribute objects.
    #[test]
    fn test_serializes_flat() {
        let tag = HeadTag::link("icon", "/i.png");

        assert_eq!(
            serde_json::to_value(&tag).unwrap(),
            json!({ "tagName": "link", "rel": "icon", "href": "/i.png" })
        );
    }

    #[test]
    fn test_deserializes_flat() {
        let tag: HeadTag =
            serde_json::from_value(json!({ "name": "author", "content": "A" })).unwrap();

        assert_eq!(tag, HeadTag::meta_name("author", "A"));
    }
}
