//! Resolution against a mock PageMeta API over real HTTP.

mod common;

use common::DSN;
use pagemeta_core::{
    ClientConfig, FrameworkAdapter, HeadTag, HeadTagsAdapter, MetadataClient,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MetadataClient {
    let config = ClientConfig::default()
        .with_dsn(DSN)
        .with_api_key("key_configured")
        .with_api_url(server.uri());
    MetadataClient::new(config).unwrap()
}

#[tokio::test]
async fn test_head_tags_from_live_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/metadata"))
        .and(query_param("dsn", DSN))
        .and(query_param("path", "/blog/hello"))
        .and(header("authorization", "Bearer key_configured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Hello",
            "openGraph": { "image": { "url": "/og.png", "alt": "Cover" } },
            "twitter": { "image": [{ "url": "/t1.png" }, { "url": "/t2.png" }] },
            "noindex": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = HeadTagsAdapter::new(client_for(&server));
    let fallback = vec![HeadTag::title("Site"), HeadTag::meta_name("author", "Team")];

    let tags = adapter
        .resolve(Some("/blog/hello/"), &fallback, &Vec::new(), None)
        .await;

    assert_eq!(
        tags,
        vec![
            HeadTag::meta_name("author", "Team"),
            HeadTag::title("Hello"),
            HeadTag::meta_property("og:image", "/og.png"),
            HeadTag::meta_property("og:image:alt", "Cover"),
            HeadTag::meta_name("twitter:image", "/t1.png"),
            HeadTag::meta_name("robots", "noindex,nofollow"),
        ]
    );

    // Cached: the mock's expect(1) fails the test on a second request.
    adapter
        .resolve(Some("/blog/hello"), &fallback, &Vec::new(), None)
        .await;
}

/// Verify a per-call token replaces the configured API key.
#[tokio::test]
async fn test_per_call_token_overrides_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer key_per_call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "T" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let document = client.resolve(Some("/x"), Some("key_per_call")).await;

    assert_eq!(document.unwrap().title.as_deref(), Some("T"));
}

#[tokio::test]
async fn test_server_error_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let adapter = HeadTagsAdapter::new(client_for(&server));
    let fallback = vec![HeadTag::title("Site")];

    let tags = adapter.resolve(Some("/x"), &fallback, &Vec::new(), None).await;

    assert_eq!(tags, fallback);
    assert!(adapter.client().cache().is_empty());
}

#[tokio::test]
async fn test_null_body_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(client.resolve(Some("/x"), None).await.is_none());
}

/// Verify a root-level resolution sends no path parameter.
#[tokio::test]
async fn test_root_resolution_omits_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("dsn", DSN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Root" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let document = client.resolve(None, None).await.unwrap();

    assert_eq!(document.title.as_deref(), Some("Root"));
    let received = server.received_requests().await.unwrap();
    assert!(received[0]
        .url
        .query_pairs()
        .all(|(key, _)| key != "path"));
}
