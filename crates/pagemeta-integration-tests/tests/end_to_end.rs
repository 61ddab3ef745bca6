//! End-to-end scenario: resolve through an adapter, then invalidate through
//! the webhook app sharing the same client.

mod common;

use axum::http::StatusCode;
use common::{bearer_webhook, send, signed_webhook, CountingTransport, RecordingHook, DSN, SECRET};
use pagemeta_api::{create_adapter_router, WebhookOptions};
use pagemeta_core::{
    CacheKey, ClientConfig, FrameworkAdapter, HeadTag, HeadTagsAdapter, MetadataClient,
    MetadataDocument, MetadataObject, MetadataObjectAdapter,
};
use serde_json::json;
use std::sync::Arc;

fn generated() -> MetadataDocument {
    MetadataDocument {
        title: Some("Generated".to_string()),
        description: Some("Gen desc".to_string()),
        ..Default::default()
    }
}

fn live_client(transport: Arc<CountingTransport>) -> MetadataClient {
    MetadataClient::with_transport(ClientConfig::default().with_dsn(DSN), transport)
}

/// Verify the full resolve, cache, webhook, invalidate cycle.
#[tokio::test]
async fn test_resolve_then_revalidate_cycle() {
    // Arrange
    let transport =
        Arc::new(CountingTransport::new().with_document(Some("/blog/hello"), generated()));
    let hook = Arc::new(RecordingHook::default());
    let adapter =
        MetadataObjectAdapter::new(live_client(transport.clone())).with_revalidate_hook(hook.clone());
    let fallback = MetadataObject::from_value(json!({ "title": "Fallback" })).unwrap();

    // Act: resolve
    let merged = adapter
        .resolve(Some("/blog/hello"), &fallback, &MetadataObject::new(), None)
        .await;

    // Assert: merged output and a single cached entry
    assert_eq!(
        merged.into_value(),
        json!({ "title": "Generated", "description": "Gen desc" })
    );
    let cache = adapter.client().cache();
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&CacheKey::for_path(Some("/blog/hello"))));

    // Act: second resolve hits the cache
    adapter
        .resolve(Some("/blog/hello/"), &fallback, &MetadataObject::new(), None)
        .await;
    assert_eq!(transport.request_count(), 1);

    // Act: webhook
    let router = create_adapter_router(&adapter, WebhookOptions::new(SECRET));
    let body = json!({ "_type": "metadata_update", "path": "/blog/hello/" }).to_string();
    let (status, response) = send(router, signed_webhook(&body, "1700000000000")).await;

    // Assert: entry cleared and hook called with the normalized path
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "ok": true, "metadata": { "revalidated": true, "path": "/blog/hello" } })
    );
    assert!(adapter.client().cache().is_empty());
    assert_eq!(hook.calls(), vec![Some("/blog/hello".to_string())]);

    // Act: resolve again refetches
    adapter
        .resolve(Some("/blog/hello"), &fallback, &MetadataObject::new(), None)
        .await;
    assert_eq!(transport.request_count(), 2);
}

/// Verify a failed fetch degrades to fallback and is retried next time.
#[tokio::test]
async fn test_failure_is_not_cached() {
    let transport = Arc::new(CountingTransport::new());
    let adapter = HeadTagsAdapter::new(live_client(transport.clone()));
    let fallback = vec![HeadTag::title("Fallback")];

    let first = adapter.resolve(Some("/missing"), &fallback, &Vec::new(), None).await;
    let second = adapter.resolve(Some("/missing"), &fallback, &Vec::new(), None).await;

    assert_eq!(first, fallback);
    assert_eq!(second, fallback);
    assert_eq!(transport.request_count(), 2);
    assert!(adapter.client().cache().is_empty());
}

#[tokio::test]
async fn test_development_mode_makes_no_requests() {
    let transport = Arc::new(CountingTransport::new().with_document(Some("/"), generated()));
    let adapter = HeadTagsAdapter::new(MetadataClient::with_transport(
        ClientConfig::default(),
        transport.clone(),
    ));

    for path in [None, Some("/"), Some("/blog/hello"), Some("")] {
        let tags = adapter
            .resolve(path, &vec![HeadTag::title("Fallback")], &Vec::new(), None)
            .await;
        assert_eq!(tags, vec![HeadTag::title("Fallback")]);
    }

    assert_eq!(transport.request_count(), 0);
    assert!(adapter.client().cache().is_empty());
}

/// Verify requests use the normalized path and the root sentinel maps to
/// the root request.
#[tokio::test]
async fn test_equivalent_paths_share_cache_entry() {
    let transport = Arc::new(
        CountingTransport::new()
            .with_document(Some("/blog/hello"), generated())
            .with_document(Some("/"), generated()),
    );
    let client = live_client(transport.clone());

    for path in ["/blog/hello", "blog/hello", "/blog//hello/", "/blog/hello?ref=x#top"] {
        assert!(client.resolve(Some(path), None).await.is_some());
    }
    client.resolve(Some("/"), None).await;
    client.resolve(Some("?utm=1"), None).await;

    assert_eq!(transport.request_count(), 2);
    let paths: Vec<_> = transport
        .requests()
        .into_iter()
        .map(|request| request.path)
        .collect();
    assert_eq!(
        paths,
        vec![Some("/blog/hello".to_string()), Some("/".to_string())]
    );
}

/// Verify a full-site purge over bearer auth clears every entry.
#[tokio::test]
async fn test_null_path_purges_everything() {
    let transport = Arc::new(
        CountingTransport::new()
            .with_document(Some("/a"), generated())
            .with_document(Some("/b"), generated()),
    );
    let hook = Arc::new(RecordingHook::default());
    let adapter =
        HeadTagsAdapter::new(live_client(transport.clone())).with_revalidate_hook(hook.clone());
    adapter.client().resolve(Some("/a"), None).await;
    adapter.client().resolve(Some("/b"), None).await;
    assert_eq!(adapter.client().cache().len(), 2);

    let router = create_adapter_router(&adapter, WebhookOptions::new(SECRET));
    let body = json!({ "_type": "metadata_update", "path": null }).to_string();
    let (status, _) = send(router, bearer_webhook(&body, SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(adapter.client().cache().is_empty());
    assert_eq!(hook.calls(), vec![None]);
}
