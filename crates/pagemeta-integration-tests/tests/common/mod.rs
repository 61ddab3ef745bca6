//! Common test utilities for PageMeta integration tests
//!
//! This module provides:
//! - A counting transport that serves canned documents per path
//! - A recording revalidation hook
//! - Request builders for signed and bearer webhook deliveries

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use pagemeta_api::{DEFAULT_BASE_PATH, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use pagemeta_core::{
    signature::signature_header, FetchRequest, MetadataDocument, MetadataTransport,
    RevalidateError, RevalidateHook, TransportError,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tower::ServiceExt;

#[allow(dead_code)]
pub const SECRET: &str = "whsec_integration";
#[allow(dead_code)]
pub const DSN: &str = "site_integration";

// ============================================================================
// Counting Transport
// ============================================================================

/// Transport that answers from a path-keyed table and records every request.
///
/// Paths missing from the table answer with a `404` status error.
#[derive(Default)]
#[allow(dead_code)]
pub struct CountingTransport {
    documents: HashMap<Option<String>, MetadataDocument>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl CountingTransport {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn with_document(mut self, path: Option<&str>, document: MetadataDocument) -> Self {
        self.documents.insert(path.map(str::to_string), document);
        self
    }

    #[allow(dead_code)]
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataTransport for CountingTransport {
    async fn fetch_latest_metadata(
        &self,
        request: &FetchRequest,
    ) -> Result<MetadataDocument, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.documents
            .get(&request.path)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                status: 404,
                message: "no metadata for path".to_string(),
            })
    }
}

// ============================================================================
// Recording Hook
// ============================================================================

/// Revalidation hook that records every call.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingHook {
    calls: Mutex<Vec<Option<String>>>,
}

impl RecordingHook {
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RevalidateHook for RecordingHook {
    async fn revalidate(&self, path: Option<&str>) -> Result<(), RevalidateError> {
        self.calls.lock().unwrap().push(path.map(str::to_string));
        Ok(())
    }
}

// ============================================================================
// Request Builders
// ============================================================================

#[allow(dead_code)]
pub fn signed_webhook(body: &str, timestamp: &str) -> Request<Body> {
    let signature = signature_header(SECRET, timestamp, body.as_bytes()).unwrap();
    Request::builder()
        .method("POST")
        .uri(DEFAULT_BASE_PATH)
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .header(TIMESTAMP_HEADER, timestamp)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn bearer_webhook(body: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(DEFAULT_BASE_PATH)
        .header("content-type", "application/json")
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request through the router and decode the JSON body.
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
