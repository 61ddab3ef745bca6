//! Transport capability for fetching metadata documents.
//!
//! The resolver only knows about [`MetadataTransport`]. Two implementations
//! are provided:
//!
//! - [`HttpTransport`] calls the PageMeta API directly with `reqwest`.
//! - [`ProxyTransport`] forwards the call through a caller-supplied async
//!   function, for frameworks that route network access through their own
//!   server-function boundary.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::document::MetadataDocument;
use crate::error::TransportError;

/// Path of the metadata endpoint relative to the API base URL.
pub const METADATA_ENDPOINT: &str = "v1/metadata";

/// A single metadata fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Site identifier
    pub dsn: String,
    /// Normalized path, or `None` for root/layout metadata
    pub path: Option<String>,
    /// Full `Authorization` header value, when a credential is configured
    pub auth_header: Option<String>,
}

// Security: Don't expose credentials in debug output
impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("dsn", &self.dsn)
            .field("path", &self.path)
            .field("auth_header", &self.auth_header.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Capability to fetch the latest metadata document for a path.
///
/// Implementations own their timeouts. Errors are recovered by the resolver
/// and never reach page rendering.
#[async_trait]
pub trait MetadataTransport: Send + Sync {
    async fn fetch_latest_metadata(
        &self,
        request: &FetchRequest,
    ) -> Result<MetadataDocument, TransportError>;
}

// ============================================================================
// HttpTransport
// ============================================================================

/// Direct HTTP transport against the PageMeta API.
///
/// Issues `GET {api_url}/v1/metadata?dsn=<dsn>&path=<path>`. A `null` body
/// is reported as [`TransportError::EmptyResponse`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Configuration` if the API URL is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let base = format!("{}/", config.api_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join(METADATA_ENDPOINT))
            .map_err(|e| TransportError::Configuration {
                message: format!("Invalid API URL '{}': {}", config.api_url, e),
            })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TransportError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, endpoint })
    }

    /// The fully resolved metadata endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, request: &FetchRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("dsn", &request.dsn);
            if let Some(path) = &request.path {
                query.append_pair("path", path);
            }
        }
        url
    }
}

#[async_trait]
impl MetadataTransport for HttpTransport {
    #[instrument(skip(self))]
    async fn fetch_latest_metadata(
        &self,
        request: &FetchRequest,
    ) -> Result<MetadataDocument, TransportError> {
        let mut builder = self
            .http
            .get(self.request_url(request))
            .header(ACCEPT, "application/json");

        if let Some(auth) = &request.auth_header {
            builder = builder.header(AUTHORIZATION, auth.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), "Received metadata response");

        response
            .json::<Option<MetadataDocument>>()
            .await?
            .ok_or(TransportError::EmptyResponse)
    }
}

// ============================================================================
// ProxyTransport
// ============================================================================

type ProxyCall =
    dyn Fn(FetchRequest) -> BoxFuture<'static, Result<MetadataDocument, TransportError>> + Send + Sync;

/// Transport that delegates to an injected async function.
///
/// # Examples
///
/// ```rust
/// use pagemeta_core::{MetadataDocument, ProxyTransport};
///
/// let transport = ProxyTransport::new(|request| async move {
///     // e.g. call into a framework server function here
///     Ok(MetadataDocument {
///         title: request.path,
///         ..MetadataDocument::default()
///     })
/// });
/// ```
#[derive(Clone)]
pub struct ProxyTransport {
    call: Arc<ProxyCall>,
}

impl ProxyTransport {
    pub fn new<F, Fut>(call: F) -> Self
    where
        F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<MetadataDocument, TransportError>> + Send + 'static,
    {
        Self {
            call: Arc::new(move |request| call(request).boxed()),
        }
    }
}

impl std::fmt::Debug for ProxyTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataTransport for ProxyTransport {
    async fn fetch_latest_metadata(
        &self,
        request: &FetchRequest,
    ) -> Result<MetadataDocument, TransportError> {
        (self.call)(request.clone()).await
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
