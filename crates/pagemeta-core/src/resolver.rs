//! Metadata resolution with caching and graceful degradation.
//!
//! Resolution per call:
//! 1. No DSN configured: return an empty document, touch neither cache nor
//!    network.
//! 2. Normalize the path and look it up in the cache; a hit returns
//!    immediately.
//! 3. On a miss, call the transport. Success populates the cache. Any
//!    failure (error, error-shaped response, panic inside the transport)
//!    is logged and reported as `None`, and nothing is cached.
//!
//! Concurrent misses for the same path each fetch independently; the last
//! write wins with an equivalent document.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, instrument, warn};

use crate::cache::{CacheKey, MetadataCache};
use crate::config::ClientConfig;
use crate::document::MetadataDocument;
use crate::error::TransportError;
use crate::transport::{FetchRequest, HttpTransport, MetadataTransport};

/// Shared resolver, cache and credentials for framework adapters.
///
/// Clones share the same cache. A new client starts with an empty cache,
/// which is the supported way to force full invalidation in-process.
///
/// # Examples
///
/// ```rust,no_run
/// use pagemeta_core::{ClientConfig, MetadataClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MetadataClient::new(ClientConfig::default().with_dsn("site_123"))?;
///
/// match client.resolve(Some("/blog/hello"), None).await {
///     Some(doc) => println!("title: {:?}", doc.title),
///     None => println!("using fallback metadata only"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MetadataClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    cache: MetadataCache,
    transport: Arc<dyn MetadataTransport>,
}

impl MetadataClient {
    /// Create a client that talks to the PageMeta API over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Configuration` if the HTTP transport cannot
    /// be built from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with an injected transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn MetadataTransport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                cache: MetadataCache::new(),
                transport,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.inner.cache
    }

    /// Resolve the metadata document for `path`.
    ///
    /// `auth_token` overrides the configured API key for this call. Returns
    /// `None` when the service could not provide a document; callers then
    /// render fallback metadata only.
    #[instrument(skip(self, auth_token))]
    pub async fn resolve(
        &self,
        path: Option<&str>,
        auth_token: Option<&str>,
    ) -> Option<MetadataDocument> {
        let config = &self.inner.config;

        let dsn = match config.dsn.as_deref() {
            Some(dsn) if !dsn.is_empty() => dsn,
            _ => {
                if config.debug {
                    debug!("No DSN configured; returning empty metadata");
                }
                return Some(MetadataDocument::default());
            }
        };

        let key = CacheKey::for_path(path);
        if let Some(cached) = self.inner.cache.get(&key) {
            if config.debug {
                debug!(key = %key, "Metadata cache hit");
            }
            return Some(cached);
        }

        if config.debug {
            debug!(key = %key, "Metadata cache miss; fetching");
        }

        let request = FetchRequest {
            dsn: dsn.to_string(),
            path: key.path().map(str::to_string),
            auth_header: auth_token
                .or(config.api_key.as_deref())
                .map(|token| format!("Bearer {}", token)),
        };

        let fetched = AssertUnwindSafe(self.inner.transport.fetch_latest_metadata(&request))
            .catch_unwind()
            .await;

        match fetched {
            Ok(Ok(document)) => {
                self.inner.cache.insert(key, document.clone());
                Some(document)
            }
            Ok(Err(e)) => {
                warn!(
                    key = %key,
                    error = %e,
                    transient = e.is_transient(),
                    "Failed to fetch metadata; falling back"
                );
                None
            }
            Err(_) => {
                warn!(key = %key, "Metadata transport panicked; falling back");
                None
            }
        }
    }

    /// Drop the cached document for `path`, or every entry when `path` is
    /// `None`.
    pub fn invalidate(&self, path: Option<&str>) {
        let debug = self.inner.config.debug;
        match path {
            Some(path) => {
                let key = CacheKey::for_path(Some(path));
                let removed = self.inner.cache.remove(&key);
                if debug {
                    debug!(key = %key, removed, "Invalidated cached metadata");
                }
            }
            None => {
                self.inner.cache.clear();
                if debug {
                    debug!("Cleared all cached metadata");
                }
            }
        }
    }
}

impl std::fmt::Debug for MetadataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataClient")
            .field("config", &self.inner.config)
            .field("cached_entries", &self.inner.cache.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
