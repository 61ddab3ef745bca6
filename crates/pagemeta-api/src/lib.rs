//! # PageMeta API
//!
//! Webhook app that lets the PageMeta service invalidate cached metadata.
//!
//! This crate provides:
//! - A router factory mounting the revalidation webhook on a base path
//! - HMAC-then-bearer authentication of webhook deliveries
//! - Dispatch of `metadata_update` events to the client cache and the
//!   framework revalidation hook
//! - Service configuration loading for standalone hosting

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{HeaderMap, Method},
    middleware::{self, Next},
    response::{Json, Response},
    routing::any,
    Router,
};
use bytes::Bytes;
use pagemeta_core::{normalize_path, FrameworkAdapter, MetadataClient, RevalidateHook};
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};

pub mod auth;
pub mod config;
pub mod errors;
pub mod payload;
pub mod responses;

pub use auth::{AuthMethod, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use self::config::{
    ClientSettings, LoggingConfig, ServerConfig, ServiceConfig, WebhookConfig, DEFAULT_BASE_PATH,
};
pub use errors::{ConfigError, ServiceError, WebhookHandlerError};
pub use payload::{SiteInfo, WebhookPayload, METADATA_UPDATE};
pub use responses::{ErrorMetadata, ErrorResponse, RevalidationMetadata, WebhookResponse};

/// Default request body limit for webhook deliveries.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Caller-supplied mapping from a normalized webhook path to the path the
/// framework should revalidate. Returning `None` keeps the original path.
pub type PathRewrite = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

// ============================================================================
// Webhook Options
// ============================================================================

/// Options for the webhook router.
#[derive(Clone)]
pub struct WebhookOptions {
    /// Route the webhook is mounted on
    pub base_path: String,

    /// Shared secret for HMAC and bearer authentication. Without it every
    /// request is rejected with `500`.
    pub secret: Option<String>,

    pub rewrite: Option<PathRewrite>,

    /// Maximum age of a signed timestamp; `None` disables the check
    pub timestamp_tolerance: Option<Duration>,

    pub max_body_size: usize,
}

impl WebhookOptions {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_rewrite<F>(mut self, rewrite: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.rewrite = Some(Arc::new(rewrite));
        self
    }

    pub fn with_timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.timestamp_tolerance = Some(tolerance);
        self
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    fn configured_secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|secret| !secret.is_empty())
    }
}

impl Default for WebhookOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            secret: None,
            rewrite: None,
            timestamp_tolerance: None,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl std::fmt::Debug for WebhookOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookOptions")
            .field("base_path", &self.base_path)
            .field("secret", &self.secret.as_ref().map(|_| "<REDACTED>"))
            .field("rewrite", &self.rewrite.is_some())
            .field("timestamp_tolerance", &self.timestamp_tolerance)
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: MetadataClient,
    pub hook: Arc<dyn RevalidateHook>,
    pub options: Arc<WebhookOptions>,
}

impl AppState {
    pub fn new(
        client: MetadataClient,
        hook: Arc<dyn RevalidateHook>,
        options: WebhookOptions,
    ) -> Self {
        Self {
            client,
            hook,
            options: Arc::new(options),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the webhook router.
///
/// Every method on `options.base_path` reaches the webhook handler; only
/// `POST` can trigger a revalidation. Other routes answer `404`, or `500`
/// while no secret is configured.
///
/// # Panics
///
/// Panics if `options.base_path` is not a valid axum route (for example,
/// it does not start with `/`). [`ServiceConfig::validate`] rejects such
/// paths up front.
pub fn create_router(
    client: MetadataClient,
    hook: Arc<dyn RevalidateHook>,
    options: WebhookOptions,
) -> Router {
    let base_path = options.base_path.clone();
    let max_body_size = options.max_body_size;
    let state = AppState::new(client, hook, options);

    Router::new()
        .route(&base_path, any(handle_webhook))
        .fallback(handle_unmatched)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), require_secret))
                .layer(DefaultBodyLimit::max(max_body_size))
                .into_inner(),
        )
        .with_state(state)
}

/// Create the webhook router for a framework adapter, sharing its client
/// cache and revalidation hook.
pub fn create_adapter_router<A: FrameworkAdapter>(adapter: &A, options: WebhookOptions) -> Router {
    create_router(adapter.client().clone(), adapter.revalidate_hook(), options)
}

/// Serve the webhook router until SIGINT or SIGTERM.
pub async fn start_server(
    config: ServiceConfig,
    client: MetadataClient,
    hook: Arc<dyn RevalidateHook>,
) -> Result<(), ServiceError> {
    let app = create_router(client, hook, config.webhook_options());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e: std::net::AddrParseError| {
            ServiceError::Configuration(ConfigError::Invalid {
                message: format!("Invalid listen address: {}", e),
            })
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServiceError::BindFailed {
            address: addr.to_string(),
            message: e.to_string(),
        })?;

    info!(
        address = %addr,
        base_path = %config.webhook.base_path,
        "Starting PageMeta webhook server"
    );

    let shutdown = Arc::new(Notify::new());
    let server = {
        let shutdown = Arc::clone(&shutdown);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .into_future()
    };
    let mut server = tokio::spawn(server);

    tokio::select! {
        joined = &mut server => return server_result(joined),
        _ = shutdown_signal() => shutdown.notify_one(),
    }

    let grace = Duration::from_secs(config.server.shutdown_timeout_seconds);
    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => server_result(joined)?,
        Err(_) => {
            warn!(
                timeout_seconds = grace.as_secs(),
                "Graceful shutdown timed out; aborting in-flight requests"
            );
            server.abort();
        }
    }

    info!("HTTP server shutdown complete");
    Ok(())
}

fn server_result(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), ServiceError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ServiceError::ServerFailed {
            message: e.to_string(),
        }),
        Err(e) => Err(ServiceError::ServerFailed {
            message: e.to_string(),
        }),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

// ============================================================================
// Webhook Handlers
// ============================================================================

/// Handle a revalidation webhook delivery.
///
/// Order of checks: secret configured, method, credentials, payload. Nothing
/// is invalidated unless every check passes.
#[instrument(skip(state, headers, body))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookHandlerError> {
    let secret = state
        .options
        .configured_secret()
        .ok_or(WebhookHandlerError::NotConfigured)?;

    if method != Method::POST {
        return Err(WebhookHandlerError::NotFound);
    }

    let auth_method = auth::authenticate(&headers, &body, secret, state.options.timestamp_tolerance)
        .ok_or(WebhookHandlerError::Unauthorized)?;
    debug!(auth_method = ?auth_method, "Webhook authenticated");

    let payload: WebhookPayload =
        serde_json::from_slice(&body).map_err(|e| WebhookHandlerError::InvalidPayload {
            message: e.to_string(),
        })?;

    if !payload.is_metadata_update() {
        debug!(kind = %payload.kind, "Ignoring webhook event type");
        return Ok(Json(WebhookResponse::ignored()));
    }

    let path = resolve_target_path(payload.path.as_deref(), state.options.rewrite.as_ref());

    state.client.invalidate(path.as_deref());
    state
        .hook
        .revalidate(path.as_deref())
        .await
        .map_err(WebhookHandlerError::RevalidationFailed)?;

    info!(path = ?path, "Revalidated metadata");
    Ok(Json(WebhookResponse::revalidated(path)))
}

async fn handle_unmatched() -> WebhookHandlerError {
    WebhookHandlerError::NotFound
}

/// Reject every request with `500` while no secret is configured.
///
/// Runs before any extractor reads the body, so neither the route, the
/// method nor the body size can change the answer.
async fn require_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, WebhookHandlerError> {
    if state.options.configured_secret().is_none() {
        return Err(WebhookHandlerError::NotConfigured);
    }
    Ok(next.run(request).await)
}

/// Normalize the webhook path and apply the rewrite.
///
/// The rewrite only sees present paths. Its result is normalized again; a
/// rewrite that returns `None` (or a path that normalizes to nothing) keeps
/// the normalized original.
pub fn resolve_target_path(path: Option<&str>, rewrite: Option<&PathRewrite>) -> Option<String> {
    let normalized = normalize_path(path)?;
    let Some(rewrite) = rewrite else {
        return Some(normalized);
    };

    match rewrite(normalized.as_str()).and_then(|rewritten| normalize_path(Some(&rewritten))) {
        Some(rewritten) => Some(rewritten),
        None => Some(normalized),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
