//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Default PageMeta API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pagemeta.dev";

/// Configuration for a [`MetadataClient`](crate::MetadataClient).
///
/// Without a DSN the client runs in development mode: every resolution
/// returns an empty document and no request is made.
///
/// # Examples
///
/// ```
/// use pagemeta_core::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_dsn("site_123")
///     .with_api_key("pk_live_abc")
///     .with_timeout(Duration::from_secs(5));
///
/// assert!(!config.is_development_mode());
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Site identifier; `None` activates development mode
    pub dsn: Option<String>,
    /// Optional bearer credential for outbound fetches
    pub api_key: Option<String>,
    /// PageMeta API base URL
    pub api_url: String,
    /// Request timeout for the HTTP transport
    pub timeout: Duration,
    /// User agent string for API requests
    pub user_agent: String,
    /// Emit resolver diagnostics (cache hits, misses, dev-mode short-circuits)
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("pagemeta-core/", env!("CARGO_PKG_VERSION")).to_string(),
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Set the site DSN.
    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(dsn.into());
        self
    }

    /// Set the API key sent as a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable resolver diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns `true` when no (non-empty) DSN is configured.
    pub fn is_development_mode(&self) -> bool {
        self.dsn.as_deref().map_or(true, str::is_empty)
    }
}

// Security: Don't expose credentials in debug output
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("dsn", &self.dsn)
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
