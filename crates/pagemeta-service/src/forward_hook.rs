//! Revalidation hook that relays each revalidation to a downstream endpoint.

use std::time::Duration;

use async_trait::async_trait;
use pagemeta_core::{RevalidateError, RevalidateHook};
use reqwest::Url;
use tracing::{info, instrument, warn};

/// Forwards revalidations as `POST {"path": <path|null>}`.
///
/// Without a forward URL the hook only logs, which is useful when the relay
/// runs in front of a framework that polls its own cache.
pub struct HttpRevalidateHook {
    http: reqwest::Client,
    forward_url: Option<Url>,
    token: Option<String>,
}

impl HttpRevalidateHook {
    /// # Errors
    ///
    /// Fails if `forward_url` is not a valid URL or the HTTP client cannot
    /// be built.
    pub fn new(
        forward_url: Option<&str>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RevalidateError> {
        let forward_url = forward_url
            .map(|url| {
                Url::parse(url).map_err(|e| {
                    RevalidateError::new(format!("Invalid forward URL '{}': {}", url, e))
                })
            })
            .transpose()?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RevalidateError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            forward_url,
            token,
        })
    }

    pub fn forward_url(&self) -> Option<&Url> {
        self.forward_url.as_ref()
    }
}

#[async_trait]
impl RevalidateHook for HttpRevalidateHook {
    #[instrument(skip(self))]
    async fn revalidate(&self, path: Option<&str>) -> Result<(), RevalidateError> {
        let Some(url) = &self.forward_url else {
            info!(path = ?path, "Revalidation requested; no forward URL configured");
            return Ok(());
        };

        let mut request = self
            .http
            .post(url.clone())
            .json(&serde_json::json!({ "path": path }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach revalidation endpoint");
            RevalidateError::new(format!("Forward request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Revalidation endpoint rejected request");
            return Err(RevalidateError::new(format!(
                "Forward endpoint returned {}",
                status
            )));
        }

        info!(path = ?path, "Forwarded revalidation");
        Ok(())
    }
}

impl std::fmt::Debug for HttpRevalidateHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRevalidateHook")
            .field("forward_url", &self.forward_url)
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

#[cfg(test)]
#[path = "forward_hook_tests.rs"]
mod tests;
