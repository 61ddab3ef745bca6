//! Configuration types for the standalone webhook service
//!
//! Sources, applied in order (later sources override earlier ones):
//! 1. `config/pagemeta.yaml`, if present
//! 2. The file named by `PAGEMETA_CONFIG_FILE`, which must exist when set
//! 3. Environment variables prefixed `PAGEMETA__` with `__` as the section
//!    separator, e.g. `PAGEMETA__WEBHOOK__SECRET`
//!
//! Every field has a default, so an unconfigured environment still loads.
//! A missing webhook secret is not a load error; the router answers `500`
//! until one is provided.

use std::time::Duration;

use pagemeta_core::{config::DEFAULT_API_URL, ClientConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConfigError;
use crate::WebhookOptions;

/// Default route for the revalidation webhook.
pub const DEFAULT_BASE_PATH: &str = "/api/pagemeta/revalidate";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "PAGEMETA_CONFIG_FILE";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "PAGEMETA";

const DEFAULT_CONFIG_FILE: &str = "config/pagemeta";

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Outbound metadata client settings
    pub client: ClientSettings,

    /// Webhook settings
    pub webhook: WebhookConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from the default file, the file named by
    /// `PAGEMETA_CONFIG_FILE` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|path| !path.is_empty());
        Self::load_from(explicit.as_deref())
    }

    /// Load configuration with `explicit_file` in place of
    /// `PAGEMETA_CONFIG_FILE`.
    pub fn load_from(explicit_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder().add_source(
            ::config::File::with_name(DEFAULT_CONFIG_FILE)
                .required(false)
                .format(::config::FileFormat::Yaml),
        );

        if let Some(path) = explicit_file {
            info!(path = %path, "Loading configuration from explicit path");
            builder = builder.add_source(::config::File::with_name(path).required(true));
        }

        let config: Self = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_path = &self.webhook.base_path;
        if base_path.is_empty() {
            return Err(invalid("webhook.base_path must not be empty"));
        }
        if !base_path.starts_with('/') {
            return Err(invalid(format!(
                "webhook.base_path must start with '/': {}",
                base_path
            )));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port must not be 0"));
        }
        if self.server.max_body_size == 0 {
            return Err(invalid("server.max_body_size must be greater than 0"));
        }
        Ok(())
    }

    /// Client configuration for the metadata resolver.
    pub fn client_config(&self) -> ClientConfig {
        let settings = &self.client;
        let mut config = ClientConfig::default()
            .with_api_url(settings.api_url.clone())
            .with_timeout(Duration::from_secs(settings.timeout_seconds))
            .with_debug(settings.debug);
        if let Some(dsn) = &settings.dsn {
            config = config.with_dsn(dsn.clone());
        }
        if let Some(api_key) = &settings.api_key {
            config = config.with_api_key(api_key.clone());
        }
        config
    }

    /// Router options for the webhook.
    pub fn webhook_options(&self) -> WebhookOptions {
        let webhook = &self.webhook;
        WebhookOptions {
            base_path: webhook.base_path.clone(),
            secret: webhook.secret.clone(),
            rewrite: None,
            timestamp_tolerance: webhook.timestamp_tolerance_seconds.map(Duration::from_secs),
            max_body_size: self.server.max_body_size,
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,

    /// Maximum request size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_seconds: 30,
            max_body_size: crate::DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Outbound metadata client settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Site identifier; absent means development mode
    pub dsn: Option<String>,

    pub api_key: Option<String>,

    pub api_url: String,

    pub timeout_seconds: u64,

    pub debug: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            dsn: None,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 10,
            debug: false,
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("dsn", &self.dsn)
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("api_url", &self.api_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Webhook configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Webhook endpoint path
    pub base_path: String,

    /// Shared secret for HMAC and bearer authentication
    pub secret: Option<String>,

    /// Reject signatures older than this; unset disables the check
    pub timestamp_tolerance_seconds: Option<u64>,

    /// Downstream endpoint notified of each revalidation
    pub forward_url: Option<String>,

    /// Bearer token sent to `forward_url`
    pub forward_token: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            secret: None,
            timestamp_tolerance_seconds: None,
            forward_url: None,
            forward_token: None,
        }
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("base_path", &self.base_path)
            .field("secret", &self.secret.as_ref().map(|_| "<REDACTED>"))
            .field(
                "timestamp_tolerance_seconds",
                &self.timestamp_tolerance_seconds,
            )
            .field("forward_url", &self.forward_url)
            .field(
                "forward_token",
                &self.forward_token.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
