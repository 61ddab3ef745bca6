//! # PageMeta Service
//!
//! Binary entry point for the standalone revalidation relay.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes structured logging
//! - Builds the metadata client and the forwarding revalidation hook
//! - Serves the webhook router from pagemeta-api until SIGINT/SIGTERM

mod forward_hook;

use std::sync::Arc;

use anyhow::Context;
use forward_hook::HttpRevalidateHook;
use pagemeta_api::{start_server, LoggingConfig, ServiceConfig};
use pagemeta_core::MetadataClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = ServiceConfig::load();
    let logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    init_tracing(&logging);

    let config = loaded.context("Failed to load service configuration")?;
    info!("Starting PageMeta Service");

    if config.webhook.secret.as_deref().unwrap_or_default().is_empty() {
        warn!("No webhook secret configured; every webhook request will be rejected with 500");
    }

    let client_config = config.client_config();
    if client_config.is_development_mode() {
        info!("No DSN configured; metadata client runs in development mode");
    }
    let timeout = client_config.timeout;
    let client = MetadataClient::new(client_config).context("Failed to build metadata client")?;

    let hook = HttpRevalidateHook::new(
        config.webhook.forward_url.as_deref(),
        config.webhook.forward_token.clone(),
        timeout,
    )
    .context("Failed to build revalidation hook")?;
    match hook.forward_url() {
        Some(url) => info!(forward_url = %url, "Forwarding revalidations"),
        None => info!("No forward URL configured; revalidations are only logged"),
    }

    start_server(config, client, Arc::new(hook))
        .await
        .context("Webhook server failed")?;

    info!("PageMeta Service stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pagemeta_service={level},pagemeta_api={level},pagemeta_core={level},tower_http=debug",
            level = logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json_format {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
