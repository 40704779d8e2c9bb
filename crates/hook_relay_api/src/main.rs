//! HookRelay Webhook API Server
//!
//! Main binary for running the webhook ingestion server in production or
//! development.
//!
//! # Environment Variables
//!
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RUST_LOG`: Log level (default: info)
//! - `GITHUB_WEBHOOK_SECRET`: Shared secret for signature verification
//! - `TARGET_GITHUB_REPOSITORY_BRANCH`: Branch pushes must target
//! - `TARGET_PIPELINE_NAME_<i>` / `TARGET_PIPELINE_REGEXP_<i>`: Pipeline
//!   selection rules, paired by integer index
//! - `PIPELINE_API_URL`: Base URL of the pipeline trigger API
//! - `PIPELINE_API_TOKEN`: Optional bearer token for the pipeline API
//! - `PIPELINE_TRIGGER_TIMEOUT_SECS`: Per-trigger timeout (default: 10)

use std::env;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

mod handlers;
mod middleware;
mod routes;
mod server;
mod translation;

use config_manager::WebhookConfig;
use hook_relay_core::WebhookHandler;
use pipeline_client::{HttpPipelineClient, DEFAULT_TRIGGER_TIMEOUT};
use server::{ApiConfig, ApiServer};

/// API version
pub const API_VERSION: &str = "v1";

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
///
/// Holds the webhook handler, which in turn owns the immutable process
/// configuration and the pipeline trigger client.
#[derive(Clone)]
pub struct AppState {
    /// Webhook handler driving validation, selection, and triggering
    pub handler: Arc<WebhookHandler<HttpPipelineClient>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    // Load webhook configuration; any defect here is startup-fatal rather
    // than a per-request error.
    let webhook_config = WebhookConfig::from_env()
        .map_err(|err| anyhow::anyhow!("Configuration error: {err}"))?;

    // Build the pipeline trigger client from environment
    let base_url = env::var("PIPELINE_API_URL")
        .map_err(|_| anyhow::anyhow!("Must provide a 'PIPELINE_API_URL' env variable"))?;
    let base_url = Url::parse(&base_url)
        .map_err(|err| anyhow::anyhow!("Invalid 'PIPELINE_API_URL': {err}"))?;

    let token = env::var("PIPELINE_API_TOKEN").ok().map(SecretString::from);

    let trigger_timeout = env::var("PIPELINE_TRIGGER_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TRIGGER_TIMEOUT);

    let trigger = HttpPipelineClient::new(base_url, token, trigger_timeout)
        .map_err(|err| anyhow::anyhow!("Failed to build pipeline client: {err}"))?;

    // Load server configuration from environment
    let config = ApiConfig {
        port: env::var("API_PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .expect("Invalid API_PORT"),
        host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
    };

    // Create app state and server
    let state = AppState {
        handler: Arc::new(WebhookHandler::new(Arc::new(webhook_config), trigger)),
    };
    let server = ApiServer::new(config, state);

    tracing::info!("Starting HookRelay API server");
    tracing::info!("API version: {}", API_VERSION);

    // Start server with graceful shutdown
    server.serve().await
}
