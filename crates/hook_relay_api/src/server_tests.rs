//! Tests for server configuration.

use super::*;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use config_manager::WebhookConfig;
use hook_relay_core::WebhookHandler;
use pipeline_client::HttpPipelineClient;

fn test_state() -> AppState {
    let config = WebhookConfig::from_vars(vec![
        ("GITHUB_WEBHOOK_SECRET".to_string(), "secret".to_string()),
        (
            "TARGET_GITHUB_REPOSITORY_BRANCH".to_string(),
            "main".to_string(),
        ),
    ])
    .unwrap();

    let client = HttpPipelineClient::new(
        Url::parse("http://127.0.0.1:9").unwrap(),
        None,
        Duration::from_secs(1),
    )
    .unwrap();

    AppState {
        handler: Arc::new(WebhookHandler::new(Arc::new(config), client)),
    }
}

#[test]
fn test_default_config_binds_all_interfaces_on_default_port() {
    let config = ApiConfig::default();

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.host, "0.0.0.0");
}

#[test]
fn test_server_builds_router() {
    let server = ApiServer::new(ApiConfig::default(), test_state());

    // Building the router must not panic; route behaviour is covered by
    // the routes and handlers tests.
    let _router = server.router();
}
