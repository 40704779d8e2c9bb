//! Tests for the HTTP pipeline client.

use super::*;

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a client against a mock server with a generous timeout.
fn client_for(server: &MockServer, token: Option<&str>) -> HttpPipelineClient {
    HttpPipelineClient::new(
        Url::parse(&server.uri()).unwrap(),
        token.map(|value| SecretString::from(value.to_string())),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_trigger_posts_to_execution_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pipelines/deploy-frontend/executions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    client.trigger("deploy-frontend").await.unwrap();
}

#[tokio::test]
async fn test_trigger_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pipelines/deploy-backend/executions"))
        .and(header("authorization", "Bearer api-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("api-token"));

    client.trigger("deploy-backend").await.unwrap();
}

/// A base URL with a trailing slash produces the same endpoint.
#[tokio::test]
async fn test_trigger_tolerates_trailing_slash_in_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pipelines/deploy-docs/executions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/", server.uri())).unwrap();
    let client = HttpPipelineClient::new(base, None, Duration::from_secs(5)).unwrap();

    client.trigger("deploy-docs").await.unwrap();
}

#[tokio::test]
async fn test_trigger_non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pipelines/deploy-frontend/executions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    let error = client.trigger("deploy-frontend").await.unwrap_err();

    assert_eq!(
        error,
        Error::ApiRequestFailed {
            pipeline: "deploy-frontend".to_string(),
            status: 503,
            body: "maintenance window".to_string(),
        }
    );
}

/// A response slower than the configured timeout becomes a per-pipeline
/// timeout error rather than hanging the handler.
#[tokio::test]
async fn test_trigger_timeout_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pipelines/deploy-frontend/executions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = HttpPipelineClient::new(
        Url::parse(&server.uri()).unwrap(),
        None,
        Duration::from_millis(50),
    )
    .unwrap();

    let error = client.trigger("deploy-frontend").await.unwrap_err();

    assert_eq!(
        error,
        Error::Timeout {
            pipeline: "deploy-frontend".to_string(),
        }
    );
}

#[tokio::test]
async fn test_trigger_connection_failure_is_reported() {
    // Bind and immediately drop a server so the port is very likely closed.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpPipelineClient::new(
        Url::parse(&uri).unwrap(),
        None,
        Duration::from_secs(1),
    )
    .unwrap();

    let error = client.trigger("deploy-frontend").await.unwrap_err();

    match error {
        Error::RequestFailed { pipeline, .. } => assert_eq!(pipeline, "deploy-frontend"),
        Error::Timeout { pipeline } => assert_eq!(pipeline, "deploy-frontend"),
        other => panic!("Expected a transport error, got {other:?}"),
    }
}
