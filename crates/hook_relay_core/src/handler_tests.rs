//! Tests for the webhook handler orchestration.

use super::*;

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::signature;

const SECRET: &str = "test-secret";

/// In-memory trigger that records calls and fails the configured
/// pipelines.
#[derive(Default)]
struct RecordingTrigger {
    calls: Mutex<Vec<String>>,
    failing: BTreeSet<String>,
}

impl RecordingTrigger {
    fn with_failures(pipelines: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: pipelines.iter().map(|name| name.to_string()).collect(),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PipelineTrigger for RecordingTrigger {
    async fn trigger(&self, pipeline: &str) -> Result<(), pipeline_client::Error> {
        self.calls.lock().unwrap().push(pipeline.to_string());

        if self.failing.contains(pipeline) {
            Err(pipeline_client::Error::RequestFailed {
                pipeline: pipeline.to_string(),
                reason: "connection refused".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Configuration with frontend and backend rules on branch `main`.
fn test_config() -> Arc<WebhookConfig> {
    Arc::new(
        WebhookConfig::from_vars(vec![
            ("GITHUB_WEBHOOK_SECRET".to_string(), SECRET.to_string()),
            (
                "TARGET_GITHUB_REPOSITORY_BRANCH".to_string(),
                "main".to_string(),
            ),
            (
                "TARGET_PIPELINE_NAME_0".to_string(),
                "deploy-frontend".to_string(),
            ),
            ("TARGET_PIPELINE_REGEXP_0".to_string(), "^web/".to_string()),
            (
                "TARGET_PIPELINE_NAME_1".to_string(),
                "deploy-backend".to_string(),
            ),
            (
                "TARGET_PIPELINE_REGEXP_1".to_string(),
                "^server/".to_string(),
            ),
        ])
        .unwrap(),
    )
}

/// A signed push delivery touching the given paths, one commit per path.
fn push_request(paths: &[&str]) -> WebhookRequest {
    let commits: Vec<serde_json::Value> = paths
        .iter()
        .map(|path| {
            serde_json::json!({
                "added": [path],
                "removed": [],
                "modified": [],
            })
        })
        .collect();

    let body = serde_json::json!({
        "ref": "refs/heads/main",
        "commits": commits,
    })
    .to_string();

    WebhookRequest::new(
        Some(signature::sign(SECRET, &body)),
        Some("push".to_string()),
        Some("delivery-1".to_string()),
        body,
    )
}

// ============================================================================
// Success paths
// ============================================================================

#[tokio::test]
async fn test_matching_delivery_triggers_selected_pipelines() {
    let trigger = Arc::new(RecordingTrigger::default());
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));

    let report = handler
        .handle(&push_request(&["web/app.js", "server/main.rs"]))
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(
        report.triggered,
        vec!["deploy-backend".to_string(), "deploy-frontend".to_string()]
    );
    assert_eq!(trigger.calls().len(), 2);
}

/// An empty selection is a success with no collaborator calls.
#[tokio::test]
async fn test_no_matching_paths_triggers_nothing() {
    let trigger = Arc::new(RecordingTrigger::default());
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));

    let report = handler
        .handle(&push_request(&["docs/readme.md"]))
        .await
        .unwrap();

    assert!(report.is_success());
    assert!(report.triggered.is_empty());
    assert!(trigger.calls().is_empty());
}

/// Several touched paths matching the same rule trigger the pipeline
/// once.
#[tokio::test]
async fn test_each_selected_pipeline_is_attempted_exactly_once() {
    let trigger = Arc::new(RecordingTrigger::default());
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));

    let report = handler
        .handle(&push_request(&["web/app.js", "web/style.css"]))
        .await
        .unwrap();

    assert_eq!(report.triggered, vec!["deploy-frontend".to_string()]);
    assert_eq!(trigger.calls(), vec!["deploy-frontend".to_string()]);
}

// ============================================================================
// Failure collection
// ============================================================================

/// A failing pipeline does not prevent the others from being attempted.
#[tokio::test]
async fn test_failures_are_collected_not_fail_fast() {
    let trigger = Arc::new(RecordingTrigger::with_failures(&["deploy-backend"]));
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));

    let report = handler
        .handle(&push_request(&["web/app.js", "server/main.rs"]))
        .await
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.triggered, vec!["deploy-frontend".to_string()]);
    assert_eq!(report.failed_requests.len(), 1);
    assert_eq!(report.failed_requests[0].request.name, "deploy-backend");
    assert!(report.failed_requests[0]
        .error
        .contains("connection refused"));
    assert_eq!(trigger.calls().len(), 2);
}

#[tokio::test]
async fn test_all_failures_are_reported() {
    let trigger = Arc::new(RecordingTrigger::with_failures(&[
        "deploy-backend",
        "deploy-frontend",
    ]));
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));

    let report = handler
        .handle(&push_request(&["web/app.js", "server/main.rs"]))
        .await
        .unwrap();

    assert!(report.triggered.is_empty());
    assert_eq!(report.failed_requests.len(), 2);
}

// ============================================================================
// Validation short-circuit
// ============================================================================

/// A rejected delivery never reaches the trigger collaborator.
#[tokio::test]
async fn test_validation_failure_attempts_no_triggers() {
    let trigger = Arc::new(RecordingTrigger::default());
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));

    let mut request = push_request(&["web/app.js"]);
    request.signature = Some("sha256=0000".to_string());

    let error = handler.handle(&request).await.unwrap_err();

    assert_eq!(error, ValidationError::SignatureMismatch);
    assert!(trigger.calls().is_empty());
}

/// Identical input and configuration produce an identical outcome.
#[tokio::test]
async fn test_handling_is_deterministic() {
    let trigger = Arc::new(RecordingTrigger::default());
    let handler = WebhookHandler::new(test_config(), Arc::clone(&trigger));
    let request = push_request(&["web/app.js"]);

    let first = handler.handle(&request).await.unwrap();
    let second = handler.handle(&request).await.unwrap();

    assert_eq!(first, second);
}
