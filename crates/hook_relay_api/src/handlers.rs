//! HTTP request handlers
//!
//! This module contains the request handlers for the webhook and health
//! endpoints. The webhook handler translates the raw HTTP request into the
//! typed delivery the domain layer expects, runs it through the core
//! handler, and translates the outcome back to an HTTP response.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use hook_relay_core::{WebhookRequest, HEADER_DELIVERY, HEADER_EVENT, HEADER_SIGNATURE};

use crate::{translation, AppState};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// POST /api/v1/webhooks/github
///
/// Receives one webhook delivery, validates it, triggers every pipeline
/// whose path pattern matches a touched file, and reports the outcome:
///
/// - 200 with the delivery echoed under `input` when every trigger
///   succeeded (including when nothing was selected)
/// - 500 with `failed_requests` when at least one trigger failed
/// - 400/401/422 with a plain-text message when validation rejected the
///   delivery
pub async fn receive_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = webhook_request_from_parts(&headers, &body);

    match state.handler.handle(&request).await {
        Ok(report) => translation::trigger_outcome_response(&request, report),
        Err(error) => translation::validation_error_response(&error),
    }
}

/// Builds the typed delivery from the raw HTTP parts.
///
/// Header lookups are case-insensitive. A header that is present but not
/// valid UTF-8 is treated as absent; a body that is not valid UTF-8 is
/// replaced lossily and will fail signature verification downstream.
fn webhook_request_from_parts(headers: &HeaderMap, body: &[u8]) -> WebhookRequest {
    WebhookRequest::new(
        header_value(headers, HEADER_SIGNATURE),
        header_value(headers, HEADER_EVENT),
        header_value(headers, HEADER_DELIVERY),
        String::from_utf8_lossy(body).into_owned(),
    )
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Health check response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status, always "healthy" when the handler runs
    pub status: String,

    /// Crate version
    pub version: String,

    /// Current time (RFC 3339)
    pub timestamp: String,
}

/// GET /api/v1/health
///
/// Liveness probe; requires no authentication.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
