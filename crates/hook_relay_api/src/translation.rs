//! Domain outcome to HTTP response translation
//!
//! Domain errors from `hook_relay_core` are converted to HTTP responses at
//! this boundary: validation failures become plain-text 4xx responses,
//! trigger outcomes become JSON. The status mapping is part of the
//! observable contract and is deliberately asymmetric (see
//! [`validation_status`]).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use hook_relay_core::{TriggerFailure, TriggerReport, ValidationError, WebhookRequest};

#[cfg(test)]
#[path = "translation_tests.rs"]
mod tests;

/// Maps a validation error to its HTTP status code.
///
/// Every rejection is 401 except two: a missing `X-GitHub-Event` header is
/// 422, and a malformed payload is 400. Senders key redelivery tooling off
/// these codes, so the mapping must stay stable.
pub fn validation_status(error: &ValidationError) -> StatusCode {
    match error {
        ValidationError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
        ValidationError::MissingEventHeader => StatusCode::UNPROCESSABLE_ENTITY,
        ValidationError::RefMismatch { .. }
        | ValidationError::MissingSignature
        | ValidationError::MissingDeliveryId
        | ValidationError::SignatureMismatch
        | ValidationError::UnsupportedEvent { .. } => StatusCode::UNAUTHORIZED,
    }
}

/// Renders a validation failure as the plain-text response the sender
/// sees.
pub fn validation_error_response(error: &ValidationError) -> Response {
    let status = validation_status(error);

    tracing::warn!(status = %status, error = %error, "Rejected webhook delivery");

    (
        status,
        [(header::CONTENT_TYPE, "text/plain")],
        error.to_string(),
    )
        .into_response()
}

/// Success body: echoes the validated delivery under `input`.
#[derive(Debug, Serialize)]
struct AcceptedResponse<'a> {
    input: &'a WebhookRequest,
}

/// Failure body: one entry per pipeline whose trigger failed.
#[derive(Debug, Serialize)]
struct FailedTriggersResponse {
    failed_requests: Vec<TriggerFailure>,
}

/// Renders the trigger-phase outcome.
///
/// All triggers succeeded (or nothing was selected): 200 with the original
/// delivery under `input`. At least one trigger failed: 500 with a
/// `failed_requests` entry per failure.
pub fn trigger_outcome_response(request: &WebhookRequest, report: TriggerReport) -> Response {
    if report.is_success() {
        (StatusCode::OK, Json(AcceptedResponse { input: request })).into_response()
    } else {
        tracing::warn!(
            failed_count = report.failed_requests.len(),
            triggered_count = report.triggered.len(),
            "Some pipeline triggers failed"
        );

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FailedTriggersResponse {
                failed_requests: report.failed_requests,
            }),
        )
            .into_response()
    }
}
