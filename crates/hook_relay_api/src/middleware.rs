//! Request middleware
//!
//! The webhook endpoint authenticates deliveries with the HMAC payload
//! signature rather than bearer tokens, so the only middleware here is the
//! request tracing layer.

use axum::{extract::Request, response::Response, middleware::Next};

/// Request tracing middleware.
///
/// Adds a per-request ID and start/finish events for observability.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    // Generate request ID
    let request_id = uuid::Uuid::new_v4().to_string();

    // Log request start
    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    response
}
