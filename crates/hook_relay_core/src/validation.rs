//! Request validation for inbound push deliveries.
//!
//! Validation is a fixed sequence of fail-fast checks. The order is
//! significant and observable: each step maps to a specific status code in
//! the API layer, so a request failing several checks at once is reported
//! with the first one in sequence.

use config_manager::WebhookConfig;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::{signature, PushEvent, WebhookRequest};

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;

/// The only event type this handler accepts.
pub const PUSH_EVENT: &str = "push";

/// Why an inbound delivery was rejected.
///
/// Display strings are the exact plain-text bodies returned to the sender,
/// so they name the offending values where that helps the operator (the
/// mismatched ref, the rejected event type).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body is not a valid push payload.
    #[error("Failed to parse push payload: {reason}")]
    MalformedPayload { reason: String },

    /// The push targeted a ref other than the configured branch.
    #[error("Ref {actual} is not equal to refs/heads/{branch}")]
    RefMismatch { actual: String, branch: String },

    /// The `X-Hub-Signature-256` header is absent.
    #[error("No X-Hub-Signature found on request")]
    MissingSignature,

    /// The `X-GitHub-Event` header is absent.
    ///
    /// The only validation failure reported as 422 rather than 401.
    #[error("No X-Github-Event found on request")]
    MissingEventHeader,

    /// The `X-GitHub-Delivery` header is absent.
    #[error("No X-Github-Delivery found on request")]
    MissingDeliveryId,

    /// The provided signature does not match the payload.
    #[error("X-Hub-Signature incorrect. Github webhook token doesn't match")]
    SignatureMismatch,

    /// The event type is present but is not `push`.
    #[error("Only push X-GitHub-Event is allowed")]
    UnsupportedEvent { event: String },
}

/// Runs the full validation sequence for one delivery.
///
/// # Arguments
///
/// * `request` - The typed delivery to validate.
/// * `config` - Immutable process configuration.
///
/// # Returns
///
/// The parsed push event, ready for pipeline selection.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`]; no pipeline
/// is ever attempted for a rejected delivery.
pub fn validate(
    request: &WebhookRequest,
    config: &WebhookConfig,
) -> Result<PushEvent, ValidationError> {
    let event = PushEvent::parse(&request.body).map_err(|err| {
        ValidationError::MalformedPayload {
            reason: err.to_string(),
        }
    })?;

    let expected_ref = format!("refs/heads/{}", config.target_branch);
    if event.ref_name != expected_ref {
        return Err(ValidationError::RefMismatch {
            actual: event.ref_name.clone(),
            branch: config.target_branch.clone(),
        });
    }

    let provided_signature = request
        .signature
        .as_deref()
        .ok_or(ValidationError::MissingSignature)?;

    let event_header = request
        .event
        .as_deref()
        .ok_or(ValidationError::MissingEventHeader)?;

    if request.delivery.is_none() {
        return Err(ValidationError::MissingDeliveryId);
    }

    if !signature::verify(
        config.secret.expose_secret(),
        &request.body,
        provided_signature,
    ) {
        return Err(ValidationError::SignatureMismatch);
    }

    if event_header != PUSH_EVENT {
        return Err(ValidationError::UnsupportedEvent {
            event: event_header.to_string(),
        });
    }

    Ok(event)
}
