//! Typed view of one inbound webhook delivery.
//!
//! The delivery is an explicit structured type rather than a raw header
//! map: each header the handler cares about is a typed absence (`Option`),
//! and everything else about the HTTP request stays in the API layer.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Name of the header carrying the HMAC-SHA256 payload signature.
pub const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Name of the header carrying the event type (e.g. `push`).
pub const HEADER_EVENT: &str = "x-github-event";

/// Name of the header carrying the unique delivery identifier.
pub const HEADER_DELIVERY: &str = "x-github-delivery";

/// One webhook delivery as received from the source-control provider.
///
/// `body` is the raw request body exactly as transmitted; signature
/// verification runs over these bytes, so the body must not be re-encoded
/// between receipt and verification.
///
/// The struct is serializable so a successfully handled delivery can be
/// echoed back to the sender under `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRequest {
    /// Value of the `X-Hub-Signature-256` header, if present.
    pub signature: Option<String>,

    /// Value of the `X-GitHub-Event` header, if present.
    pub event: Option<String>,

    /// Value of the `X-GitHub-Delivery` header, if present.
    pub delivery: Option<String>,

    /// Raw request body.
    pub body: String,
}

impl WebhookRequest {
    /// Creates a request from its parts.
    pub fn new(
        signature: Option<String>,
        event: Option<String>,
        delivery: Option<String>,
        body: String,
    ) -> Self {
        Self {
            signature,
            event,
            delivery,
            body,
        }
    }
}
