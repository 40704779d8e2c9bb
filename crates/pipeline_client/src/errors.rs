//! Error types for pipeline trigger operations.
//!
//! Trigger errors are collected per pipeline by the webhook handler and
//! reported in aggregate; they never abort the remaining trigger attempts
//! and never propagate as faults.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while triggering a downstream pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The underlying HTTP client could not be constructed.
    ///
    /// This only happens at startup, while building the client from
    /// configuration; it is never produced by a trigger call.
    #[error("Failed to construct pipeline HTTP client: {reason}")]
    ClientConstruction { reason: String },

    /// The pipeline name does not form a valid execution URL.
    #[error("Pipeline name '{pipeline}' does not form a valid execution URL")]
    InvalidPipelineName { pipeline: String },

    /// The trigger request could not be sent or the connection failed.
    #[error("Trigger request for pipeline '{pipeline}' failed: {reason}")]
    RequestFailed { pipeline: String, reason: String },

    /// The trigger request exceeded its bounded timeout.
    ///
    /// A timeout is a per-pipeline failure; the handler keeps attempting
    /// the remaining selections.
    #[error("Trigger request for pipeline '{pipeline}' timed out")]
    Timeout { pipeline: String },

    /// The pipeline API answered with a non-success status.
    #[error("Pipeline API returned {status} for pipeline '{pipeline}': {body}")]
    ApiRequestFailed {
        pipeline: String,
        status: u16,
        body: String,
    },
}
