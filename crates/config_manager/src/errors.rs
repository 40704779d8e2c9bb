//! Configuration system error types.
//!
//! Domain-specific errors for loading and validating the webhook
//! configuration from the process environment.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// These errors occur while reading the shared secret, the target branch,
/// or the indexed pipeline rule variables. All of them are startup-fatal:
/// they are raised once, before the server starts accepting deliveries,
/// never during request handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Must provide a 'GITHUB_WEBHOOK_SECRET' env variable")]
    MissingSecret,

    #[error("Must provide a 'TARGET_GITHUB_REPOSITORY_BRANCH' env variable")]
    MissingBranch,

    #[error("Pipeline rule {index} is incomplete: both 'TARGET_PIPELINE_NAME_{index}' and 'TARGET_PIPELINE_REGEXP_{index}' must be set")]
    UnpairedRule { index: u32 },

    #[error("Pipeline rule variable '{key}' does not end in an integer index")]
    InvalidRuleIndex { key: String },

    #[error("Pipeline rule {index} has an invalid pattern: {reason}")]
    InvalidPattern { index: u32, reason: String },
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
