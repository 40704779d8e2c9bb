//! Client for triggering downstream delivery pipelines.
//!
//! The webhook handler only ever sees the [`PipelineTrigger`] trait; the
//! HTTP transport, endpoint layout, authentication, and timeout handling
//! all live behind it in [`HttpPipelineClient`]. This keeps the handler
//! free of vendor-specific request shapes and makes it trivially testable
//! with an in-memory trigger.
//!
//! Triggers are independent and idempotent-by-name at the collaborator
//! level: starting the same pipeline twice starts two executions, and no
//! ordering is guaranteed or needed between different pipelines.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Default per-call timeout for trigger requests.
pub const DEFAULT_TRIGGER_TIMEOUT: Duration = Duration::from_secs(10);

/// Starts a named downstream delivery pipeline.
///
/// Implementations must treat every call as independent: one pipeline's
/// failure carries no meaning for the others, and the caller collects
/// failures rather than aborting on the first one.
#[async_trait]
pub trait PipelineTrigger: Send + Sync {
    /// Requests one execution of the named pipeline.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the execution could not be started. The
    /// error is expected to be collected, not propagated.
    async fn trigger(&self, pipeline: &str) -> Result<(), Error>;
}

#[async_trait]
impl<T: PipelineTrigger + ?Sized> PipelineTrigger for std::sync::Arc<T> {
    async fn trigger(&self, pipeline: &str) -> Result<(), Error> {
        (**self).trigger(pipeline).await
    }
}

/// HTTP implementation of [`PipelineTrigger`].
///
/// Executions are started with `POST {base_url}/pipelines/{name}/executions`,
/// optionally authenticated with a bearer token. Every call is bounded by
/// the timeout given at construction; an elapsed timeout is reported as
/// [`Error::Timeout`] for that pipeline only.
#[derive(Debug)]
pub struct HttpPipelineClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpPipelineClient {
    /// Creates a client for the pipeline API at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the pipeline API, with or without a trailing
    ///   slash.
    /// * `token` - Optional bearer token sent with every trigger request.
    /// * `timeout` - Upper bound applied to each trigger call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClientConstruction`] if the underlying HTTP client
    /// cannot be built.
    pub fn new(
        base_url: Url,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| Error::ClientConstruction {
                reason: err.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Builds the execution endpoint URL for a pipeline.
    fn execution_url(&self, pipeline: &str) -> Result<Url, Error> {
        let raw = format!(
            "{}/pipelines/{}/executions",
            self.base_url.as_str().trim_end_matches('/'),
            pipeline
        );

        Url::parse(&raw).map_err(|_| Error::InvalidPipelineName {
            pipeline: pipeline.to_string(),
        })
    }
}

#[async_trait]
impl PipelineTrigger for HttpPipelineClient {
    #[instrument(skip(self), fields(pipeline = %pipeline))]
    async fn trigger(&self, pipeline: &str) -> Result<(), Error> {
        let url = self.execution_url(pipeline)?;

        debug!(url = %url, "Requesting pipeline execution");

        let mut request = self.client.post(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                Error::Timeout {
                    pipeline: pipeline.to_string(),
                }
            } else {
                Error::RequestFailed {
                    pipeline: pipeline.to_string(),
                    reason: err.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ApiRequestFailed {
                pipeline: pipeline.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        info!(pipeline = %pipeline, "Pipeline execution started");
        Ok(())
    }
}
