//! Webhook handling orchestration.
//!
//! [`WebhookHandler`] ties the pieces together for one delivery: validate,
//! compute the touched file set, select pipelines, trigger each selection
//! exactly once, and report the aggregate outcome.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use config_manager::WebhookConfig;
use pipeline_client::PipelineTrigger;

use crate::{selection, validation, ValidationError, WebhookRequest};

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;

/// The request issued to the pipeline collaborator for one pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    /// Name of the pipeline to start.
    pub name: String,
}

/// One trigger attempt that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFailure {
    /// The trigger request that failed.
    pub request: TriggerRequest,

    /// Collaborator error, rendered for the aggregate report.
    pub error: String,
}

/// Aggregate outcome of the trigger phase for one delivery.
///
/// Partial success is a valid terminal state: some pipelines may have been
/// triggered while others failed, and nothing is rolled back or retried.
/// Redelivery is the sender's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReport {
    /// Pipelines triggered successfully, in attempt order.
    pub triggered: Vec<String>,

    /// Pipelines whose trigger attempt failed, in attempt order.
    pub failed_requests: Vec<TriggerFailure>,
}

impl TriggerReport {
    /// Returns `true` when every selected pipeline was triggered.
    ///
    /// An empty selection counts as success: there was nothing to trigger
    /// and nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed_requests.is_empty()
    }
}

/// Validates inbound push deliveries and triggers every matching pipeline.
///
/// The handler is stateless across deliveries: it holds only the immutable
/// process configuration and the trigger collaborator, so one instance can
/// serve any number of concurrent requests.
pub struct WebhookHandler<T> {
    config: Arc<WebhookConfig>,
    trigger: T,
}

impl<T: PipelineTrigger> WebhookHandler<T> {
    /// Creates a handler from the process configuration and a trigger
    /// collaborator.
    pub fn new(config: Arc<WebhookConfig>, trigger: T) -> Self {
        Self { config, trigger }
    }

    /// Handles one webhook delivery.
    ///
    /// Validation failures short-circuit with no pipelines attempted.
    /// After validation, every selected pipeline is attempted exactly
    /// once; failures are collected into the report rather than aborting
    /// the remaining attempts.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the delivery is rejected. Trigger
    /// failures are not errors at this level; they are part of the
    /// [`TriggerReport`].
    pub async fn handle(
        &self,
        request: &WebhookRequest,
    ) -> Result<TriggerReport, ValidationError> {
        let event = validation::validate(request, &self.config)?;

        let touched = event.touched_files();
        let selected = selection::select_pipelines(&self.config.pipelines, &touched);

        info!(
            delivery = request.delivery.as_deref().unwrap_or_default(),
            touched_count = touched.len(),
            pipelines = ?selected,
            "Triggering pipelines"
        );

        let mut report = TriggerReport::default();
        for name in selected {
            match self.trigger.trigger(&name).await {
                Ok(()) => report.triggered.push(name),
                Err(err) => {
                    warn!(pipeline = %name, error = %err, "Pipeline trigger failed");
                    report.failed_requests.push(TriggerFailure {
                        error: err.to_string(),
                        request: TriggerRequest { name },
                    });
                }
            }
        }

        Ok(report)
    }
}
