//! Configuration management for HookRelay.
//!
//! Configuration is read from the process environment exactly once, at
//! startup, validated, and handed to the webhook handler as an immutable
//! value. Request handling never consults ambient environment state.
//!
//! ## Overview
//!
//! Three pieces of configuration drive the handler:
//!
//! 1. The shared secret used to verify the `X-Hub-Signature-256` header
//!    (`GITHUB_WEBHOOK_SECRET`).
//! 2. The branch pushes must target (`TARGET_GITHUB_REPOSITORY_BRANCH`);
//!    deliveries for any other ref are rejected.
//! 3. An ordered list of pipeline selection rules, declared through paired
//!    `TARGET_PIPELINE_NAME_<i>` / `TARGET_PIPELINE_REGEXP_<i>` variables
//!    with an integer index suffix.
//!
//! A name without its sibling pattern (or the reverse), a non-integer index
//! suffix, and an unparsable pattern are all reported as a
//! [`ConfigurationError`] before the server binds, rather than surfacing
//! mid-request.

use std::collections::BTreeMap;

use regex::Regex;
use secrecy::SecretString;
use tracing::info;

pub mod errors;
pub use errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Environment variable holding the webhook shared secret.
pub const ENV_WEBHOOK_SECRET: &str = "GITHUB_WEBHOOK_SECRET";

/// Environment variable holding the branch pushes must target.
pub const ENV_TARGET_BRANCH: &str = "TARGET_GITHUB_REPOSITORY_BRANCH";

/// Prefix of the indexed pipeline-name variables.
pub const ENV_PIPELINE_NAME_PREFIX: &str = "TARGET_PIPELINE_NAME_";

/// Prefix of the indexed pipeline-pattern variables.
pub const ENV_PIPELINE_REGEXP_PREFIX: &str = "TARGET_PIPELINE_REGEXP_";

/// One pipeline selection rule: a pipeline name paired with a path pattern.
///
/// A pipeline is triggered when its pattern matches any file path touched
/// by the push. Patterns are unanchored; a rule that should only match
/// from the start of a path must anchor itself with `^`.
///
/// The same pipeline name may appear under several indexes with different
/// patterns; selection unions across all of them.
#[derive(Debug, Clone)]
pub struct PipelineRule {
    /// Name the downstream pipeline is triggered under.
    pub name: String,

    /// Compiled path pattern.
    pub pattern: Regex,
}

/// Immutable process-wide configuration for the webhook handler.
///
/// Constructed once at startup via [`WebhookConfig::from_env`] and shared
/// read-only across all deliveries for the lifetime of the process.
#[derive(Debug)]
pub struct WebhookConfig {
    /// Shared secret used to verify the `X-Hub-Signature-256` header.
    pub secret: SecretString,

    /// Branch name pushes must target; compared against
    /// `refs/heads/<target_branch>`.
    pub target_branch: String,

    /// Pipeline selection rules, ordered by their index suffix.
    pub pipelines: Vec<PipelineRule>,
}

impl WebhookConfig {
    /// Loads and validates configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the secret or target branch is
    /// absent, when a pipeline rule is missing half of its name/pattern
    /// pair, or when a pattern does not compile.
    pub fn from_env() -> ConfigurationResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Builds configuration from explicit key/value pairs.
    ///
    /// [`WebhookConfig::from_env`] delegates here; tests supply pairs
    /// directly instead of mutating the process environment.
    ///
    /// # Errors
    ///
    /// Same conditions as [`WebhookConfig::from_env`].
    pub fn from_vars<I>(vars: I) -> ConfigurationResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: BTreeMap<String, String> = vars.into_iter().collect();

        let secret = vars
            .get(ENV_WEBHOOK_SECRET)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigurationError::MissingSecret)?;

        let target_branch = vars
            .get(ENV_TARGET_BRANCH)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigurationError::MissingBranch)?;

        let pipelines = collect_pipeline_rules(&vars)?;

        info!(
            target_branch = %target_branch,
            rule_count = pipelines.len(),
            "Webhook configuration loaded"
        );

        Ok(Self {
            secret: SecretString::from(secret.clone()),
            target_branch: target_branch.clone(),
            pipelines,
        })
    }
}

/// Scans `vars` for `TARGET_PIPELINE_NAME_<i>` keys and pairs each with its
/// sibling `TARGET_PIPELINE_REGEXP_<i>`, ordered by index.
///
/// An empty rule list is legal; a request then selects no pipelines and is
/// acknowledged without triggering anything.
fn collect_pipeline_rules(
    vars: &BTreeMap<String, String>,
) -> ConfigurationResult<Vec<PipelineRule>> {
    let mut indexed: Vec<(u32, PipelineRule)> = Vec::new();

    for (key, name) in vars {
        let Some(suffix) = key.strip_prefix(ENV_PIPELINE_NAME_PREFIX) else {
            continue;
        };

        let index: u32 = suffix
            .parse()
            .map_err(|_| ConfigurationError::InvalidRuleIndex { key: key.clone() })?;

        if name.is_empty() {
            return Err(ConfigurationError::UnpairedRule { index });
        }

        let pattern_key = format!("{ENV_PIPELINE_REGEXP_PREFIX}{index}");
        let pattern = vars
            .get(&pattern_key)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigurationError::UnpairedRule { index })?;

        let pattern = Regex::new(pattern).map_err(|err| ConfigurationError::InvalidPattern {
            index,
            reason: err.to_string(),
        })?;

        indexed.push((
            index,
            PipelineRule {
                name: name.clone(),
                pattern,
            },
        ));
    }

    // A pattern declared without its sibling name is the same pairing defect
    // as the reverse, and is caught here instead of being silently ignored.
    for key in vars.keys() {
        let Some(suffix) = key.strip_prefix(ENV_PIPELINE_REGEXP_PREFIX) else {
            continue;
        };

        let index: u32 = suffix
            .parse()
            .map_err(|_| ConfigurationError::InvalidRuleIndex { key: key.clone() })?;

        let name_key = format!("{ENV_PIPELINE_NAME_PREFIX}{index}");
        if !vars.get(&name_key).is_some_and(|name| !name.is_empty()) {
            return Err(ConfigurationError::UnpairedRule { index });
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, rule)| rule).collect())
}
