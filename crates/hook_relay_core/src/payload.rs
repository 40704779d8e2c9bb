//! GitHub push payload types.
//!
//! Only the fields the handler consumes are modelled; everything else in
//! the payload is ignored during deserialization.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

/// File-level changes carried by one commit in a push payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushCommit {
    /// Paths added by this commit.
    #[serde(default)]
    pub added: Vec<String>,

    /// Paths removed by this commit.
    #[serde(default)]
    pub removed: Vec<String>,

    /// Paths modified by this commit.
    #[serde(default)]
    pub modified: Vec<String>,
}

/// Parsed push event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    /// Full git ref the push targeted, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// Commits contained in the push, in order.
    #[serde(default)]
    pub commits: Vec<PushCommit>,
}

impl PushEvent {
    /// Parses a raw request body into a push event.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error when the body is not
    /// valid JSON or is missing the `ref` field.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Returns the union of added, removed, and modified paths across all
    /// commits in the push.
    ///
    /// The set is ordered and deduplicated; a path touched by several
    /// commits (or both added and later modified) appears once.
    pub fn touched_files(&self) -> BTreeSet<String> {
        let mut touched = BTreeSet::new();

        for commit in &self.commits {
            touched.extend(commit.added.iter().cloned());
            touched.extend(commit.removed.iter().cloned());
            touched.extend(commit.modified.iter().cloned());
        }

        touched
    }
}
