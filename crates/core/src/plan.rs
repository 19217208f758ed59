//! Commit plan domain types produced by the planning stage.
//!
//! A plan is produced once, immutable thereafter, and consumed one commit at
//! a time in order.

use serde::{Deserialize, Serialize};

/// One intended commit: a message and the files it is expected to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPlan {
    /// The commit message used verbatim when the commit is recorded
    pub commit_message: String,

    /// Files the commit is expected to touch (advisory, may be empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relevant_files: Vec<String>,
}

impl CommitPlan {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            commit_message: message.into(),
            relevant_files: Vec::new(),
        }
    }

    pub fn with_files(message: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            commit_message: message.into(),
            relevant_files: files,
        }
    }
}

/// The structured result of the planning stage: the pull request to open and
/// the ordered commits that will fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDescription {
    pub title: String,

    pub body: String,

    /// Ordered commits; the orchestrator writes them first to last
    #[serde(default)]
    pub commits: Vec<CommitPlan>,
}
