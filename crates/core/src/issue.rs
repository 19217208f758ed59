//! Inbound forge events that can trigger a pull-request attempt.
//!
//! The event-ingestion pipeline delivers these; this core only ever handles
//! the issue-labeled variant. The union exists so that routing mistakes are
//! caught loudly instead of silently ignored.

use serde::{Deserialize, Serialize};

/// An issue as delivered by the forge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,

    pub title: String,

    #[serde(default)]
    pub body: String,

    pub author: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A label was added to an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLabelEvent {
    pub issue: Issue,

    /// The label that was applied
    pub label: String,
}

/// A comment was posted on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEvent {
    pub issue: Issue,

    pub author: String,

    pub comment: String,
}

/// Tagged union of event kinds delivered by the event-ingestion layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerEvent {
    IssueLabeled(IssueLabelEvent),
    CommentCreated(CommentEvent),
}

impl TriggerEvent {
    /// The wire name of this event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TriggerEvent::IssueLabeled(_) => "issue_labeled",
            TriggerEvent::CommentCreated(_) => "comment_created",
        }
    }
}
