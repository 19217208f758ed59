//! Publish service — fire-and-forget progress reporting.
//!
//! The orchestrator narrates an attempt through this trait: nested report
//! sections, code blocks, and the pull request description itself.
//! Implementations may post to a forge, accumulate a markdown report, or
//! discard everything. No return value is ever consumed.

use async_trait::async_trait;

#[async_trait]
pub trait PublishService: Send + Sync {
    /// Open a report section with the given title.
    async fn start_section(&self, title: &str);

    /// Close the current section, recording its final title (which may carry
    /// a status marker the opening title did not).
    async fn end_section(&self, title: &str);

    /// Publish a fenced code block under a heading.
    async fn publish_code_block(&self, heading: &str, code: &str, language: &str);

    /// Set the pull request title and body.
    async fn set_pr_description(&self, title: &str, body: &str);
}
