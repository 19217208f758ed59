//! No-op publisher — disables progress reporting entirely.

use async_trait::async_trait;

use pullsmith_core::publish::PublishService;

/// A publisher that discards everything.
pub struct NoopPublisher;

#[async_trait]
impl PublishService for NoopPublisher {
    async fn start_section(&self, _title: &str) {}

    async fn end_section(&self, _title: &str) {}

    async fn publish_code_block(&self, _heading: &str, _code: &str, _language: &str) {}

    async fn set_pr_description(&self, _title: &str, _body: &str) {}
}
