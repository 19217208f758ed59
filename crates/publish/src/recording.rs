//! Recording publisher — an ordered log of every publish call.

use async_trait::async_trait;
use tokio::sync::Mutex;

use pullsmith_core::publish::PublishService;

/// One recorded publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishCall {
    StartSection {
        title: String,
    },
    EndSection {
        title: String,
    },
    CodeBlock {
        heading: String,
        language: String,
        code: String,
    },
    PrDescription {
        title: String,
        body: String,
    },
}

/// Records every call in order. Used to assert on report sequences in tests
/// and as an audit trail.
pub struct RecordingPublisher {
    calls: Mutex<Vec<PublishCall>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all calls so far, in order.
    pub async fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().await.clone()
    }
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishService for RecordingPublisher {
    async fn start_section(&self, title: &str) {
        self.calls.lock().await.push(PublishCall::StartSection {
            title: title.to_string(),
        });
    }

    async fn end_section(&self, title: &str) {
        self.calls.lock().await.push(PublishCall::EndSection {
            title: title.to_string(),
        });
    }

    async fn publish_code_block(&self, heading: &str, code: &str, language: &str) {
        self.calls.lock().await.push(PublishCall::CodeBlock {
            heading: heading.to_string(),
            language: language.to_string(),
            code: code.to_string(),
        });
    }

    async fn set_pr_description(&self, title: &str, body: &str) {
        self.calls.lock().await.push(PublishCall::PrDescription {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let publisher = RecordingPublisher::new();

        publisher.set_pr_description("Title", "Body").await;
        publisher.start_section("Working").await;
        publisher.end_section("Done").await;

        let calls = publisher.calls().await;
        assert_eq!(
            calls,
            vec![
                PublishCall::PrDescription {
                    title: "Title".into(),
                    body: "Body".into()
                },
                PublishCall::StartSection {
                    title: "Working".into()
                },
                PublishCall::EndSection {
                    title: "Done".into()
                },
            ]
        );
    }
}
