//! Progress publishers for pull-request attempts.
//!
//! Publishers receive the orchestrator's narration through the
//! [`PublishService`](pullsmith_core::publish::PublishService) trait.
//!
//! Available publishers:
//! - **Markdown** — accumulates a nested markdown progress report
//! - **Recording** — records every call in order (assertions, audit trails)
//! - **Noop** — discards everything

pub mod markdown;
pub mod noop;
pub mod recording;

pub use markdown::MarkdownPublisher;
pub use noop::NoopPublisher;
pub use recording::{PublishCall, RecordingPublisher};
