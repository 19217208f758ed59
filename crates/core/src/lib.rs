//! # Pullsmith Core
//!
//! Domain types, traits, and error definitions for the Pullsmith
//! pull-request-generation agent. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod action;
pub mod context;
pub mod error;
pub mod event;
pub mod issue;
pub mod plan;
pub mod publish;
pub mod vcs;

// Re-export key types at crate root for ergonomics
pub use action::{Action, ActionOutcome, ActionRegistry, ActionSelector, ActionStatus};
pub use context::{ActionRecord, Context};
pub use error::{ActionError, Error, Result, VcsError};
pub use event::{DomainEvent, EventBus};
pub use issue::{CommentEvent, Issue, IssueLabelEvent, TriggerEvent};
pub use plan::{CommitPlan, PullRequestDescription};
pub use publish::PublishService;
pub use vcs::{CommitService, DiffService};
