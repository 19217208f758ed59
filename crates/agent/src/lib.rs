//! The Pullsmith orchestration layer.
//!
//! One attempt flows through the states
//! `Start → BranchCreated → Planned → {Aborted | CommitsWritten}`:
//!
//! 1. **Branch** — recreate the working branch from the base branch
//! 2. **Plan** — a single decisive planning action seeds the context with a
//!    pull request description (or declines)
//! 3. **Publish** — the PR title and body go out before any commit
//! 4. **Write** — one bounded codegen round per planned commit, each ending
//!    in a commit and push, empty or not
//!
//! The context accumulates across the whole attempt; only `current_commit`
//! and `action_history` are reset per commit-writing round.

mod commit_writer;
mod orchestrator;

#[cfg(test)]
mod test_support;

pub use commit_writer::CommitWriter;
pub use orchestrator::{AttemptOutcome, OrchestratorConfig, PullRequestAgent};
