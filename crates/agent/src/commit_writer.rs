//! Commit writing — one planned commit materialized into the working tree.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use pullsmith_core::context::Context;
use pullsmith_core::event::{DomainEvent, EventBus};
use pullsmith_core::plan::CommitPlan;
use pullsmith_core::publish::PublishService;
use pullsmith_core::vcs::{CommitService, DiffService};
use pullsmith_core::Result;
use pullsmith_runner::{ActionRunner, RunOptions};

/// Materializes one planned commit: runs the codegen actions against the
/// context, reports the resulting diff, and commits the working tree.
pub struct CommitWriter {
    runner: Arc<ActionRunner>,
    publish: Arc<dyn PublishService>,
    diff: Arc<dyn DiffService>,
    commits: Arc<dyn CommitService>,
    events: Arc<EventBus>,
    codegen_actions: Vec<String>,
    max_codegen_iterations: u32,
}

impl CommitWriter {
    pub fn new(
        runner: Arc<ActionRunner>,
        publish: Arc<dyn PublishService>,
        diff: Arc<dyn DiffService>,
        commits: Arc<dyn CommitService>,
        events: Arc<EventBus>,
        codegen_actions: Vec<String>,
        max_codegen_iterations: u32,
    ) -> Self {
        Self {
            runner,
            publish,
            diff,
            commits,
            events,
            codegen_actions,
            max_codegen_iterations,
        }
    }

    /// Write one commit and return the updated context for the next one.
    ///
    /// An empty diff is a warning, not a failure: the commit is still
    /// created and pushed so the branch history matches the plan. No action
    /// result is required to exist in the context for this to succeed.
    pub async fn write_commit(
        &self,
        plan: &CommitPlan,
        mut context: Context,
        extra_headings: &BTreeMap<String, String>,
    ) -> Result<Context> {
        self.publish
            .start_section(&format!("🔨 Writing commit {}", plan.commit_message))
            .await;

        context.set_current_commit(plan)?;
        context.reset_action_history();

        let mut options = RunOptions::bounded(self.max_codegen_iterations)
            .with_heading(
                Context::KEY_CURRENT_COMMIT,
                "Commit we are currently generating",
            )
            .with_heading(
                Context::KEY_ACTION_HISTORY,
                "Actions that have been run so far",
            );
        for (key, text) in extra_headings {
            options = options.with_heading(key.clone(), text.clone());
        }

        context = self
            .runner
            .run_iteratively(&self.codegen_actions, context, &options)
            .await?;

        let diff = self.diff.get_diff().await?;
        let empty = diff.trim().is_empty();

        if !empty {
            self.publish
                .publish_code_block("Diff", &diff, "diff")
                .await;
            self.publish
                .end_section(&format!("✅ Committed {}", plan.commit_message))
                .await;
            info!(message = %plan.commit_message, "Commit generated");
        } else {
            self.publish
                .end_section(&format!("⚠️ Empty commit {}", plan.commit_message))
                .await;
            warn!(message = %plan.commit_message, "Codegen produced no changes");
        }

        // Commit and push regardless of diff emptiness.
        self.commits.commit(&plan.commit_message, true).await?;

        self.events.publish(DomainEvent::CommitWritten {
            message: plan.commit_message.clone(),
            empty,
            timestamp: Utc::now(),
        });

        Ok(context)
    }
}
