//! Pull request orchestration — event dispatch, planning, and the commit loop.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use pullsmith_config::AgentSettings;
use pullsmith_core::context::Context;
use pullsmith_core::event::{DomainEvent, EventBus};
use pullsmith_core::issue::{IssueLabelEvent, TriggerEvent};
use pullsmith_core::plan::PullRequestDescription;
use pullsmith_core::publish::PublishService;
use pullsmith_core::vcs::{CommitService, DiffService};
use pullsmith_core::{Error, Result};
use pullsmith_runner::{ActionRunner, RunOptions};

use crate::commit_writer::CommitWriter;

/// Action sets and bounds for one agent instance.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Actions eligible during the single-shot planning run
    pub planning_actions: Vec<String>,

    /// Actions eligible during each commit's codegen run
    pub codegen_actions: Vec<String>,

    /// Iteration bound per commit-writing round
    pub max_codegen_iterations: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            planning_actions: vec![
                "plan_pull_request".into(),
                "request_more_information".into(),
            ],
            codegen_actions: vec!["new_file".into(), "edit_file".into()],
            max_codegen_iterations: 5,
        }
    }
}

impl From<&AgentSettings> for OrchestratorConfig {
    fn from(settings: &AgentSettings) -> Self {
        Self {
            planning_actions: settings.planning_actions.clone(),
            codegen_actions: settings.codegen_actions.clone(),
            max_codegen_iterations: settings.max_codegen_iterations,
        }
    }
}

/// How an attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Planning produced a description and every planned commit was written.
    Completed { commits_written: usize },

    /// Planning declined to produce a pull request description. Not an
    /// error: the planning stage may have asked for more information on the
    /// issue instead of proceeding.
    NotPlanned,
}

/// The root orchestrator: plans commits from a labeled issue, publishes the
/// pull request description, and writes each planned commit in order.
pub struct PullRequestAgent {
    config: OrchestratorConfig,
    runner: Arc<ActionRunner>,
    publish: Arc<dyn PublishService>,
    diff: Arc<dyn DiffService>,
    commits: Arc<dyn CommitService>,
    events: Arc<EventBus>,
}

impl PullRequestAgent {
    pub fn new(
        config: OrchestratorConfig,
        runner: Arc<ActionRunner>,
        publish: Arc<dyn PublishService>,
        diff: Arc<dyn DiffService>,
        commits: Arc<dyn CommitService>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            runner,
            publish,
            diff,
            commits,
            events,
        }
    }

    /// Dispatch an inbound event.
    ///
    /// Only issue-labeled events are supported. Anything else reaching this
    /// agent is a bug in the event-routing layer and fails immediately, so
    /// the integration problem surfaces instead of being silently ignored.
    pub async fn handle_event(&self, event: &TriggerEvent) -> Result<AttemptOutcome> {
        match event {
            TriggerEvent::IssueLabeled(event) => self.create_pull_request(event).await,
            other => Err(Error::UnsupportedEvent {
                kind: other.kind().to_string(),
            }),
        }
    }

    /// Run one full pull-request attempt for a labeled issue.
    pub async fn create_pull_request(&self, event: &IssueLabelEvent) -> Result<AttemptOutcome> {
        let attempt_id = Uuid::new_v4().to_string();
        let issue = &event.issue;

        info!(
            attempt_id = %attempt_id,
            issue = issue.number,
            label = %event.label,
            "Starting pull request attempt"
        );

        // Branch creation is an external failure, fatal to this attempt.
        self.commits.overwrite_new_branch().await?;

        self.events.publish(DomainEvent::AttemptStarted {
            attempt_id: attempt_id.clone(),
            issue_number: issue.number,
            timestamp: Utc::now(),
        });

        let context = Context::seeded_with_issue(issue)?;

        // Plan the pull request: one decisive action.
        let context = self
            .runner
            .run_iteratively(
                &self.config.planning_actions,
                context,
                &RunOptions::single_shot(),
            )
            .await?;

        let Some(description) = context
            .get_typed::<PullRequestDescription>(Context::KEY_PULL_REQUEST_DESCRIPTION)?
        else {
            // The planning stage decided not to proceed. A first-class
            // outcome, not an error.
            debug!(attempt_id = %attempt_id, "Planning produced no pull request description");
            self.events.publish(DomainEvent::AttemptAborted {
                attempt_id,
                reason: "no pull request description".into(),
                timestamp: Utc::now(),
            });
            return Ok(AttemptOutcome::NotPlanned);
        };

        // Publish the description before writing any commit.
        self.publish
            .set_pr_description(&description.title, &description.body)
            .await;
        self.events.publish(DomainEvent::PlanProduced {
            attempt_id: attempt_id.clone(),
            title: description.title.clone(),
            commit_count: description.commits.len(),
            timestamp: Utc::now(),
        });

        let writer = CommitWriter::new(
            self.runner.clone(),
            self.publish.clone(),
            self.diff.clone(),
            self.commits.clone(),
            self.events.clone(),
            self.config.codegen_actions.clone(),
            self.config.max_codegen_iterations,
        );

        let mut headings = BTreeMap::new();
        headings.insert(
            Context::KEY_PULL_REQUEST_DESCRIPTION.to_string(),
            "Plan for the pull request".to_string(),
        );

        let mut context = context;
        for commit in &description.commits {
            context = writer.write_commit(commit, context, &headings).await?;
        }

        info!(
            attempt_id = %attempt_id,
            commits = description.commits.len(),
            "Attempt complete"
        );
        self.events.publish(DomainEvent::AttemptCompleted {
            attempt_id,
            commits_written: description.commits.len(),
            timestamp: Utc::now(),
        });

        Ok(AttemptOutcome::Completed {
            commits_written: description.commits.len(),
        })
    }
}
