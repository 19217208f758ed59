//! Shared scripted doubles for orchestration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::Mutex;

use pullsmith_actions::{KEY_PLANNED_EDITS, PlannedEdit};
use pullsmith_core::action::{Action, ActionOutcome};
use pullsmith_core::context::Context;
use pullsmith_core::error::{ActionError, VcsError};
use pullsmith_core::plan::PullRequestDescription;
use pullsmith_core::vcs::{CommitService, DiffService};

/// Probes into a scripted registry: execution counters and the
/// action-history lengths each codegen run observed.
pub struct ScriptedProbes {
    pub plan_runs: Arc<AtomicUsize>,
    pub codegen_runs: Arc<AtomicUsize>,
    pub history_lens: Arc<StdMutex<Vec<usize>>>,
}

/// A planning action that either produces a scripted description or declines.
pub struct PlanAction {
    description: Option<PullRequestDescription>,
    runs: Arc<AtomicUsize>,
}

impl PlanAction {
    pub fn new(description: Option<PullRequestDescription>) -> (Self, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        (
            Self {
                description,
                runs: runs.clone(),
            },
            runs,
        )
    }
}

#[async_trait]
impl Action for PlanAction {
    fn id(&self) -> &str {
        "plan_pull_request"
    }
    fn description(&self) -> &str {
        "Scripted planning action"
    }
    async fn execute(&self, mut context: Context) -> Result<ActionOutcome, ActionError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match &self.description {
            Some(description) => {
                context
                    .insert_typed(Context::KEY_PULL_REQUEST_DESCRIPTION, description)
                    .map_err(|e| ActionError::ExecutionFailed {
                        action: "plan_pull_request".into(),
                        reason: e.to_string(),
                    })?;
                Ok(ActionOutcome::finished(context, "planned the pull request"))
            }
            None => Ok(ActionOutcome::finished(context, "declined to plan")),
        }
    }
}

/// A planning action that stamps an arbitrary raw value under the
/// description key, for contract-violation tests.
pub struct RawPlanAction {
    value: serde_json::Value,
}

impl RawPlanAction {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }
}

#[async_trait]
impl Action for RawPlanAction {
    fn id(&self) -> &str {
        "plan_pull_request"
    }
    fn description(&self) -> &str {
        "Stamps a raw value under the description key"
    }
    async fn execute(&self, mut context: Context) -> Result<ActionOutcome, ActionError> {
        context.insert(Context::KEY_PULL_REQUEST_DESCRIPTION, self.value.clone());
        Ok(ActionOutcome::finished(context, "stamped raw description"))
    }
}

/// A planning action that seeds both the description and the planned-edit
/// queue the built-in codegen actions drain.
pub struct SeedingPlanAction {
    description: PullRequestDescription,
    edits: Vec<PlannedEdit>,
}

impl SeedingPlanAction {
    pub fn new(description: PullRequestDescription, edits: Vec<PlannedEdit>) -> Self {
        Self { description, edits }
    }
}

#[async_trait]
impl Action for SeedingPlanAction {
    fn id(&self) -> &str {
        "plan_pull_request"
    }
    fn description(&self) -> &str {
        "Seeds a description and planned edits"
    }
    async fn execute(&self, mut context: Context) -> Result<ActionOutcome, ActionError> {
        let failed = |e: pullsmith_core::Error| ActionError::ExecutionFailed {
            action: "plan_pull_request".into(),
            reason: e.to_string(),
        };
        context
            .insert_typed(Context::KEY_PULL_REQUEST_DESCRIPTION, &self.description)
            .map_err(failed)?;
        context
            .insert_typed(KEY_PLANNED_EDITS, &self.edits)
            .map_err(failed)?;
        Ok(ActionOutcome::finished(context, "planned with edits"))
    }
}

/// A codegen action that counts executions and records the action-history
/// length it observed, then finishes.
pub struct CountingCodegenAction {
    id: &'static str,
    runs: Arc<AtomicUsize>,
    history_lens: Arc<StdMutex<Vec<usize>>>,
}

impl CountingCodegenAction {
    pub fn new(
        id: &'static str,
    ) -> (Self, Arc<AtomicUsize>, Arc<StdMutex<Vec<usize>>>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let history_lens = Arc::new(StdMutex::new(Vec::new()));
        (
            Self {
                id,
                runs: runs.clone(),
                history_lens: history_lens.clone(),
            },
            runs,
            history_lens,
        )
    }
}

#[async_trait]
impl Action for CountingCodegenAction {
    fn id(&self) -> &str {
        self.id
    }
    fn description(&self) -> &str {
        "Counts executions and observed history lengths"
    }
    async fn execute(&self, context: Context) -> Result<ActionOutcome, ActionError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let observed = context
            .action_history()
            .map_err(|e| ActionError::InvalidContext {
                action: self.id.into(),
                reason: e.to_string(),
            })?
            .len();
        self.history_lens.lock().unwrap().push(observed);
        Ok(ActionOutcome::finished(context, "generated a change"))
    }
}

/// Replays a fixed sequence of diffs; exhausted means "no changes".
pub struct StubDiffService {
    diffs: Mutex<std::collections::VecDeque<String>>,
}

impl StubDiffService {
    pub fn new(diffs: Vec<&str>) -> Self {
        Self {
            diffs: Mutex::new(diffs.into_iter().map(String::from).collect()),
        }
    }
}

#[async_trait]
impl DiffService for StubDiffService {
    async fn get_diff(&self) -> Result<String, VcsError> {
        Ok(self.diffs.lock().await.pop_front().unwrap_or_default())
    }
}

/// One recorded commit-service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOp {
    OverwriteBranch,
    Commit { message: String, push: bool },
}

/// Records commit-service calls in order; optionally fails branch creation.
pub struct RecordingCommitService {
    ops: Mutex<Vec<CommitOp>>,
    fail_branch: bool,
}

impl RecordingCommitService {
    pub fn new() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            fail_branch: false,
        }
    }

    /// A service whose branch creation fails, simulating an external error.
    pub fn failing_branch() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            fail_branch: true,
        }
    }

    pub async fn ops(&self) -> Vec<CommitOp> {
        self.ops.lock().await.clone()
    }
}

#[async_trait]
impl CommitService for RecordingCommitService {
    async fn overwrite_new_branch(&self) -> Result<(), VcsError> {
        if self.fail_branch {
            return Err(VcsError::CommandFailed {
                command: "checkout -B pullsmith/issue-42 main".into(),
                stderr: "fatal: not a git repository".into(),
            });
        }
        self.ops.lock().await.push(CommitOp::OverwriteBranch);
        Ok(())
    }

    async fn commit(&self, message: &str, push: bool) -> Result<(), VcsError> {
        self.ops.lock().await.push(CommitOp::Commit {
            message: message.to_string(),
            push,
        });
        Ok(())
    }
}
