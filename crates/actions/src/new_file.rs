//! New-file action — create a planned file in the working tree.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use pullsmith_core::action::{Action, ActionOutcome, ActionStatus};
use pullsmith_core::context::Context;
use pullsmith_core::error::ActionError;

use crate::edit::{peek_queue, store_queue, take_queue, PlannedEdit};
use crate::resolve_in_workdir;

pub struct NewFileAction {
    workdir: PathBuf,
}

impl NewFileAction {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn failed(&self, reason: impl Into<String>) -> ActionError {
        ActionError::ExecutionFailed {
            action: "new_file".into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Action for NewFileAction {
    fn id(&self) -> &str {
        "new_file"
    }

    fn description(&self) -> &str {
        "Create a new file planned for the current commit"
    }

    fn can_run(&self, context: &Context) -> bool {
        matches!(
            peek_queue(context).as_deref(),
            Some([PlannedEdit::NewFile { .. }, ..])
        )
    }

    async fn execute(&self, mut context: Context) -> Result<ActionOutcome, ActionError> {
        let mut queue = take_queue(&context, "new_file")?;

        let Some(PlannedEdit::NewFile { path, content }) = queue.first().cloned() else {
            return Err(ActionError::InvalidContext {
                action: "new_file".into(),
                reason: "no new_file edit at the head of planned_edits".into(),
            });
        };

        let target = resolve_in_workdir(&self.workdir, &path).map_err(|r| self.failed(r))?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.failed(format!("create directory for {path}: {e}")))?;
        }
        tokio::fs::write(&target, &content)
            .await
            .map_err(|e| self.failed(format!("write {path}: {e}")))?;

        debug!(path = %path, bytes = content.len(), "Created file");

        queue.remove(0);
        store_queue(&mut context, &queue, "new_file")?;

        let status = if queue.is_empty() {
            ActionStatus::Finished
        } else {
            ActionStatus::Continue
        };
        Ok(ActionOutcome {
            context,
            status,
            summary: format!("created {path}"),
        })
    }
}
