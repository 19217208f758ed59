//! Edit-file action — apply a planned search/replace to an existing file.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use pullsmith_core::action::{Action, ActionOutcome, ActionStatus};
use pullsmith_core::context::Context;
use pullsmith_core::error::ActionError;

use crate::edit::{peek_queue, store_queue, take_queue, PlannedEdit};
use crate::resolve_in_workdir;

pub struct EditFileAction {
    workdir: PathBuf,
}

impl EditFileAction {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn failed(&self, reason: impl Into<String>) -> ActionError {
        ActionError::ExecutionFailed {
            action: "edit_file".into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Action for EditFileAction {
    fn id(&self) -> &str {
        "edit_file"
    }

    fn description(&self) -> &str {
        "Apply a planned search/replace edit to an existing file"
    }

    fn can_run(&self, context: &Context) -> bool {
        matches!(
            peek_queue(context).as_deref(),
            Some([PlannedEdit::EditFile { .. }, ..])
        )
    }

    async fn execute(&self, mut context: Context) -> Result<ActionOutcome, ActionError> {
        let mut queue = take_queue(&context, "edit_file")?;

        let Some(PlannedEdit::EditFile { path, search, replace }) = queue.first().cloned() else {
            return Err(ActionError::InvalidContext {
                action: "edit_file".into(),
                reason: "no edit_file edit at the head of planned_edits".into(),
            });
        };

        let target = resolve_in_workdir(&self.workdir, &path).map_err(|r| self.failed(r))?;

        let current = tokio::fs::read_to_string(&target)
            .await
            .map_err(|e| self.failed(format!("read {path}: {e}")))?;

        if !current.contains(&search) {
            return Err(self.failed(format!("search text not found in {path}")));
        }
        let updated = current.replacen(&search, &replace, 1);

        tokio::fs::write(&target, &updated)
            .await
            .map_err(|e| self.failed(format!("write {path}: {e}")))?;

        debug!(path = %path, "Edited file");

        queue.remove(0);
        store_queue(&mut context, &queue, "edit_file")?;

        let status = if queue.is_empty() {
            ActionStatus::Finished
        } else {
            ActionStatus::Continue
        };
        Ok(ActionOutcome {
            context,
            status,
            summary: format!("edited {path}"),
        })
    }
}
