//! The planned-edit queue shared by the built-in codegen actions.

use serde::{Deserialize, Serialize};

use pullsmith_core::context::Context;
use pullsmith_core::error::ActionError;

/// Context key holding the `Vec<PlannedEdit>` for the current commit.
pub const KEY_PLANNED_EDITS: &str = "planned_edits";

/// One planned working-tree edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedEdit {
    /// Create a file with the given content.
    NewFile { path: String, content: String },

    /// Replace the first occurrence of `search` in an existing file.
    EditFile {
        path: String,
        search: String,
        replace: String,
    },
}

/// Read the queue without failing: a malformed queue just means the action
/// cannot run (the error surfaces at execute time instead).
pub(crate) fn peek_queue(context: &Context) -> Option<Vec<PlannedEdit>> {
    context.get_typed(KEY_PLANNED_EDITS).ok().flatten()
}

/// Read the queue for execution, surfacing a malformed queue as an error.
pub(crate) fn take_queue(context: &Context, action: &str) -> Result<Vec<PlannedEdit>, ActionError> {
    context
        .get_typed(KEY_PLANNED_EDITS)
        .map_err(|e| ActionError::InvalidContext {
            action: action.to_string(),
            reason: e.to_string(),
        })
        .map(Option::unwrap_or_default)
}

/// Write the remaining queue back into the context.
pub(crate) fn store_queue(
    context: &mut Context,
    queue: &[PlannedEdit],
    action: &str,
) -> Result<(), ActionError> {
    context
        .insert_typed(KEY_PLANNED_EDITS, &queue)
        .map_err(|e| ActionError::ExecutionFailed {
            action: action.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_edit_deserializes_from_tagged_json() {
        let edit: PlannedEdit = serde_json::from_str(
            r#"{"kind": "new_file", "path": "src/foo.rs", "content": "fn foo() {}"}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            PlannedEdit::NewFile {
                path: "src/foo.rs".into(),
                content: "fn foo() {}".into(),
            }
        );
    }

    #[test]
    fn peek_swallows_malformed_queue() {
        let mut context = Context::new();
        context.insert(KEY_PLANNED_EDITS, serde_json::json!("not a queue"));
        assert!(peek_queue(&context).is_none());
    }

    #[test]
    fn take_surfaces_malformed_queue() {
        let mut context = Context::new();
        context.insert(KEY_PLANNED_EDITS, serde_json::json!(42));
        let err = take_queue(&context, "new_file").unwrap_err();
        assert!(matches!(err, ActionError::InvalidContext { .. }));
    }
}
