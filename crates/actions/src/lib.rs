//! Built-in code-generation actions for Pullsmith.
//!
//! These actions drain a queue of planned edits from the context and apply
//! them to the working tree. The queue lives under the [`KEY_PLANNED_EDITS`]
//! key as a `Vec<PlannedEdit>` and is filled by a planning stage; each action
//! applies the edit at the head of the queue and reports finished once the
//! queue is empty.

pub mod edit_file;
pub mod new_file;

mod edit;

use std::path::{Component, Path, PathBuf};

use pullsmith_core::action::ActionRegistry;

pub use edit::{KEY_PLANNED_EDITS, PlannedEdit};
pub use edit_file::EditFileAction;
pub use new_file::NewFileAction;

/// Create a registry with all built-in codegen actions rooted at `workdir`.
pub fn default_registry(workdir: impl Into<PathBuf>) -> ActionRegistry {
    let workdir = workdir.into();
    let mut registry = ActionRegistry::new();
    registry.register(Box::new(NewFileAction::new(workdir.clone())));
    registry.register(Box::new(EditFileAction::new(workdir)));
    registry
}

/// Resolve a planned path inside the working tree.
///
/// Absolute paths and `..` components are rejected so a malformed plan can
/// never touch anything outside the checkout.
pub(crate) fn resolve_in_workdir(workdir: &Path, relative: &str) -> Result<PathBuf, String> {
    let rel = Path::new(relative);
    if rel.as_os_str().is_empty() {
        return Err("empty path".into());
    }
    if rel.is_absolute() {
        return Err(format!("absolute path not allowed: {relative}"));
    }
    if rel.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(format!("path escapes the working tree: {relative}"));
    }
    Ok(workdir.join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_both_actions() {
        let registry = default_registry("/tmp/repo");
        assert!(registry.contains("new_file"));
        assert!(registry.contains("edit_file"));
    }

    #[test]
    fn resolve_accepts_nested_relative_paths() {
        let resolved = resolve_in_workdir(Path::new("/repo"), "src/lib.rs").unwrap();
        assert_eq!(resolved, Path::new("/repo/src/lib.rs"));
    }

    #[test]
    fn resolve_rejects_absolute_paths() {
        assert!(resolve_in_workdir(Path::new("/repo"), "/etc/passwd").is_err());
    }

    #[test]
    fn resolve_rejects_parent_traversal() {
        assert!(resolve_in_workdir(Path::new("/repo"), "../outside.txt").is_err());
        assert!(resolve_in_workdir(Path::new("/repo"), "src/../../outside.txt").is_err());
    }

    #[test]
    fn resolve_rejects_empty_path() {
        assert!(resolve_in_workdir(Path::new("/repo"), "").is_err());
    }
}
