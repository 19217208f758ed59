//! Action trait — the abstraction over context-transforming units of work.
//!
//! An action is anything that advances an attempt: an LLM call that produces
//! a plan, a file edit, a request for more information. Every action receives
//! the whole context and returns the whole context.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

use crate::context::Context;
use crate::error::ActionError;

/// How an action's execution affects the surrounding iteration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// More work may remain; keep iterating.
    Continue,

    /// The action considers the current round complete.
    Finished,
}

/// The result of one action execution: the updated context, a loop signal,
/// and a summary line for the action history.
#[derive(Debug)]
pub struct ActionOutcome {
    pub context: Context,
    pub status: ActionStatus,
    pub summary: String,
}

impl ActionOutcome {
    /// An outcome that keeps the loop going.
    pub fn next(context: Context, summary: impl Into<String>) -> Self {
        Self {
            context,
            status: ActionStatus::Continue,
            summary: summary.into(),
        }
    }

    /// An outcome that signals the round is complete.
    pub fn finished(context: Context, summary: impl Into<String>) -> Self {
        Self {
            context,
            status: ActionStatus::Finished,
            summary: summary.into(),
        }
    }
}

/// The core Action trait.
///
/// Each action is registered in the [`ActionRegistry`] under its id and made
/// available to the runner by name, so configuration can enumerate action
/// sets as plain strings.
#[async_trait]
pub trait Action: Send + Sync {
    /// The unique id of this action (e.g., "plan_pull_request", "edit_file").
    fn id(&self) -> &str;

    /// What this action does, for selection and reporting.
    fn description(&self) -> &str;

    /// Whether this action can make progress against the given context.
    fn can_run(&self, _context: &Context) -> bool {
        true
    }

    /// Execute against the current context.
    async fn execute(&self, context: Context) -> Result<ActionOutcome, ActionError>;
}

/// A registry of available actions.
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action. Replaces any existing action with the same id.
    pub fn register(&mut self, action: Box<dyn Action>) {
        let id = action.id().to_string();
        self.actions.insert(id, action);
    }

    /// Get an action by id.
    pub fn get(&self, id: &str) -> Option<&dyn Action> {
        self.actions.get(id).map(|a| a.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// List all registered action ids.
    pub fn ids(&self) -> Vec<&str> {
        self.actions.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Chooses which action runs next.
///
/// The production selector for LLM-backed action sets lives outside this
/// workspace; deterministic selectors ship with the runner crate.
#[async_trait]
pub trait ActionSelector: Send + Sync {
    /// Pick the next action id from `candidates`, or `None` when no action
    /// can proceed. `headings` describe context keys for explanation or
    /// prompting purposes.
    async fn select(
        &self,
        candidates: &[String],
        context: &Context,
        headings: &BTreeMap<String, String>,
    ) -> Result<Option<String>, ActionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trivial action that stamps a marker key into the context.
    struct MarkerAction;

    #[async_trait]
    impl Action for MarkerAction {
        fn id(&self) -> &str {
            "marker"
        }
        fn description(&self) -> &str {
            "Stamps a marker into the context"
        }
        async fn execute(&self, mut context: Context) -> Result<ActionOutcome, ActionError> {
            context.insert("marker", serde_json::json!(true));
            Ok(ActionOutcome::finished(context, "stamped marker"))
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ActionRegistry::new();
        registry.register(Box::new(MarkerAction));
        assert!(registry.get("marker").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert!(registry.contains("marker"));
    }

    #[tokio::test]
    async fn execute_returns_whole_context() {
        let mut registry = ActionRegistry::new();
        registry.register(Box::new(MarkerAction));

        let mut context = Context::new();
        context.insert("existing", serde_json::json!("kept"));

        let action = registry.get("marker").unwrap();
        let outcome = action.execute(context).await.unwrap();

        assert_eq!(outcome.status, ActionStatus::Finished);
        assert!(outcome.context.contains("marker"));
        // Prior keys survive: actions mutate the whole context, not a view.
        assert!(outcome.context.contains("existing"));
    }
}
