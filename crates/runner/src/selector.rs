//! Deterministic action selectors.
//!
//! The selector decides which action runs next; for LLM-backed action sets
//! that decision is itself a model call and lives outside this workspace.
//! The selectors here cover deterministic action sets and scripted runs.

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use pullsmith_core::action::{Action, ActionRegistry, ActionSelector};
use pullsmith_core::context::Context;
use pullsmith_core::error::ActionError;

/// Picks the first candidate whose `can_run` reports true, in candidate
/// order. Suitable for action sets whose applicability is decidable from the
/// context alone.
pub struct SequentialSelector {
    registry: Arc<ActionRegistry>,
}

impl SequentialSelector {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl ActionSelector for SequentialSelector {
    async fn select(
        &self,
        candidates: &[String],
        context: &Context,
        _headings: &BTreeMap<String, String>,
    ) -> Result<Option<String>, ActionError> {
        for id in candidates {
            let Some(action) = self.registry.get(id) else {
                // A candidate the registry doesn't know is a wiring bug.
                return Err(ActionError::NotFound(id.clone()));
            };
            if action.can_run(context) {
                return Ok(Some(id.clone()));
            }
        }
        Ok(None)
    }
}

/// Replays a fixed sequence of choices. `None` entries (and queue
/// exhaustion) mean "nothing can proceed". Useful for scripting runs.
pub struct ScriptedSelector {
    choices: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedSelector {
    pub fn new(choices: Vec<Option<String>>) -> Self {
        Self {
            choices: Mutex::new(choices.into()),
        }
    }
}

#[async_trait]
impl ActionSelector for ScriptedSelector {
    async fn select(
        &self,
        _candidates: &[String],
        _context: &Context,
        _headings: &BTreeMap<String, String>,
    ) -> Result<Option<String>, ActionError> {
        Ok(self.choices.lock().await.pop_front().flatten())
    }
}
