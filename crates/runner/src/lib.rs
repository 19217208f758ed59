//! The iterative action-execution protocol.
//!
//! The runner drives a bounded **select → execute → record** loop over a set
//! of candidate actions:
//!
//! 1. Ask the selector for the next action from the allowed set
//! 2. Execute it with the current context
//! 3. Append an entry to the action history, adopt the returned context
//! 4. Stop when an action signals finished (if the caller opted in), when
//!    the iteration bound is reached, or when no action can proceed
//!
//! Iterations are strictly sequential: each iteration's output context is
//! the next iteration's input.

pub mod selector;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use pullsmith_core::action::{Action, ActionRegistry, ActionSelector, ActionStatus};
use pullsmith_core::context::{ActionRecord, Context};
use pullsmith_core::error::ActionError;
use pullsmith_core::event::{DomainEvent, EventBus};
use pullsmith_core::Result;

pub use selector::{ScriptedSelector, SequentialSelector};

/// Options for one iterative run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Hard bound on iterations.
    pub max_iterations: u32,

    /// When true, an action reporting [`ActionStatus::Finished`] terminates
    /// the run early instead of consuming the remaining iterations.
    pub include_finished: bool,

    /// Descriptions of context keys, passed through to the selector for
    /// explanation or prompting purposes.
    pub context_headings: BTreeMap<String, String>,
}

impl RunOptions {
    /// A single decisive iteration (the planning shape).
    pub fn single_shot() -> Self {
        Self {
            max_iterations: 1,
            include_finished: false,
            context_headings: BTreeMap::new(),
        }
    }

    /// A bounded run that honors the finished signal (the codegen shape).
    pub fn bounded(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            include_finished: true,
            context_headings: BTreeMap::new(),
        }
    }

    pub fn with_heading(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.context_headings.insert(key.into(), text.into());
        self
    }
}

/// Executes actions iteratively against a context.
pub struct ActionRunner {
    registry: Arc<ActionRegistry>,
    selector: Arc<dyn ActionSelector>,
    events: Arc<EventBus>,
}

impl ActionRunner {
    pub fn new(
        registry: Arc<ActionRegistry>,
        selector: Arc<dyn ActionSelector>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            registry,
            selector,
            events,
        }
    }

    /// Run actions from `action_ids` against `context` until an iteration
    /// signals finished, the bound is reached, or no action can proceed.
    ///
    /// Whether a required result key exists afterwards is the caller's
    /// business: a run that produced nothing usable is still `Ok`.
    pub async fn run_iteratively(
        &self,
        action_ids: &[String],
        mut context: Context,
        options: &RunOptions,
    ) -> Result<Context> {
        let mut iterations = 0u32;

        while iterations < options.max_iterations {
            iterations += 1;
            debug!(
                iteration = iterations,
                candidates = action_ids.len(),
                "Action loop iteration"
            );

            let selected = self
                .selector
                .select(action_ids, &context, &options.context_headings)
                .await?;

            let Some(id) = selected else {
                debug!(iteration = iterations, "No runnable action, stopping");
                return Ok(context);
            };

            let action = self
                .registry
                .get(&id)
                .ok_or_else(|| ActionError::NotFound(id.clone()))?;

            let start = std::time::Instant::now();
            let outcome = action.execute(context).await?;
            let duration_ms = start.elapsed().as_millis() as u64;

            context = outcome.context;
            context.record_action(ActionRecord::new(&id, &outcome.summary))?;

            let finished = outcome.status == ActionStatus::Finished;
            self.events.publish(DomainEvent::ActionExecuted {
                action: id.clone(),
                finished,
                duration_ms,
                timestamp: Utc::now(),
            });

            if finished && options.include_finished {
                debug!(action = %id, iteration = iterations, "Action signalled finished");
                return Ok(context);
            }
        }

        debug!(iterations, "Iteration bound reached");
        Ok(context)
    }
}
