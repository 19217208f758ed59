//! The execution context threaded through every stage of an attempt.
//!
//! A context is a string-keyed map of JSON values. Actions receive the whole
//! context and return the whole context — nothing operates on partial views.
//! A handful of keys are reserved and have documented shapes; everything else
//! is free-form accumulation between stages.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::issue::Issue;
use crate::plan::CommitPlan;

/// One prior action invocation within the current commit-writing round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Id of the executed action
    pub action: String,

    /// Short result summary, as reported by the action
    pub summary: String,

    /// When the action ran
    pub at: DateTime<Utc>,
}

impl ActionRecord {
    pub fn new(action: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            summary: summary.into(),
            at: Utc::now(),
        }
    }
}

/// The mutable key-value accumulator threaded through one pull-request
/// attempt.
///
/// Created once per attempt (seeded with the issue), mutated by every action
/// execution, discarded when the orchestrator finishes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(flatten)]
    values: HashMap<String, Value>,
}

impl Context {
    /// The seed payload: a serialized [`Issue`].
    pub const KEY_ISSUE: &'static str = "issue";

    /// The planning stage's [`PullRequestDescription`](crate::plan::PullRequestDescription).
    pub const KEY_PULL_REQUEST_DESCRIPTION: &'static str = "pull_request_description";

    /// The [`CommitPlan`] currently being generated. Reset at the start of
    /// each commit-writing round.
    pub const KEY_CURRENT_COMMIT: &'static str = "current_commit";

    /// Ordered `Vec<ActionRecord>` for the current commit-writing round.
    /// Reset to empty at the start of each round.
    pub const KEY_ACTION_HISTORY: &'static str = "action_history";

    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with the issue payload.
    pub fn seeded_with_issue(issue: &Issue) -> Result<Self> {
        let mut context = Self::new();
        context.insert_typed(Self::KEY_ISSUE, issue)?;
        Ok(context)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Serialize a typed value into the context.
    pub fn insert_typed<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        self.values.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Deserialize a typed value out of the context.
    ///
    /// Returns `Ok(None)` when the key is absent. A present value that does
    /// not deserialize as `T` is a contract violation between whoever wrote
    /// the key and whoever is reading it, and surfaces as an error rather
    /// than being conflated with absence.
    pub fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.values.get(key) else {
            return Ok(None);
        };
        match serde_json::from_value(value.clone()) {
            Ok(typed) => Ok(Some(typed)),
            Err(_) => Err(Error::ContractViolation {
                key: key.to_string(),
                expected: std::any::type_name::<T>(),
                actual: json_shape(value).to_string(),
            }),
        }
    }

    /// All keys currently present.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }

    // ── Reserved-key helpers ──

    /// Stamp the commit currently being generated.
    pub fn set_current_commit(&mut self, commit: &CommitPlan) -> Result<()> {
        self.insert_typed(Self::KEY_CURRENT_COMMIT, commit)
    }

    /// Reset the action history to empty, starting a commit-writing round.
    pub fn reset_action_history(&mut self) {
        self.values
            .insert(Self::KEY_ACTION_HISTORY.into(), Value::Array(Vec::new()));
    }

    /// Append a record to the action history.
    pub fn record_action(&mut self, record: ActionRecord) -> Result<()> {
        let mut history = self.action_history()?;
        history.push(record);
        self.insert_typed(Self::KEY_ACTION_HISTORY, &history)
    }

    /// The action history for the current round (empty when never set).
    pub fn action_history(&self) -> Result<Vec<ActionRecord>> {
        Ok(self
            .get_typed(Self::KEY_ACTION_HISTORY)?
            .unwrap_or_default())
    }
}

/// Coarse JSON shape name for contract-violation messages.
fn json_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
