//! Error types for the Pullsmith domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Pullsmith operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Action errors ---
    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    // --- Version-control errors ---
    #[error("VCS error: {0}")]
    Vcs(#[from] VcsError),

    // --- Contract violations ---
    /// A context key held a value of a shape its reader did not expect.
    /// This is a bug in an upstream collaborator, never a runtime condition.
    #[error("Context key '{key}' holds {actual}, expected {expected}")]
    ContractViolation {
        key: String,
        expected: &'static str,
        actual: String,
    },

    /// An event variant this agent does not handle was routed to it.
    #[error("Event kind '{kind}' is not supported by this agent")]
    UnsupportedEvent { kind: String },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Action not found: {0}")]
    NotFound(String),

    #[error("Action execution failed: {action} — {reason}")]
    ExecutionFailed { action: String, reason: String },

    #[error("Invalid context for action {action}: {reason}")]
    InvalidContext { action: String, reason: String },

    #[error("Action selection failed: {0}")]
    SelectionFailed(String),
}

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to spawn git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid branch name: {0}")]
    InvalidBranch(String),
}
