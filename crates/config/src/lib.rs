//! Configuration loading and validation for Pullsmith.
//!
//! Loads configuration from a TOML file with `PULLSMITH_*` environment
//! variable overrides. Validates all settings at startup so a misconfigured
//! deployment fails before its first event, not during an attempt.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Upper bound on `max_codegen_iterations`; a plan needing more rounds than
/// this per commit is a planning problem, not an iteration problem.
pub const MAX_CODEGEN_ITERATIONS_LIMIT: u32 = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Action sets and iteration bounds
    #[serde(default)]
    pub agent: AgentSettings,

    /// Version-control backend settings
    #[serde(default)]
    pub vcs: VcsSettings,
}

/// Action sets and bounds for the orchestrator.
///
/// Explicit configuration rather than call-site defaults: every recognized
/// knob is enumerated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Actions eligible during the single-shot planning run
    #[serde(default = "default_planning_actions")]
    pub planning_actions: Vec<String>,

    /// Actions eligible during each commit's codegen run
    #[serde(default = "default_codegen_actions")]
    pub codegen_actions: Vec<String>,

    /// Iteration bound per commit-writing round
    #[serde(default = "default_max_codegen_iterations")]
    pub max_codegen_iterations: u32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            planning_actions: default_planning_actions(),
            codegen_actions: default_codegen_actions(),
            max_codegen_iterations: default_max_codegen_iterations(),
        }
    }
}

fn default_planning_actions() -> Vec<String> {
    vec!["plan_pull_request".into(), "request_more_information".into()]
}
fn default_codegen_actions() -> Vec<String> {
    vec!["new_file".into(), "edit_file".into()]
}
fn default_max_codegen_iterations() -> u32 {
    5
}

/// Settings for the git backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcsSettings {
    /// Path to the repository checkout
    #[serde(default = "default_workdir")]
    pub workdir: String,

    /// Remote to push to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch the working branch is recreated from
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Prefix for generated branch names (e.g. `pullsmith/issue-42`)
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,
}

impl Default for VcsSettings {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            remote: default_remote(),
            base_branch: default_base_branch(),
            branch_prefix: default_branch_prefix(),
        }
    }
}

fn default_workdir() -> String {
    ".".into()
}
fn default_remote() -> String {
    "origin".into()
}
fn default_base_branch() -> String {
    "main".into()
}
fn default_branch_prefix() -> String {
    "pullsmith/".into()
}

impl AppConfig {
    /// Load, apply environment overrides, and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;
        let mut config: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path_display.clone(),
            source,
        })?;

        config.apply_env_overrides();
        config.validate()?;
        debug!(path = %path_display, "Loaded configuration");
        Ok(config)
    }

    /// Apply `PULLSMITH_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        let vars: HashMap<String, String> = std::env::vars().collect();
        self.apply_overrides(&vars);
    }

    fn apply_overrides(&mut self, vars: &HashMap<String, String>) {
        if let Some(v) = vars.get("PULLSMITH_MAX_CODEGEN_ITERATIONS")
            && let Ok(n) = v.parse()
        {
            self.agent.max_codegen_iterations = n;
        }
        if let Some(v) = vars.get("PULLSMITH_BASE_BRANCH") {
            self.vcs.base_branch = v.clone();
        }
        if let Some(v) = vars.get("PULLSMITH_REMOTE") {
            self.vcs.remote = v.clone();
        }
        if let Some(v) = vars.get("PULLSMITH_WORKDIR") {
            self.vcs.workdir = v.clone();
        }
    }

    /// Validate all settings, naming the offending field on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.planning_actions.is_empty() {
            return Err(ConfigError::Invalid {
                field: "agent.planning_actions",
                reason: "at least one planning action is required".into(),
            });
        }
        if self.agent.codegen_actions.is_empty() {
            return Err(ConfigError::Invalid {
                field: "agent.codegen_actions",
                reason: "at least one codegen action is required".into(),
            });
        }
        if self.agent.max_codegen_iterations == 0
            || self.agent.max_codegen_iterations > MAX_CODEGEN_ITERATIONS_LIMIT
        {
            return Err(ConfigError::Invalid {
                field: "agent.max_codegen_iterations",
                reason: format!(
                    "must be between 1 and {MAX_CODEGEN_ITERATIONS_LIMIT}, got {}",
                    self.agent.max_codegen_iterations
                ),
            });
        }
        if self.vcs.branch_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "vcs.branch_prefix",
                reason: "branch prefix must not be empty".into(),
            });
        }
        if self.vcs.base_branch.is_empty() {
            return Err(ConfigError::Invalid {
                field: "vcs.base_branch",
                reason: "base branch must not be empty".into(),
            });
        }
        Ok(())
    }
}
