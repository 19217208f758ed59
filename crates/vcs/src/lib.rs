//! Git adapter for the commit and diff services.
//!
//! The agent commits deterministically and owns its branch for the duration
//! of an attempt, so this stays a small, explicit wrapper around `git`
//! subprocess calls. Failures carry the command line and stderr and
//! propagate unchanged; this layer does not retry.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use pullsmith_core::error::VcsError;
use pullsmith_core::vcs::{CommitService, DiffService};

/// Executes git commands against a working tree, bound to one branch.
#[derive(Debug, Clone)]
pub struct GitBackend {
    workdir: PathBuf,
    branch: String,
    base_branch: String,
    remote: String,
}

impl GitBackend {
    pub fn new(workdir: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            branch: branch.into(),
            base_branch: "main".into(),
            remote: "origin".into(),
        }
    }

    pub fn with_base_branch(mut self, base_branch: impl Into<String>) -> Self {
        self.base_branch = base_branch.into();
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Build a backend for one issue attempt from the configured settings.
    pub fn for_issue(settings: &pullsmith_config::VcsSettings, issue_number: u64) -> Self {
        Self::new(
            &settings.workdir,
            issue_branch(&settings.branch_prefix, issue_number),
        )
        .with_base_branch(&settings.base_branch)
        .with_remote(&settings.remote)
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::Output, VcsError> {
        debug!(command = %args.join(" "), "Running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| VcsError::Spawn {
                command: args.join(" "),
                source: e,
            })
    }

    async fn run_checked(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl CommitService for GitBackend {
    async fn overwrite_new_branch(&self) -> Result<(), VcsError> {
        if !is_valid_branch_name(&self.branch) {
            return Err(VcsError::InvalidBranch(self.branch.clone()));
        }
        debug!(branch = %self.branch, base = %self.base_branch, "Recreating working branch");
        self.run_checked(&["checkout", "-B", &self.branch, &self.base_branch])
            .await?;
        Ok(())
    }

    async fn commit(&self, message: &str, push: bool) -> Result<(), VcsError> {
        self.run_checked(&["add", "-A"]).await?;
        // --allow-empty: an empty commit is a legal, reportable outcome and
        // keeps the branch history aligned with the plan.
        self.run_checked(&["commit", "--allow-empty", "-m", message])
            .await?;
        debug!(message, "Created commit");

        if push {
            let refspec = format!("{0}:{0}", self.branch);
            self.run_checked(&["push", "--force", &self.remote, &refspec])
                .await?;
            debug!(remote = %self.remote, branch = %self.branch, "Pushed");
        }
        Ok(())
    }
}

#[async_trait]
impl DiffService for GitBackend {
    async fn get_diff(&self) -> Result<String, VcsError> {
        // Stage everything first so new files show up in the diff.
        self.run_checked(&["add", "-A"]).await?;
        self.run_checked(&["diff", "--cached"]).await
    }
}

/// Deterministic branch name for an issue-triggered attempt.
pub fn issue_branch(prefix: &str, issue_number: u64) -> String {
    format!("{prefix}issue-{issue_number}")
}

fn is_valid_branch_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('/')
        && !name.contains("..")
        && !name.contains(char::is_whitespace)
}
