//! Version-control service traits.
//!
//! The working tree and branch are the one shared mutable resource of an
//! attempt. The orchestrator assumes exclusive ownership of the branch for
//! the attempt's duration; these traits are how it exercises that ownership.

use async_trait::async_trait;

use crate::error::VcsError;

/// Produces the textual diff of the working tree since the last commit.
#[async_trait]
pub trait DiffService: Send + Sync {
    /// An empty string means no changes.
    async fn get_diff(&self) -> Result<String, VcsError>;
}

/// Creates branches and records commits.
#[async_trait]
pub trait CommitService: Send + Sync {
    /// Create (or recreate) the attempt's working branch from the base
    /// branch, discarding any previous attempt on it.
    async fn overwrite_new_branch(&self) -> Result<(), VcsError>;

    /// Commit everything in the working tree with `message`, then push when
    /// asked. An empty working tree still produces a commit.
    async fn commit(&self, message: &str, push: bool) -> Result<(), VcsError>;
}
