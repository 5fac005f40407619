//! Local git workspace used to stage sync merges
//!
//! All pairs share one working tree, so every operation here mutates a
//! single checked-out branch. Callers restore the default branch between
//! pairs.

mod workspace;

pub use workspace::{DEFAULT_REMOTE, GitWorkspace};

use crate::error::Result;

/// Result of a local merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStatus {
    /// Merge commit created
    Merged,
    /// Merge stopped with conflicts; the tree is mid-merge until aborted
    Conflicted {
        /// Paths with unresolved conflicts
        paths: Vec<String>,
    },
}

/// Git operations needed to evaluate and stage a sync
pub trait RepositoryWorkspace: Send {
    /// Clone the repository, or fetch if a clone already exists
    fn prepare(&mut self) -> Result<()>;

    /// Fetch all branches from the remote
    fn fetch(&mut self) -> Result<()>;

    /// Branch restored between pairs, once known
    fn default_branch(&self) -> Option<&str>;

    /// Whether `branch` exists on the remote (as of the last fetch)
    fn has_remote_branch(&self, branch: &str) -> Result<bool>;

    /// Count commits reachable from remote `base` but not remote `destination`
    fn count_missing_commits(&self, base: &str, destination: &str) -> Result<usize>;

    /// Force-create `branch` at the remote tip of `start_point` and check it out
    fn reset_branch(&mut self, branch: &str, start_point: &str) -> Result<()>;

    /// Merge remote `source` into the checked-out branch (no fast-forward)
    fn merge(&mut self, source: &str, message: &str) -> Result<MergeStatus>;

    /// Abort an in-progress merge
    fn abort_merge(&mut self) -> Result<()>;

    /// Force-push a local branch to the same name on the remote
    fn force_push(&mut self, branch: &str) -> Result<()>;

    /// Discard local state and check out the default branch
    fn restore_default_branch(&mut self) -> Result<()>;
}
