//! Diff evaluation - does base have commits destination lacks?

use crate::error::{Error, Result};
use crate::repo::RepositoryWorkspace;
use crate::types::{DiffStatus, SyncPair};
use tracing::debug;

/// Compare the remote tips of a pair's branches.
///
/// Both branches must exist in the fetched workspace. Read-only.
pub fn evaluate_diff(workspace: &dyn RepositoryWorkspace, pair: &SyncPair) -> Result<DiffStatus> {
    for branch in [&pair.base, &pair.destination] {
        if !workspace.has_remote_branch(branch)? {
            return Err(Error::BranchNotFound(branch.clone()));
        }
    }

    let missing = workspace.count_missing_commits(&pair.base, &pair.destination)?;
    let status = DiffStatus::from_missing_commits(missing);
    debug!(%pair, %status, "evaluated diff");
    Ok(status)
}
