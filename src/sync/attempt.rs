//! Merge attempt on a disposable sync branch

use crate::error::Result;
use crate::repo::{MergeStatus, RepositoryWorkspace};
use crate::types::{MergeOutcome, SyncPair};
use tracing::{debug, warn};

/// Reset `sync_branch` to the destination tip and merge base into it.
///
/// A conflicting merge is aborted before returning, so the branch is either
/// merged or back at the destination tip. Nothing is pushed.
pub fn attempt_merge(
    workspace: &mut dyn RepositoryWorkspace,
    pair: &SyncPair,
    sync_branch: &str,
) -> Result<MergeOutcome> {
    debug!(%pair, sync_branch, "resetting sync branch to destination tip");
    workspace.reset_branch(sync_branch, &pair.destination)?;

    match workspace.merge(&pair.base, &pair.merge_message())? {
        MergeStatus::Merged => {
            debug!(%pair, "merge is clean");
            Ok(MergeOutcome::Clean)
        }
        MergeStatus::Conflicted { paths } => {
            warn!(
                %pair,
                conflicts = %paths.join(", "),
                "merge conflict, aborting merge"
            );
            workspace.abort_merge()?;
            Ok(MergeOutcome::Conflict)
        }
    }
}
