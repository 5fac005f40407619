//! Action execution - effectful operations
//!
//! This module takes a `SyncAction` (decided by the pure planning functions)
//! and performs it: force-pushing the sync branch and calling the PR API.

use crate::error::Result;
use crate::platform::PullRequestGateway;
use crate::repo::RepositoryWorkspace;
use crate::sync::plan::SyncAction;
use crate::types::PullRequest;
use tracing::info;

/// Execute a planned action (EFFECTFUL)
///
/// Create and update both force-push the sync branch before the API call;
/// the push is what refreshes an existing PR's diff under the same number.
///
/// # Returns
/// The PR that was created, updated or closed, if any
pub async fn execute_action(
    action: &SyncAction,
    workspace: &mut dyn RepositoryWorkspace,
    gateway: &dyn PullRequestGateway,
) -> Result<Option<PullRequest>> {
    match action {
        SyncAction::NoOp(_) => Ok(None),
        SyncAction::ClosePr { pr_number } => {
            info!(pr_number, "closing stale sync PR");
            let pr = gateway.close_pr(*pr_number).await?;
            Ok(Some(pr))
        }
        SyncAction::CreatePr {
            head,
            base,
            title,
            body,
        } => {
            info!(branch = %head, "force-pushing sync branch");
            workspace.force_push(head)?;
            let pr = gateway.create_pr(head, base, title, body).await?;
            info!(pr_number = pr.number, url = %pr.html_url, "created sync PR");
            Ok(Some(pr))
        }
        SyncAction::UpdatePr {
            pr_number,
            head,
            title,
            body,
        } => {
            info!(branch = %head, pr_number, "force-pushing sync branch");
            workspace.force_push(head)?;
            let pr = gateway.update_pr(*pr_number, title, body).await?;
            info!(pr_number, url = %pr.html_url, "updated sync PR");
            Ok(Some(pr))
        }
    }
}
