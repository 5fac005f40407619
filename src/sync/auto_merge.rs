//! Optional merging of clean sync PRs (`--merge-prs`)

use crate::platform::PullRequestGateway;
use crate::types::{MergeableState, PrState, PullRequestDetails};
use tracing::{error, info, warn};

/// Whether a sync PR should be merged now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoMergeDecision {
    /// GitHub reports the PR clean
    Merge,
    /// Not mergeable right now
    Skip {
        /// Human-readable reason
        reason: String,
    },
}

/// What happened when auto-merge ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoMergeOutcome {
    /// PR merged
    Merged {
        /// Merge commit SHA, if reported
        sha: Option<String>,
    },
    /// PR left open
    Skipped {
        /// Why it wasn't merged
        reason: String,
    },
    /// The merge call failed or was refused
    Failed {
        /// Error from GitHub
        message: String,
    },
}

impl std::fmt::Display for AutoMergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged { sha: Some(sha) } => write!(f, "merged ({sha})"),
            Self::Merged { sha: None } => write!(f, "merged"),
            Self::Skipped { reason } => write!(f, "not merged: {reason}"),
            Self::Failed { message } => write!(f, "merge failed: {message}"),
        }
    }
}

/// Decide whether to merge from PR details (pure)
pub fn plan_auto_merge(details: &PullRequestDetails) -> AutoMergeDecision {
    let skip = |reason: &str| AutoMergeDecision::Skip {
        reason: reason.to_string(),
    };

    if details.state != PrState::Open {
        return skip(&format!("PR is {}", details.state));
    }
    if details.is_draft {
        return skip("PR is a draft");
    }

    match details.mergeable_state {
        MergeableState::Clean => AutoMergeDecision::Merge,
        MergeableState::Blocked => {
            skip("blocked from merging, it may require approvals or passing checks")
        }
        MergeableState::Dirty => skip("has merge conflicts"),
        MergeableState::Draft => skip("PR is a draft"),
        MergeableState::Unknown => skip("merge status unknown, GitHub may still be computing it"),
        other => skip(&format!("not in a mergeable state ({other})")),
    }
}

/// Fetch details and merge the PR if it is clean (EFFECTFUL)
///
/// Errors are folded into the outcome; auto-merge never fails a pair.
pub async fn auto_merge(gateway: &dyn PullRequestGateway, pr_number: u64) -> AutoMergeOutcome {
    let details = match gateway.get_pr_details(pr_number).await {
        Ok(details) => details,
        Err(e) => {
            error!(pr_number, error = %e, "failed to fetch PR details for auto-merge");
            return AutoMergeOutcome::Failed {
                message: e.to_string(),
            };
        }
    };

    match plan_auto_merge(&details) {
        AutoMergeDecision::Skip { reason } => {
            warn!(pr_number, %reason, "skipping auto-merge");
            AutoMergeOutcome::Skipped { reason }
        }
        AutoMergeDecision::Merge => {
            info!(pr_number, "PR is clean, merging");
            match gateway.merge_pr(pr_number).await {
                Ok(result) if result.merged => {
                    info!(pr_number, sha = ?result.sha, "merged PR");
                    AutoMergeOutcome::Merged { sha: result.sha }
                }
                Ok(result) => {
                    let message = result
                        .message
                        .unwrap_or_else(|| "merge was not performed".to_string());
                    warn!(pr_number, %message, "merge refused");
                    AutoMergeOutcome::Failed { message }
                }
                Err(e) => {
                    error!(pr_number, error = %e, "merge failed");
                    AutoMergeOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            }
        }
    }
}
