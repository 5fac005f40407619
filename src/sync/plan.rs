//! Reconciliation planning - pure functions for deciding the PR action
//!
//! This module contains the pure, testable decision table that maps a diff
//! status and merge outcome, plus any open sync PRs, to a single action.
//! No I/O happens here - all data is passed in.

use crate::types::{DiffStatus, MergeOutcome, PullRequest, SyncPair};

/// Why no PR action is taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    /// Destination already contains base and no sync PR is open
    UpToDate,
    /// Merge conflicted; any open PR is left for manual resolution
    Conflict {
        /// Open sync PR left untouched, if any
        existing_pr: Option<u64>,
    },
    /// Base is ahead but no merge was attempted
    NotAttempted,
}

/// The PR action a pair requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Nothing to do
    NoOp(NoOpReason),
    /// Close a stale sync PR
    ClosePr {
        /// PR number
        pr_number: u64,
    },
    /// Push the sync branch and open a PR
    CreatePr {
        /// Sync branch (PR head)
        head: String,
        /// Destination branch (PR base)
        base: String,
        /// PR title
        title: String,
        /// PR body
        body: String,
    },
    /// Force-push the sync branch to refresh an open PR
    UpdatePr {
        /// PR number
        pr_number: u64,
        /// Sync branch (PR head)
        head: String,
        /// PR title
        title: String,
        /// PR body
        body: String,
    },
}

impl SyncAction {
    /// Whether executing the action pushes the sync branch first
    pub const fn requires_push(&self) -> bool {
        matches!(self, Self::CreatePr { .. } | Self::UpdatePr { .. })
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOp(NoOpReason::UpToDate) => write!(f, "no-op (up to date)"),
            Self::NoOp(NoOpReason::Conflict {
                existing_pr: Some(n),
            }) => write!(f, "no-op (conflict, PR #{n} left untouched)"),
            Self::NoOp(NoOpReason::Conflict { existing_pr: None }) => {
                write!(f, "no-op (conflict)")
            }
            Self::NoOp(NoOpReason::NotAttempted) => write!(f, "no-op (merge not attempted)"),
            Self::ClosePr { pr_number } => write!(f, "close stale PR #{pr_number}"),
            Self::CreatePr { head, base, .. } => write!(f, "create PR {head} -> {base}"),
            Self::UpdatePr {
                pr_number, head, ..
            } => write!(f, "update PR #{pr_number} by force-pushing {head}"),
        }
    }
}

/// Reconciliation result - the functional core output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Action to execute
    pub action: SyncAction,
    /// Extra open sync PRs that were ignored (should never happen)
    pub ignored_prs: Vec<u64>,
}

impl ReconcilePlan {
    /// Whether more than one open sync PR matched the pair
    pub fn has_anomaly(&self) -> bool {
        !self.ignored_prs.is_empty()
    }
}

/// Pick the PR to act on among open PRs for a pair.
///
/// The most recently created wins; ties (or missing timestamps) go to the
/// highest number.
pub fn select_existing_pr(existing: &[PullRequest]) -> Option<&PullRequest> {
    existing
        .iter()
        .filter(|pr| pr.is_open())
        .max_by_key(|pr| (pr.created_at, pr.number))
}

/// Decide the PR action for a pair (PURE - no I/O, easily testable)
///
/// # Arguments
/// * `pair` - The pair being synced
/// * `sync_branch` - Derived sync branch name
/// * `diff` - Result of the diff check
/// * `outcome` - Result of the merge attempt (`Skipped` when up to date)
/// * `existing` - Open PRs returned by the gateway for this pair
#[must_use]
pub fn reconcile(
    pair: &SyncPair,
    sync_branch: &str,
    diff: DiffStatus,
    outcome: MergeOutcome,
    existing: &[PullRequest],
) -> ReconcilePlan {
    let relevant: Vec<PullRequest> = existing
        .iter()
        .filter(|pr| pr.is_open() && pr.head_ref == sync_branch && pr.base_ref == pair.destination)
        .cloned()
        .collect();
    let selected = select_existing_pr(&relevant);
    let ignored_prs = selected.map_or_else(Vec::new, |chosen| {
        relevant
            .iter()
            .filter(|pr| pr.number != chosen.number)
            .map(|pr| pr.number)
            .collect()
    });
    let selected = selected.map(|pr| pr.number);

    let action = match (diff, outcome, selected) {
        (DiffStatus::UpToDate, _, None) => SyncAction::NoOp(NoOpReason::UpToDate),
        (DiffStatus::UpToDate, _, Some(pr_number)) => SyncAction::ClosePr { pr_number },
        (DiffStatus::Ahead { .. }, MergeOutcome::Clean, None) => SyncAction::CreatePr {
            head: sync_branch.to_string(),
            base: pair.destination.clone(),
            title: pair.pr_title(),
            body: pair.pr_body(),
        },
        (DiffStatus::Ahead { .. }, MergeOutcome::Clean, Some(pr_number)) => SyncAction::UpdatePr {
            pr_number,
            head: sync_branch.to_string(),
            title: pair.pr_title(),
            body: pair.pr_body(),
        },
        (DiffStatus::Ahead { .. }, MergeOutcome::Conflict, existing_pr) => {
            SyncAction::NoOp(NoOpReason::Conflict { existing_pr })
        }
        (DiffStatus::Ahead { .. }, MergeOutcome::Skipped, _) => {
            SyncAction::NoOp(NoOpReason::NotAttempted)
        }
    };

    ReconcilePlan {
        action,
        ignored_prs,
    }
}
