//! Per-run outcome records

use crate::sync::auto_merge::AutoMergeOutcome;
use crate::sync::plan::{NoOpReason, SyncAction};
use crate::types::{DiffStatus, MergeOutcome, PullRequest, SyncPair};

/// What happened to one pair during a run
#[derive(Debug, Clone)]
pub struct PairReport {
    /// The pair
    pub pair: SyncPair,
    /// Derived sync branch name
    pub sync_branch: String,
    /// Diff result, if the diff step completed
    pub diff_status: Option<DiffStatus>,
    /// Merge attempt result, if reached
    pub merge_outcome: Option<MergeOutcome>,
    /// Planned (or executed) action, if reached
    pub action: Option<SyncAction>,
    /// PR touched by the action
    pub pull_request: Option<PullRequest>,
    /// Auto-merge result, when `--merge-prs` ran
    pub auto_merge: Option<AutoMergeOutcome>,
    /// Error that stopped the pair
    pub error: Option<String>,
}

impl PairReport {
    /// Empty report for a pair about to be processed
    pub const fn new(pair: SyncPair, sync_branch: String) -> Self {
        Self {
            pair,
            sync_branch,
            diff_status: None,
            merge_outcome: None,
            action: None,
            pull_request: None,
            auto_merge: None,
            error: None,
        }
    }

    /// Classify the pair for the summary
    pub fn status(&self) -> PairStatus {
        if self.error.is_some() {
            return PairStatus::Errored;
        }
        if self.merge_outcome == Some(MergeOutcome::Conflict) {
            return PairStatus::Conflicted;
        }
        match &self.action {
            Some(SyncAction::CreatePr { .. } | SyncAction::UpdatePr { .. }) => PairStatus::Synced,
            Some(SyncAction::NoOp(NoOpReason::Conflict { .. })) => PairStatus::Conflicted,
            _ => PairStatus::UpToDate,
        }
    }
}

/// Summary bucket for a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStatus {
    /// Sync PR created or refreshed
    Synced,
    /// Nothing to merge (any stale PR closed)
    UpToDate,
    /// Merge conflicted, needs manual resolution
    Conflicted,
    /// A step failed
    Errored,
}

impl std::fmt::Display for PairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::UpToDate => write!(f, "up-to-date"),
            Self::Conflicted => write!(f, "conflicted"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Outcome of a whole run, in config order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One entry per configured pair
    pub pairs: Vec<PairReport>,
    /// Whether remote mutations were suppressed
    pub dry_run: bool,
}

impl RunReport {
    /// Count pairs per status
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for report in &self.pairs {
            match report.status() {
                PairStatus::Synced => summary.synced += 1,
                PairStatus::UpToDate => summary.up_to_date += 1,
                PairStatus::Conflicted => summary.conflicted += 1,
                PairStatus::Errored => summary.errored += 1,
            }
        }
        summary
    }

    /// Whether any pair errored (drives the exit code)
    pub fn has_errors(&self) -> bool {
        self.pairs.iter().any(|r| r.error.is_some())
    }
}

/// Final counts printed after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pairs with a PR created or refreshed
    pub synced: usize,
    /// Pairs already in sync
    pub up_to_date: usize,
    /// Pairs with merge conflicts
    pub conflicted: usize,
    /// Pairs that failed
    pub errored: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} synced, {} up-to-date, {} conflicted, {} errored",
            self.synced, self.up_to_date, self.conflicted, self.errored
        )
    }
}
