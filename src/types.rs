//! Core types for release-sync

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A base branch that must flow into a destination branch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncPair {
    /// Branch whose commits propagate forward
    pub base: String,
    /// Branch that receives the base's commits via PR
    pub destination: String,
}

impl SyncPair {
    /// Create a pair from branch names
    pub fn new(base: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            destination: destination.into(),
        }
    }

    /// Name of the disposable branch used to stage the merge
    ///
    /// Always `{prefix}{base}-into-{destination}`.
    pub fn sync_branch_name(&self, prefix: &str) -> String {
        format!("{prefix}{}-into-{}", self.base, self.destination)
    }

    /// Title used for the sync PR
    pub fn pr_title(&self) -> String {
        format!(
            "[Automated Sync] Sync {} into {}",
            self.base, self.destination
        )
    }

    /// Body used for the sync PR
    pub fn pr_body(&self) -> String {
        format!(
            "This is an automated pull request to sync changes from `{}` into `{}`.",
            self.base, self.destination
        )
    }

    /// Message of the merge commit created on the sync branch
    pub fn merge_message(&self) -> String {
        format!("Merge branch '{}' into {}", self.base, self.destination)
    }
}

impl std::fmt::Display for SyncPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.base, self.destination)
    }
}

/// Whether the base has commits the destination lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffStatus {
    /// Every commit of base is already reachable from destination
    UpToDate,
    /// Base has commits missing from destination
    Ahead {
        /// Number of commits reachable from base but not destination
        commits: usize,
    },
}

impl DiffStatus {
    /// Classify a missing-commit count
    pub const fn from_missing_commits(commits: usize) -> Self {
        if commits == 0 {
            Self::UpToDate
        } else {
            Self::Ahead { commits }
        }
    }

    /// Whether a merge attempt is needed
    pub const fn needs_sync(self) -> bool {
        matches!(self, Self::Ahead { .. })
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpToDate => write!(f, "up to date"),
            Self::Ahead { commits: 1 } => write!(f, "1 commit to merge"),
            Self::Ahead { commits } => write!(f, "{commits} commits to merge"),
        }
    }
}

/// Result of merging base into the sync branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeOutcome {
    /// No merge was attempted because the pair was up to date
    Skipped,
    /// Merge completed without conflicts
    Clean,
    /// Merge hit conflicts and was aborted
    Conflict,
}

impl std::fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Clean => write!(f, "clean merge"),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// A pull request relevant to a sync pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Head branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// PR title
    pub title: String,
    /// Current state
    pub state: PrState,
    /// Creation time, when GitHub reported it
    pub created_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Whether the PR is still open
    pub fn is_open(&self) -> bool {
        self.state == PrState::Open
    }
}

/// Mergeability as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeableState {
    /// Mergeable, checks passing
    Clean,
    /// Blocked by required reviews or checks
    Blocked,
    /// Head is out of date with base
    Behind,
    /// Merge conflicts
    Dirty,
    /// Draft PR
    Draft,
    /// Mergeable with failing non-required checks
    Unstable,
    /// Mergeable with passing commit status and pre-receive hooks
    HasHooks,
    /// GitHub has not finished computing mergeability
    Unknown,
}

impl std::fmt::Display for MergeableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Clean => "clean",
            Self::Blocked => "blocked",
            Self::Behind => "behind",
            Self::Dirty => "dirty",
            Self::Draft => "draft",
            Self::Unstable => "unstable",
            Self::HasHooks => "has_hooks",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Extended PR details for auto-merge decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// Current state of the PR
    pub state: PrState,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Detailed mergeability (`Unknown` while GitHub is computing)
    pub mergeable_state: MergeableState,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Repository coordinates on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}
