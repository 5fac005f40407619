//! Pull request gateway
//!
//! Narrow interface over the GitHub pull request API, so the sync engine can
//! be driven by an in-memory fake in tests.

mod detection;
mod github;

pub use detection::parse_repo_info;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{MergeResult, PullRequest, PullRequestDetails};
use async_trait::async_trait;

/// Pull request operations needed to reconcile sync PRs
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List open PRs whose head is `head` and whose base is `base`
    async fn find_open_prs(&self, head: &str, base: &str) -> Result<Vec<PullRequest>>;

    /// Create a new PR
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Rewrite title and body of an existing PR
    ///
    /// The PR's diff is refreshed by force-pushing its head branch, not by
    /// this call.
    async fn update_pr(&self, pr_number: u64, title: &str, body: &str) -> Result<PullRequest>;

    /// Close a PR without merging it
    async fn close_pr(&self, pr_number: u64) -> Result<PullRequest>;

    /// Get full PR details including mergeability
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// Merge a PR with a merge commit
    async fn merge_pr(&self, pr_number: u64) -> Result<MergeResult>;
}
