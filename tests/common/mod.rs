//! Shared test helpers

#![allow(dead_code)]

pub mod mock_gateway;
pub mod temp_git;

pub use mock_gateway::MockGateway;
pub use mock_workspace::{MockWorkspace, WorkspaceOp};
pub use temp_git::TempGitRemote;

use chrono::{DateTime, TimeZone, Utc};
use release_sync::config::{DEFAULT_SYNC_BRANCH_PREFIX, SyncConfig};
use release_sync::types::{PlatformConfig, PrState, PullRequest, SyncPair};

/// Platform config for `test/repo` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// Open PR with the given number, head and base
pub fn make_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        head_ref: head.to_string(),
        base_ref: base.to_string(),
        title: format!("PR {number}"),
        state: PrState::Open,
        created_at: None,
    }
}

/// Open PR created at `minutes` past a fixed epoch
pub fn make_pr_at(number: u64, head: &str, base: &str, minutes: i64) -> PullRequest {
    PullRequest {
        created_at: Some(at_minutes(minutes)),
        ..make_pr(number, head, base)
    }
}

fn at_minutes(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// Config over the given pairs with the default prefix
pub fn make_config(pairs: &[(&str, &str)]) -> SyncConfig {
    SyncConfig {
        repo_url: "git@github.com:test/repo.git".to_string(),
        conflict_branch_prefix: DEFAULT_SYNC_BRANCH_PREFIX.to_string(),
        pairs: pairs.iter().map(|(b, d)| SyncPair::new(*b, *d)).collect(),
        default_branch: None,
        commit_identity: None,
    }
}

/// Sync branch name under the default prefix
pub fn sync_branch(base: &str, destination: &str) -> String {
    SyncPair::new(base, destination).sync_branch_name(DEFAULT_SYNC_BRANCH_PREFIX)
}
