//! In-memory pull request gateway for testing
//!
//! Unlike a canned-response mock, this keeps a small PR store so repeated
//! runs observe their own earlier effects (needed for idempotence tests).

#![allow(dead_code)]

use async_trait::async_trait;
use release_sync::error::{Error, Result};
use release_sync::platform::PullRequestGateway;
use release_sync::types::{
    MergeResult, MergeableState, PrState, PullRequest, PullRequestDetails,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Call record for `update_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePrCall {
    pub pr_number: u64,
    pub title: String,
    pub body: String,
}

/// Stateful mock gateway
///
/// Features:
/// - Auto-incrementing PR numbers
/// - PR store shared across calls (create/update/close/merge mutate it)
/// - Call tracking for verification
/// - Error injection per head branch or per operation
pub struct MockGateway {
    next_pr_number: AtomicU64,
    prs: Mutex<Vec<PullRequest>>,
    mergeable_states: Mutex<HashMap<u64, MergeableState>>,
    // Call tracking
    find_calls: Mutex<Vec<(String, String)>>,
    create_calls: Mutex<Vec<CreatePrCall>>,
    update_calls: Mutex<Vec<UpdatePrCall>>,
    close_calls: Mutex<Vec<u64>>,
    details_calls: Mutex<Vec<u64>>,
    merge_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_find: Mutex<HashMap<String, String>>,
    error_on_create: Mutex<Option<String>>,
    error_on_merge: Mutex<Option<String>>,
}

impl MockGateway {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            next_pr_number: AtomicU64::new(1),
            prs: Mutex::new(Vec::new()),
            mergeable_states: Mutex::new(HashMap::new()),
            find_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
            close_calls: Mutex::new(Vec::new()),
            details_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            error_on_find: Mutex::new(HashMap::new()),
            error_on_create: Mutex::new(None),
            error_on_merge: Mutex::new(None),
        }
    }

    // === Setup ===

    /// Seed an existing PR into the store
    pub fn insert_pr(&self, pr: PullRequest) {
        let next = pr.number + 1;
        self.prs.lock().unwrap().push(pr);
        self.next_pr_number.fetch_max(next, Ordering::SeqCst);
    }

    /// Report `state` from `get_pr_details` for this PR (default: clean)
    pub fn set_mergeable_state(&self, pr_number: u64, state: MergeableState) {
        self.mergeable_states
            .lock()
            .unwrap()
            .insert(pr_number, state);
    }

    // === Error injection ===

    /// Make `find_open_prs` fail for this head branch
    pub fn fail_find_for(&self, head: &str, msg: &str) {
        self.error_on_find
            .lock()
            .unwrap()
            .insert(head.to_string(), msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create(&self, msg: &str) {
        *self.error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    // === Inspection ===

    /// All PRs in the store, any state
    pub fn prs(&self) -> Vec<PullRequest> {
        self.prs.lock().unwrap().clone()
    }

    /// Open PRs in the store
    pub fn open_prs(&self) -> Vec<PullRequest> {
        self.prs().into_iter().filter(PullRequest::is_open).collect()
    }

    /// Get a PR by number
    pub fn pr(&self, number: u64) -> Option<PullRequest> {
        self.prs().into_iter().find(|pr| pr.number == number)
    }

    pub fn get_find_calls(&self) -> Vec<(String, String)> {
        self.find_calls.lock().unwrap().clone()
    }

    pub fn get_create_calls(&self) -> Vec<CreatePrCall> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn get_update_calls(&self) -> Vec<UpdatePrCall> {
        self.update_calls.lock().unwrap().clone()
    }

    pub fn get_close_calls(&self) -> Vec<u64> {
        self.close_calls.lock().unwrap().clone()
    }

    pub fn get_details_calls(&self) -> Vec<u64> {
        self.details_calls.lock().unwrap().clone()
    }

    pub fn get_merge_calls(&self) -> Vec<u64> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Number of calls that would change GitHub state
    pub fn mutation_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
            + self.update_calls.lock().unwrap().len()
            + self.close_calls.lock().unwrap().len()
            + self.merge_calls.lock().unwrap().len()
    }

    /// Assert no create/update/close/merge call was made
    pub fn assert_no_mutations(&self) {
        assert_eq!(
            self.mutation_count(),
            0,
            "expected no mutating calls, got creates={:?} updates={:?} closes={:?} merges={:?}",
            self.get_create_calls(),
            self.get_update_calls(),
            self.get_close_calls(),
            self.get_merge_calls()
        );
    }

    fn set_state(&self, pr_number: u64, state: PrState) -> Result<PullRequest> {
        let mut prs = self.prs.lock().unwrap();
        let pr = prs
            .iter_mut()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))?;
        pr.state = state;
        Ok(pr.clone())
    }
}

#[async_trait]
impl PullRequestGateway for MockGateway {
    async fn find_open_prs(&self, head: &str, base: &str) -> Result<Vec<PullRequest>> {
        self.find_calls
            .lock()
            .unwrap()
            .push((head.to_string(), base.to_string()));

        if let Some(msg) = self.error_on_find.lock().unwrap().get(head) {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .prs
            .lock()
            .unwrap()
            .iter()
            .filter(|pr| pr.is_open() && pr.head_ref == head && pr.base_ref == base)
            .cloned()
            .collect())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = crate::common::make_pr(number, head, base);
        let pr = PullRequest {
            title: title.to_string(),
            ..pr
        };
        self.prs.lock().unwrap().push(pr.clone());
        Ok(pr)
    }

    async fn update_pr(&self, pr_number: u64, title: &str, body: &str) -> Result<PullRequest> {
        self.update_calls.lock().unwrap().push(UpdatePrCall {
            pr_number,
            title: title.to_string(),
            body: body.to_string(),
        });

        let mut prs = self.prs.lock().unwrap();
        let pr = prs
            .iter_mut()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))?;
        pr.title = title.to_string();
        Ok(pr.clone())
    }

    async fn close_pr(&self, pr_number: u64) -> Result<PullRequest> {
        self.close_calls.lock().unwrap().push(pr_number);
        self.set_state(pr_number, PrState::Closed)
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.details_calls.lock().unwrap().push(pr_number);

        let pr = self
            .pr(pr_number)
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))?;
        let mergeable_state = self
            .mergeable_states
            .lock()
            .unwrap()
            .get(&pr_number)
            .copied()
            .unwrap_or(MergeableState::Clean);

        Ok(PullRequestDetails {
            number: pr.number,
            state: pr.state,
            is_draft: false,
            mergeable_state,
        })
    }

    async fn merge_pr(&self, pr_number: u64) -> Result<MergeResult> {
        self.merge_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_merge.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.set_state(pr_number, PrState::Merged)?;
        Ok(MergeResult {
            merged: true,
            sha: Some(format!("merge{pr_number}")),
            message: None,
        })
    }
}
