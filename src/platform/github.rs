//! GitHub pull request gateway

use crate::error::{Error, Result};
use crate::platform::PullRequestGateway;
use crate::types::{
    MergeResult, MergeableState, PlatformConfig, PrState, PullRequest, PullRequestDetails,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let base_uri = config
            .host
            .as_ref()
            .map(|h| format!("https://{h}/api/v3"));
        Self::build(token, config, base_uri.as_deref())
    }

    /// Create a service that talks to an explicit API root
    pub fn with_base_uri(token: &str, config: PlatformConfig, base_uri: &str) -> Result<Self> {
        Self::build(token, config, Some(base_uri))
    }

    fn build(token: &str, config: PlatformConfig, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, config })
    }
}

fn pr_state(pr: &octocrab::models::pulls::PullRequest) -> PrState {
    match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(octocrab::models::IssueState::Closed) if pr.merged_at.is_some() => PrState::Merged,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    }
}

fn html_url(pr: &octocrab::models::pulls::PullRequest) -> String {
    pr.html_url
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: html_url(pr),
        head_ref: pr.head.ref_field.clone(),
        base_ref: pr.base.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        state: pr_state(pr),
        created_at: pr.created_at,
    }
}

fn mergeable_state_from_octocrab(
    state: Option<&octocrab::models::pulls::MergeableState>,
) -> MergeableState {
    use octocrab::models::pulls::MergeableState as Gh;
    match state {
        Some(Gh::Clean) => MergeableState::Clean,
        Some(Gh::Blocked) => MergeableState::Blocked,
        Some(Gh::Behind) => MergeableState::Behind,
        Some(Gh::Dirty) => MergeableState::Dirty,
        Some(Gh::Draft) => MergeableState::Draft,
        Some(Gh::Unstable) => MergeableState::Unstable,
        Some(Gh::HasHooks) => MergeableState::HasHooks,
        // non-exhaustive upstream
        Some(_) | None => MergeableState::Unknown,
    }
}

#[async_trait]
impl PullRequestGateway for GitHubService {
    async fn find_open_prs(&self, head: &str, base: &str) -> Result<Vec<PullRequest>> {
        debug!(head, base, "finding open PRs");
        let head_filter = format!("{}:{}", &self.config.owner, head);

        let page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .head(head_filter)
            .base(base)
            .per_page(100)
            .send()
            .await?;

        let result: Vec<PullRequest> = page
            .items
            .iter()
            .map(pr_from_octocrab)
            .filter(|pr| pr.is_open() && pr.head_ref == head && pr.base_ref == base)
            .collect();
        debug!(count = result.len(), "found open PRs");
        Ok(result)
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, base)
            .body(body)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn update_pr(&self, pr_number: u64, title: &str, body: &str) -> Result<PullRequest> {
        debug!(pr_number, "updating PR metadata");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .update(pr_number)
            .title(title)
            .body(body)
            .send()
            .await?;

        debug!(pr_number, "updated PR");
        Ok(pr_from_octocrab(&pr))
    }

    async fn close_pr(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "closing PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .update(pr_number)
            .state(octocrab::params::pulls::State::Closed)
            .send()
            .await?;

        debug!(pr_number, "closed PR");
        Ok(pr_from_octocrab(&pr))
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let details = PullRequestDetails {
            number: pr.number,
            state: pr_state(&pr),
            is_draft: pr.draft.unwrap_or(false),
            mergeable_state: mergeable_state_from_octocrab(pr.mergeable_state.as_ref()),
        };

        debug!(pr_number, state = ?details.state, mergeable_state = %details.mergeable_state, "got PR details");
        Ok(details)
    }

    async fn merge_pr(&self, pr_number: u64) -> Result<MergeResult> {
        debug!(pr_number, "merging PR");

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab::params::pulls::MergeMethod::Merge)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
