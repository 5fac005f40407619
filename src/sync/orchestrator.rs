//! Run driver - composes the sync phases for every configured pair

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::platform::PullRequestGateway;
use crate::repo::RepositoryWorkspace;
use crate::sync::attempt::attempt_merge;
use crate::sync::auto_merge::auto_merge;
use crate::sync::diff::evaluate_diff;
use crate::sync::execute::execute_action;
use crate::sync::plan::{NoOpReason, SyncAction, reconcile};
use crate::sync::report::{PairReport, RunReport};
use crate::types::{MergeOutcome, SyncPair};
use tracing::{error, info, warn};

/// Run-wide switches
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Plan and log actions without pushing or calling mutating PR APIs
    pub dry_run: bool,
    /// Merge created/updated sync PRs when GitHub reports them clean
    pub merge_prs: bool,
}

/// Processes configured pairs sequentially against one workspace
pub struct SyncOrchestrator<'a> {
    workspace: &'a mut dyn RepositoryWorkspace,
    gateway: &'a dyn PullRequestGateway,
    options: SyncOptions,
}

impl<'a> SyncOrchestrator<'a> {
    /// Create an orchestrator over the given collaborators
    pub fn new(
        workspace: &'a mut dyn RepositoryWorkspace,
        gateway: &'a dyn PullRequestGateway,
        options: SyncOptions,
    ) -> Self {
        Self {
            workspace,
            gateway,
            options,
        }
    }

    /// Sync every pair in config order.
    ///
    /// A failing pair is recorded in the report and the run moves on. Only
    /// workspace setup and default-branch restoration failures end the run
    /// early, since later pairs would run on an untrusted tree.
    pub async fn run(&mut self, config: &SyncConfig) -> Result<RunReport> {
        info!(
            repo = %config.repo_url,
            pairs = config.pairs.len(),
            dry_run = self.options.dry_run,
            "starting sync run"
        );

        self.workspace.prepare()?;

        let mut report = RunReport {
            pairs: Vec::with_capacity(config.pairs.len()),
            dry_run: self.options.dry_run,
        };

        for pair in &config.pairs {
            let sync_branch = config.sync_branch_name(pair);
            let mut entry = PairReport::new(pair.clone(), sync_branch.clone());

            info!(%pair, %sync_branch, "syncing pair");
            if let Err(e) = self.sync_pair(pair, &sync_branch, &mut entry).await {
                error!(%pair, error = %e, "pair failed");
                entry.error = Some(e.to_string());
            }

            if let Err(e) = self.workspace.restore_default_branch() {
                error!(%pair, error = %e, "could not restore default branch, aborting run");
                return Err(match e {
                    Error::WorkspaceRestore(_) => e,
                    other => Error::WorkspaceRestore(other.to_string()),
                });
            }

            report.pairs.push(entry);
        }

        let summary = report.summary();
        info!(%summary, "sync run finished");
        Ok(report)
    }

    async fn sync_pair(
        &mut self,
        pair: &SyncPair,
        sync_branch: &str,
        entry: &mut PairReport,
    ) -> Result<()> {
        self.workspace.fetch()?;

        let diff = evaluate_diff(&*self.workspace, pair)?;
        entry.diff_status = Some(diff);
        info!(%pair, status = %diff, "diff evaluated");

        let outcome = if diff.needs_sync() {
            attempt_merge(&mut *self.workspace, pair, sync_branch)?
        } else {
            MergeOutcome::Skipped
        };
        entry.merge_outcome = Some(outcome);

        let existing = self
            .gateway
            .find_open_prs(sync_branch, &pair.destination)
            .await?;
        let plan = reconcile(pair, sync_branch, diff, outcome, &existing);

        if plan.has_anomaly() {
            warn!(
                %pair,
                ignored = ?plan.ignored_prs,
                "multiple open sync PRs found, acting on the most recent"
            );
        }
        if let SyncAction::NoOp(NoOpReason::Conflict { existing_pr }) = &plan.action {
            warn!(
                %pair,
                existing_pr = ?existing_pr,
                "merge conflict requires manual resolution"
            );
        }
        entry.action = Some(plan.action.clone());

        if self.options.dry_run {
            info!(%pair, action = %plan.action, "dry run, not executing");
            return Ok(());
        }

        info!(%pair, action = %plan.action, "executing");
        let pr = execute_action(&plan.action, &mut *self.workspace, self.gateway).await?;

        if self.options.merge_prs
            && plan.action.requires_push()
            && let Some(pr) = &pr
        {
            entry.auto_merge = Some(auto_merge(self.gateway, pr.number).await);
        }
        entry.pull_request = pr;

        Ok(())
    }
}
