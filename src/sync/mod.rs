//! Branch sync engine
//!
//! Per pair, three phases:
//! 1. Gather - diff check and merge attempt in the workspace, open PR lookup
//! 2. Plan - `reconcile()` maps the outcome to a `SyncAction` (pure, testable)
//! 3. Execute - push and PR calls (effectful, skipped on dry runs)
//!
//! `SyncOrchestrator` drives the phases for every configured pair and
//! restores the workspace between pairs.

mod attempt;
mod auto_merge;
mod diff;
mod execute;
mod orchestrator;
mod plan;
mod report;

pub use attempt::attempt_merge;
pub use auto_merge::{AutoMergeDecision, AutoMergeOutcome, auto_merge, plan_auto_merge};
pub use diff::evaluate_diff;
pub use execute::execute_action;
pub use orchestrator::{SyncOptions, SyncOrchestrator};
pub use plan::{NoOpReason, ReconcilePlan, SyncAction, reconcile, select_existing_pr};
pub use report::{PairReport, PairStatus, RunReport, RunSummary};
