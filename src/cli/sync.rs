//! Sync command - run every configured pair and print a summary

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check, cross, pr_link, warning};
use anstream::println;
use release_sync::error::Result;
use release_sync::sync::{PairReport, PairStatus, RunReport, SyncOptions, SyncOrchestrator};
use std::path::Path;

/// Options for the sync command
#[derive(Debug, Clone, Default)]
pub struct SyncCommandOptions {
    /// Dry run - show what would be done without pushing or touching PRs
    pub dry_run: bool,
    /// Merge sync PRs that GitHub reports as clean
    pub merge_prs: bool,
    /// Override for the clone directory root
    pub work_dir: Option<std::path::PathBuf>,
}

/// Run the sync command
///
/// Returns the run report; the caller maps errored pairs to the exit code.
pub async fn run_sync(config_path: &Path, options: SyncCommandOptions) -> Result<RunReport> {
    let mut ctx = CommandContext::new(config_path, options.work_dir.as_deref())?;

    println!(
        "{} {}",
        "Syncing".emphasis(),
        ctx.config.repo_url.as_str().accent()
    );
    if options.dry_run {
        println!("{}", "Dry run: nothing will be pushed or changed on GitHub".muted());
    }
    println!();

    let sync_options = SyncOptions {
        dry_run: options.dry_run,
        merge_prs: options.merge_prs,
    };
    let report = SyncOrchestrator::new(&mut ctx.workspace, &ctx.gateway, sync_options)
        .run(&ctx.config)
        .await?;

    for pair in &report.pairs {
        print_pair(pair);
    }

    println!();
    let summary = report.summary();
    if report.has_errors() {
        println!("{} {}", cross(), summary.to_string().error());
    } else {
        println!("{} {}", check(), summary.to_string().success());
    }
    if report.dry_run {
        println!("{}", "Run without --dry-run to apply.".muted());
    }

    Ok(report)
}

fn print_pair(report: &PairReport) {
    let status = report.status();
    let glyph = match status {
        PairStatus::Synced | PairStatus::UpToDate => check(),
        PairStatus::Conflicted => warning(),
        PairStatus::Errored => cross(),
    };

    println!(
        "{glyph} {} {} {}  {}",
        report.pair.base.as_str().accent(),
        arrow(),
        report.pair.destination.as_str().accent(),
        status.to_string().emphasis()
    );

    if let Some(action) = &report.action {
        println!("    {}", action.to_string().muted());
    }
    if let Some(pr) = &report.pull_request {
        println!("    PR {}", pr_link(pr.number, &pr.html_url));
    }
    if let Some(merge) = &report.auto_merge {
        println!("    {}", merge.to_string().muted());
    }
    if let Some(err) = &report.error {
        println!("    {}", err.as_str().error());
    }
}
