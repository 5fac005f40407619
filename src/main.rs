//! release-sync CLI

mod cli;

use anyhow::Context;
use cli::style::Stylize;
use clap::Parser;
use release_sync::config::DEFAULT_CONFIG_FILE;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Some pair failed; the others were still processed
const EXIT_PAIR_ERRORS: u8 = 1;
/// The run could not start or had to stop early
const EXIT_FATAL: u8 = 2;

/// Keeps release branches in sync through automated merge pull requests
#[derive(Parser, Debug)]
#[command(name = "release-sync", version, about)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Show what would be done without pushing or changing pull requests
    #[arg(long)]
    dry_run: bool,

    /// Merge sync pull requests that GitHub reports as clean
    #[arg(long)]
    merge_prs: bool,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Directory for the local clone (defaults to the user cache directory)
    #[arg(long, value_name = "DIR")]
    work_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match init_logging(args.verbose, args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let options = cli::SyncCommandOptions {
        dry_run: args.dry_run,
        merge_prs: args.merge_prs,
        work_dir: args.work_dir,
    };

    match cli::run_sync(&args.config, options).await {
        Ok(report) if report.has_errors() => ExitCode::from(EXIT_PAIR_ERRORS),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "sync run aborted");
            anstream::eprintln!("{} {e}", "Error:".error());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Install the stderr logger and, with `--log-file`, a plain-text file logger.
///
/// `RUST_LOG` overrides the default level unless `-v` is given.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?
                .to_string_lossy()
                .into_owned();

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(dir)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install logger")?;

    Ok(guard)
}
