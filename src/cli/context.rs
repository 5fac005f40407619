//! Shared command context
//!
//! Performs the fatal-on-failure setup of a run: config, token, GitHub
//! service and workspace location.

use release_sync::auth::get_github_auth;
use release_sync::config::SyncConfig;
use release_sync::error::{Error, Result};
use release_sync::platform::{GitHubService, parse_repo_info};
use release_sync::repo::GitWorkspace;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory under the user cache dir holding clones
const CACHE_SUBDIR: &str = "release-sync";

/// Everything a sync run needs, resolved before any pair is touched
pub struct CommandContext {
    /// Validated configuration
    pub config: SyncConfig,
    /// Local clone of the configured repository
    pub workspace: GitWorkspace,
    /// GitHub pull request gateway
    pub gateway: GitHubService,
}

impl CommandContext {
    /// Build the context
    ///
    /// - Load and validate the config file
    /// - Read the GitHub token (environment, then `.env` next to the config)
    /// - Resolve owner/repo from the repo URL and create the service
    /// - Pick the clone directory
    pub fn new(config_path: &Path, work_dir: Option<&Path>) -> Result<Self> {
        let config = SyncConfig::load(config_path)?;

        let dotenv_path = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".env");
        let auth = get_github_auth(&dotenv_path)?;

        let platform_config = parse_repo_info(&config.repo_url)?;
        info!(
            owner = %platform_config.owner,
            repo = %platform_config.repo,
            token_source = ?auth.source,
            "resolved GitHub repository"
        );
        let gateway = GitHubService::new(&auth.token, platform_config)?;

        let root = resolve_work_dir(work_dir)?;
        let workspace = GitWorkspace::new(config.repo_url.clone(), root.join(config.repo_dir_name()))
            .with_default_branch(config.default_branch.clone())
            .with_identity(config.commit_identity.clone());

        Ok(Self {
            config,
            workspace,
            gateway,
        })
    }
}

fn resolve_work_dir(work_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = work_dir {
        return Ok(dir.to_path_buf());
    }
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_SUBDIR))
        .ok_or_else(|| {
            Error::WorkspaceSetup("no cache directory available, pass --work-dir".to_string())
        })
}
