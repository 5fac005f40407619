//! Error types for release-sync

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading configuration or syncing branch pairs
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file is malformed or fails validation
    #[error("configuration error: {0}")]
    Config(String),

    /// The same base/destination pair appears more than once
    #[error("duplicate sync pair: {base} -> {destination}")]
    DuplicatePair {
        /// Base branch of the duplicated pair
        base: String,
        /// Destination branch of the duplicated pair
        destination: String,
    },

    /// No GitHub token in the environment or `.env` file
    #[error("GITHUB_TOKEN not found in the environment or in {0}")]
    MissingToken(String),

    /// Repository URL could not be mapped to a GitHub owner/repo
    #[error("cannot determine GitHub repository from URL: {0}")]
    InvalidRepoUrl(String),

    /// Clone or initial fetch failed
    #[error("workspace setup failed: {0}")]
    WorkspaceSetup(String),

    /// Workspace could not be returned to its default branch
    #[error("failed to restore default branch: {0}")]
    WorkspaceRestore(String),

    /// A branch is missing from the fetched remote
    #[error("branch not found on remote: {0}")]
    BranchNotFound(String),

    /// A git command exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    Git {
        /// Subcommand and arguments that failed
        command: String,
        /// Captured stderr
        stderr: String,
    },

    /// Repository inspection failed
    #[error("repository error: {0}")]
    Repository(String),

    /// GitHub API returned an error we mapped manually
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Error from the octocrab client
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Filesystem or process I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invariant violation inside the tool
    #[error("internal error: {0}")]
    Internal(String),
}
