//! Loading and validation of the JSON sync configuration.

use crate::error::{Error, Result};
use crate::types::SyncPair;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Conventional config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Prefix used for sync branches when the config doesn't set one.
pub const DEFAULT_SYNC_BRANCH_PREFIX: &str = "sync/";

#[derive(Debug, Deserialize)]
struct RawConfig {
    repo_url: String,
    #[serde(default)]
    conflict_branch_prefix: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    commit_identity: Option<CommitIdentity>,
    branches: Vec<RawBranchEntry>,
}

#[derive(Debug, Deserialize)]
struct RawBranchEntry {
    base: String,
    destinations: Vec<String>,
}

/// Author/committer used for merge commits on sync branches
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitIdentity {
    /// `user.name`
    pub name: String,
    /// `user.email`
    pub email: String,
}

/// Validated sync configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Clone URL of the repository
    pub repo_url: String,
    /// Prefix for sync branch names
    pub conflict_branch_prefix: String,
    /// Pairs to sync, in config order
    pub pairs: Vec<SyncPair>,
    /// Branch to restore between pairs; detected from the remote when unset
    pub default_branch: Option<String>,
    /// Identity for merge commits; git config is used when unset
    pub commit_identity: Option<CommitIdentity>,
}

impl SyncConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "configuration file not found at '{}'",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        Self::from_json(&content).map_err(|e| match e {
            Error::Json(e) => Error::Config(format!("invalid JSON in '{}': {e}", path.display())),
            other => other,
        })
    }

    /// Parse and validate config JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let repo_url = raw.repo_url.trim().to_string();
        if repo_url.is_empty() {
            return Err(Error::Config("repo_url must not be empty".to_string()));
        }

        let conflict_branch_prefix = raw
            .conflict_branch_prefix
            .unwrap_or_else(|| DEFAULT_SYNC_BRANCH_PREFIX.to_string());
        if conflict_branch_prefix.trim().is_empty() {
            return Err(Error::Config(
                "conflict_branch_prefix must not be empty".to_string(),
            ));
        }

        if let Some(ref branch) = raw.default_branch {
            validate_branch_name(branch, "default_branch")?;
        }

        let mut pairs = Vec::new();
        let mut seen = HashSet::new();
        for entry in raw.branches {
            validate_branch_name(&entry.base, "base")?;
            if entry.destinations.is_empty() {
                return Err(Error::Config(format!(
                    "base '{}' has no destinations",
                    entry.base
                )));
            }
            for destination in entry.destinations {
                validate_branch_name(&destination, "destination")?;
                if destination == entry.base {
                    return Err(Error::Config(format!(
                        "branch '{destination}' cannot be synced into itself"
                    )));
                }
                let pair = SyncPair::new(entry.base.clone(), destination);
                if !seen.insert(pair.clone()) {
                    return Err(Error::DuplicatePair {
                        base: pair.base,
                        destination: pair.destination,
                    });
                }
                pairs.push(pair);
            }
        }

        if pairs.is_empty() {
            return Err(Error::Config(
                "at least one branch pair must be configured".to_string(),
            ));
        }

        // "a" into "b-into-c" and "a-into-b" into "c" derive the same name
        let mut names: HashMap<String, &SyncPair> = HashMap::new();
        for pair in &pairs {
            let name = pair.sync_branch_name(&conflict_branch_prefix);
            if let Some(other) = names.insert(name.clone(), pair) {
                return Err(Error::Config(format!(
                    "pairs '{other}' and '{pair}' both map to sync branch '{name}'"
                )));
            }
        }

        Ok(Self {
            repo_url,
            conflict_branch_prefix,
            pairs,
            default_branch: raw.default_branch,
            commit_identity: raw.commit_identity,
        })
    }

    /// Sync branch name for a pair under this config's prefix
    pub fn sync_branch_name(&self, pair: &SyncPair) -> String {
        pair.sync_branch_name(&self.conflict_branch_prefix)
    }

    /// Directory name of the local clone, taken from the last URL segment
    pub fn repo_dir_name(&self) -> String {
        let last = self
            .repo_url
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .unwrap_or_default();
        let name = last.strip_suffix(".git").unwrap_or(last);
        if name.is_empty() {
            "repo".to_string()
        } else {
            name.to_string()
        }
    }
}

fn validate_branch_name(name: &str, field: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config(format!("{field} branch name must not be empty")));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::Config(format!(
            "{field} branch name '{name}' must not contain whitespace"
        )));
    }
    Ok(())
}
