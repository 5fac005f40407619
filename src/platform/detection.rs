//! Repository URL parsing

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const GITHUB_HOST: &str = "github.com";

// scp-like syntax: git@github.com:owner/repo.git
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/]+@)?(?P<host>[^:/]+):(?P<path>[^/].*)$")
        .unwrap_or_else(|e| panic!("invalid scp-like remote pattern: {e}"))
});

/// Parse owner, repo and host from a clone URL
///
/// Accepts `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://host/owner/repo(.git)`. Hosts other than github.com are treated
/// as GitHub Enterprise.
pub fn parse_repo_info(repo_url: &str) -> Result<PlatformConfig> {
    let trimmed = repo_url.trim();
    let (host, path) = if trimmed.contains("://") {
        let url = Url::parse(trimmed).map_err(|_| Error::InvalidRepoUrl(repo_url.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidRepoUrl(repo_url.to_string()))?
            .to_string();
        (host, url.path().to_string())
    } else if let Some(caps) = SCP_LIKE.captures(trimmed) {
        (caps["host"].to_string(), caps["path"].to_string())
    } else {
        return Err(Error::InvalidRepoUrl(repo_url.to_string()));
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let Some((owner, repo)) = path.split_once('/') else {
        return Err(Error::InvalidRepoUrl(repo_url.to_string()));
    };
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(Error::InvalidRepoUrl(repo_url.to_string()));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: (host != GITHUB_HOST).then_some(host),
    })
}
