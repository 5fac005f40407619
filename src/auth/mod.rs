//! GitHub token lookup
//!
//! The token is read once at startup, from the process environment or a
//! `.env` file, and handed to the gateway constructor explicitly.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Environment variables checked for a token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from a `.env` file
    DotEnv,
}

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the token from the process environment, then `dotenv_path`.
pub fn get_github_auth(dotenv_path: &Path) -> Result<GitHubAuthConfig> {
    get_github_auth_with(|name| std::env::var(name).ok(), dotenv_path)
}

/// Resolve the token using `lookup` for environment variables.
pub fn get_github_auth_with<F>(lookup: F, dotenv_path: &Path) -> Result<GitHubAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    for var in TOKEN_ENV_VARS {
        if let Some(token) = lookup(var).filter(|t| !t.trim().is_empty()) {
            debug!(var, "using GitHub token from environment");
            return Ok(GitHubAuthConfig {
                token: token.trim().to_string(),
                source: AuthSource::EnvVar,
            });
        }
    }

    if dotenv_path.is_file() {
        let values = read_dotenv(dotenv_path)?;
        for var in TOKEN_ENV_VARS {
            if let Some(token) = values.get(var).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                debug!(var, path = %dotenv_path.display(), "using GitHub token from .env file");
                return Ok(GitHubAuthConfig {
                    token: token.to_string(),
                    source: AuthSource::DotEnv,
                });
            }
        }
    }

    Err(Error::MissingToken(dotenv_path.display().to_string()))
}

/// Parse a `.env` file; a repeated key keeps its last value.
fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    let invalid =
        |e: dotenvy::Error| Error::Config(format!("invalid .env file '{}': {e}", path.display()));

    let mut values = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(invalid)? {
        let (key, value) = item.map_err(invalid)?;
        values.insert(key, value);
    }
    Ok(values)
}
