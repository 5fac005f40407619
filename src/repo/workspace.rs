//! Git workspace backed by the git CLI, with gix for history queries

use crate::config::CommitIdentity;
use crate::error::{Error, Result};
use crate::repo::{MergeStatus, RepositoryWorkspace};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

/// Remote name used for the managed clone
pub const DEFAULT_REMOTE: &str = "origin";

/// A tool-owned clone of the synced repository
///
/// The clone lives at a fixed path and is reused across runs; every pair
/// starts from a hard reset onto the default branch.
pub struct GitWorkspace {
    repo_url: String,
    path: PathBuf,
    remote: String,
    default_branch: Option<String>,
    identity: Option<CommitIdentity>,
}

impl GitWorkspace {
    /// Workspace for `repo_url`, cloned at `path`
    pub fn new(repo_url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            repo_url: repo_url.into(),
            path: path.into(),
            remote: DEFAULT_REMOTE.to_string(),
            default_branch: None,
            identity: None,
        }
    }

    /// Use `branch` instead of the remote's HEAD as the default branch
    #[must_use]
    pub fn with_default_branch(mut self, branch: Option<String>) -> Self {
        self.default_branch = branch;
        self
    }

    /// Author merge commits as `identity`
    #[must_use]
    pub fn with_identity(mut self, identity: Option<CommitIdentity>) -> Self {
        self.identity = identity;
        self
    }

    /// Path of the working tree
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remote_ref(&self, branch: &str) -> String {
        format!("refs/remotes/{}/{branch}", self.remote)
    }

    /// Remote-tracking ref for `branch`, rejecting names git cannot store
    fn valid_remote_ref(&self, branch: &str) -> Result<String> {
        let name = self.remote_ref(branch);
        gix::refs::FullName::try_from(name.as_str())
            .map_err(|_| Error::BranchNotFound(branch.to_string()))?;
        Ok(name)
    }

    /// Run git in the working tree, failing on a non-zero exit
    fn git<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run_git(Some(&self.path), args)
    }

    fn git_unchecked<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        debug!(args = ?args, "git");
        Ok(git_command(Some(&self.path)).args(&args).output()?)
    }

    fn identity_args(&self) -> Vec<String> {
        self.identity.as_ref().map_or_else(Vec::new, |id| {
            vec![
                "-c".to_string(),
                format!("user.name={}", id.name),
                "-c".to_string(),
                format!("user.email={}", id.email),
            ]
        })
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.path)
            .map_err(|e| Error::Repository(format!("failed to open {}: {e}", self.path.display())))
    }

    fn resolve_remote_branch(&self, repo: &gix::Repository, branch: &str) -> Result<gix::ObjectId> {
        let name = self.valid_remote_ref(branch)?;
        let exists = repo
            .try_find_reference(name.as_str())
            .map_err(|e| Error::Repository(format!("failed to look up {name}: {e}")))?
            .is_some();
        if !exists {
            return Err(Error::BranchNotFound(branch.to_string()));
        }
        let id = repo
            .rev_parse_single(name.as_str())
            .map_err(|e| Error::Repository(format!("failed to resolve {name}: {e}")))?;
        Ok(id.detach())
    }

    fn detect_default_branch(&self) -> Result<String> {
        let head_ref = format!("refs/remotes/{}/HEAD", self.remote);
        let symbolic = match self.git(["symbolic-ref", "--short", head_ref.as_str()]) {
            Ok(name) => name,
            Err(_) => {
                // older clones may lack origin/HEAD
                self.git(["remote", "set-head", self.remote.as_str(), "--auto"])?;
                self.git(["symbolic-ref", "--short", head_ref.as_str()])?
            }
        };
        let prefix = format!("{}/", self.remote);
        Ok(symbolic
            .strip_prefix(&prefix)
            .unwrap_or(&symbolic)
            .to_string())
    }

    fn is_merging(&self) -> bool {
        self.git_unchecked(["rev-parse", "-q", "--verify", "MERGE_HEAD"])
            .is_ok_and(|o| o.status.success())
    }

    fn conflicted_paths(&self) -> Result<Vec<String>> {
        let out = self.git(["diff", "--name-only", "--diff-filter=U"])?;
        Ok(out.lines().map(ToString::to_string).collect())
    }
}

fn git_command(dir: Option<&Path>) -> Command {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    // unattended: never block on a credential prompt
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

fn run_git<I, S>(dir: Option<&Path>, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    debug!(args = ?args, "git");
    let output = git_command(dir).args(&args).output()?;

    if !output.status.success() {
        return Err(Error::Git {
            command: args
                .iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

impl RepositoryWorkspace for GitWorkspace {
    fn prepare(&mut self) -> Result<()> {
        if self.path.join(".git").exists() {
            info!(path = %self.path.display(), "repository already cloned, fetching updates");
            self.fetch().map_err(|e| Error::WorkspaceSetup(e.to_string()))?;
        } else {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::WorkspaceSetup(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
            info!(url = %self.repo_url, path = %self.path.display(), "cloning repository");
            run_git(
                None,
                [
                    OsStr::new("clone"),
                    OsStr::new("--origin"),
                    OsStr::new(&self.remote),
                    OsStr::new(&self.repo_url),
                    self.path.as_os_str(),
                ],
            )
            .map_err(|e| Error::WorkspaceSetup(e.to_string()))?;
        }

        let branch = match self.default_branch.clone() {
            Some(branch) => branch,
            None => self
                .detect_default_branch()
                .map_err(|e| Error::WorkspaceSetup(format!("cannot detect default branch: {e}")))?,
        };
        if !self
            .has_remote_branch(&branch)
            .map_err(|e| Error::WorkspaceSetup(e.to_string()))?
        {
            return Err(Error::WorkspaceSetup(format!(
                "default branch '{branch}' not found on remote"
            )));
        }
        debug!(branch, "default branch");
        self.default_branch = Some(branch);

        self.restore_default_branch()
            .map_err(|e| Error::WorkspaceSetup(e.to_string()))
    }

    fn fetch(&mut self) -> Result<()> {
        self.git(["fetch", "--prune", self.remote.as_str()])?;
        Ok(())
    }

    fn default_branch(&self) -> Option<&str> {
        self.default_branch.as_deref()
    }

    fn has_remote_branch(&self, branch: &str) -> Result<bool> {
        let name = self.valid_remote_ref(branch)?;
        let repo = self.open_repo()?;
        let found = repo
            .try_find_reference(name.as_str())
            .map_err(|e| Error::Repository(format!("failed to look up {name}: {e}")))?;
        Ok(found.is_some())
    }

    fn count_missing_commits(&self, base: &str, destination: &str) -> Result<usize> {
        let repo = self.open_repo()?;
        let base_id = self.resolve_remote_branch(&repo, base)?;
        let destination_id = self.resolve_remote_branch(&repo, destination)?;

        let walk = repo
            .rev_walk([base_id])
            .with_hidden([destination_id])
            .all()
            .map_err(|e| Error::Repository(format!("failed to walk {base}: {e}")))?;

        let mut count = 0;
        for info in walk {
            info.map_err(|e| Error::Repository(format!("failed to walk {base}: {e}")))?;
            count += 1;
        }
        debug!(base, destination, count, "counted missing commits");
        Ok(count)
    }

    fn reset_branch(&mut self, branch: &str, start_point: &str) -> Result<()> {
        if !self.has_remote_branch(start_point)? {
            return Err(Error::BranchNotFound(start_point.to_string()));
        }
        let start = self.remote_ref(start_point);
        self.git(["checkout", "--force", "--no-track", "-B", branch, start.as_str()])?;
        Ok(())
    }

    fn merge(&mut self, source: &str, message: &str) -> Result<MergeStatus> {
        let source_ref = self.remote_ref(source);
        let mut args = self.identity_args();
        args.extend(
            ["merge", "--no-ff", "--no-edit", "-m", message, source_ref.as_str()]
                .into_iter()
                .map(ToString::to_string),
        );

        let output = self.git_unchecked(&args)?;
        if output.status.success() {
            return Ok(MergeStatus::Merged);
        }

        if self.is_merging() {
            let paths = self.conflicted_paths()?;
            return Ok(MergeStatus::Conflicted { paths });
        }

        Err(Error::Git {
            command: format!("merge {source_ref}"),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn abort_merge(&mut self) -> Result<()> {
        self.git(["merge", "--abort"])?;
        Ok(())
    }

    fn force_push(&mut self, branch: &str) -> Result<()> {
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        self.git(["push", "--force", self.remote.as_str(), refspec.as_str()])?;
        Ok(())
    }

    fn restore_default_branch(&mut self) -> Result<()> {
        let Some(branch) = self.default_branch.clone() else {
            return Err(Error::WorkspaceRestore(
                "default branch unknown, workspace was not prepared".to_string(),
            ));
        };
        let start = self.remote_ref(&branch);

        let restore = |e: Error| Error::WorkspaceRestore(e.to_string());
        // reset --hard also clears a pending MERGE_HEAD
        self.git(["reset", "--hard"]).map_err(restore)?;
        self.git(["clean", "-fd"]).map_err(restore)?;
        self.git(["checkout", "--force", "--no-track", "-B", branch.as_str(), start.as_str()])
            .map_err(restore)?;
        debug!(branch, "restored default branch");
        Ok(())
    }
}
