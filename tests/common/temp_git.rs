//! Temporary git remotes for workspace tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A bare `origin` plus a seed clone used to author commits on it
pub struct TempGitRemote {
    dir: TempDir,
}

impl TempGitRemote {
    /// Bare remote with `main` holding one commit
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let remote = Self { dir };

        git(remote.dir.path(), &["init", "--bare", "--initial-branch=main", "origin.git"]);
        git(remote.dir.path(), &["clone", remote.url().as_str(), "seed"]);
        git(&remote.seed(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        remote.write_and_commit("README.md", "hello\n", "Initial commit");
        git(&remote.seed(), &["push", "-u", "origin", "main"]);
        remote
    }

    /// URL to clone from
    pub fn url(&self) -> String {
        self.dir.path().join("origin.git").display().to_string()
    }

    /// Fresh path for a workspace clone
    pub fn work_path(&self) -> PathBuf {
        self.dir.path().join("work").join("repo")
    }

    fn seed(&self) -> PathBuf {
        self.dir.path().join("seed")
    }

    /// Create `name` at `from` and push it
    pub fn branch(&self, name: &str, from: &str) {
        git(&self.seed(), &["checkout", "-B", name, from]);
        git(&self.seed(), &["push", "--force", "origin", name]);
    }

    /// Commit a file change on `branch` and push it
    pub fn commit(&self, branch: &str, file: &str, content: &str, message: &str) {
        git(&self.seed(), &["checkout", branch]);
        self.write_and_commit(file, content, message);
        git(&self.seed(), &["push", "origin", branch]);
    }

    /// Commit hash of a branch on the bare remote, if it exists
    pub fn remote_head(&self, branch: &str) -> Option<String> {
        let refname = format!("refs/heads/{branch}");
        let output = Command::new("git")
            .current_dir(self.dir.path().join("origin.git"))
            .args(["rev-parse", "--verify", "-q", refname.as_str()])
            .output()
            .expect("run git rev-parse");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Number of commits on `branch` in the bare remote
    pub fn commit_count(&self, branch: &str) -> usize {
        let refname = format!("refs/heads/{branch}");
        let out = git(
            &self.dir.path().join("origin.git"),
            &["rev-list", "--count", refname.as_str()],
        );
        out.trim().parse().expect("parse commit count")
    }

    fn write_and_commit(&self, file: &str, content: &str, message: &str) {
        fs::write(self.seed().join(file), content).expect("write file");
        git(&self.seed(), &["add", file]);
        git(
            &self.seed(),
            &[
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "commit",
                "-m",
                message,
            ],
        );
    }
}

/// Run git in `dir`, panicking on failure; returns stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
