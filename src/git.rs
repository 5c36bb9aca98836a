use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::process::{ProcessConfig, ProcessOutput, run_captured};

/// Commit message used for the review branch.
pub const REVIEW_COMMIT_MESSAGE: &str = "feat: add automated login tests

- Implement Selenium tests for login
- Add API tests for users
- Set up basic test structure

Closes #123";

/// Validate that a branch name is safe: matches `^[a-zA-Z0-9/_.-]+$` and does not start with `refs/`.
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Git("branch name must not be empty".to_string()));
    }
    if name.starts_with("refs/") {
        return Err(Error::Git(format!(
            "branch name must not start with 'refs/': {name}"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '/' || c == '_' || c == '.' || c == '-')
    {
        return Err(Error::Git(format!(
            "branch name contains invalid characters (allowed: a-zA-Z0-9/_.-): {name}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSetup {
    Initialized,
    AlreadyPresent,
}

/// Thin wrapper over the `git` CLI rooted at one working directory.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
    timeout: Option<Duration>,
    env: Vec<(String, String)>,
}

impl GitRepo {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            timeout: None,
            env: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extra environment for every git invocation (e.g. author identity).
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// `git status` runs and succeeds in the root.
    pub async fn is_repo(&self) -> bool {
        matches!(self.status_succeeds().await, Ok(true))
    }

    /// `Ok(false)` only when git ran and rejected the directory; timeouts
    /// and spawn failures are errors.
    async fn status_succeeds(&self) -> Result<bool> {
        let output = self.invoke(&["status"]).await?;
        if !output.success() {
            debug!(root = %self.root.display(), detail = output.detail(), "not a git repository");
        }
        Ok(output.success())
    }

    /// Initialize a repository with one commit if none exists.
    ///
    /// `held_back` paths are left out of the initial commit so the review
    /// branch is the commit that introduces them.
    pub async fn ensure_initialized(&self, message: &str, held_back: &[&str]) -> Result<RepoSetup> {
        if self.status_succeeds().await? {
            return Ok(RepoSetup::AlreadyPresent);
        }
        if self.root.join(".git").exists() {
            return Err(Error::Git(format!(
                "{} has a .git entry but git status fails; refusing to re-initialize",
                self.root.display()
            )));
        }

        info!(root = %self.root.display(), "initializing git repository");
        self.git(&["init"]).await?;
        self.git(&["add", "."]).await?;
        if !held_back.is_empty() {
            let mut args = vec!["rm", "-r", "--cached", "--quiet", "--ignore-unmatch", "--"];
            args.extend_from_slice(held_back);
            self.git(&args).await?;
        }
        self.git(&["commit", "--allow-empty", "-m", message]).await?;

        Ok(RepoSetup::Initialized)
    }

    /// Create `branch` from HEAD and commit `paths` onto it.
    ///
    /// Fails if the branch already exists or there is nothing to commit.
    pub async fn create_review_branch(&self, branch: &str, paths: &[&str], message: &str) -> Result<()> {
        validate_branch_name(branch)?;

        self.git(&["checkout", "-b", branch]).await?;
        for path in paths {
            self.git(&["add", path]).await?;
        }
        self.git(&["commit", "-m", message]).await?;

        let sha = self
            .git(&["rev-parse", "--short", "HEAD"])
            .await
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        info!(branch, commit = %sha, "created review branch");
        Ok(())
    }

    pub async fn current_branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(out.trim().to_string())
    }

    async fn invoke(&self, args: &[&str]) -> Result<ProcessOutput> {
        run_captured(ProcessConfig {
            command: "git".to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: self.root.clone(),
            timeout: self.timeout,
            env: self.env.clone(),
        })
        .await
        .map_err(|e| Error::Git(format!("git {}: {e}", args.join(" "))))
    }

    /// Run a git command in the root, returning stdout on success.
    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = self.invoke(args).await?;
        if output.success() {
            return Ok(output.stdout);
        }

        warn!(
            args = %args.join(" "),
            exit_code = ?output.exit_code,
            "git command failed"
        );
        // git reports some failures ("nothing to commit") on stdout.
        Err(Error::Git(format!(
            "git {} exited with {}: {}",
            args.first().copied().unwrap_or_default(),
            output.exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            output.detail()
        )))
    }
}
