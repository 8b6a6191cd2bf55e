//! # Git Command Runner
//!
//! Every interaction with a repository goes through the system `git`
//! executable. This uses whatever the user has configured (credential
//! helpers, SSH keys, `~/.gitconfig`) without any extra setup.
//!
//! ## Design
//!
//! - **`CommandRunner`**: the single seam between the engine and the outside
//!   world. It runs one git command in one repository directory and returns
//!   its standard output. The directory is always passed explicitly as the
//!   child's working directory; the process-wide current directory is never
//!   changed, so concurrent workers cannot interfere with each other.
//! - **`SystemGit`**: the production runner, spawning the git executable.
//! - **`Repo`**: typed operations (list branches, fetch, checkout...) for one
//!   repository, built on top of a runner.
//!
//! Commands are attempted exactly once and have no timeout: a command that
//! hangs blocks the worker that issued it.

use crate::branch::{parse_branch_listing, BranchDescriptor};
use crate::defaults;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for running git commands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Runs `git <args>` inside `dir` and returns its standard output.
    ///
    /// A non-zero exit status or a failure to start the process is reported
    /// as [`Error::GitCommand`], carrying the captured output.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String>;
}

/// The default implementation of `CommandRunner`, which spawns the system's
/// git executable.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    /// Creates a runner using `program` as the git executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new(defaults::DEFAULT_GIT_PROGRAM)
    }
}

impl CommandRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let command = describe(args);
        log::debug!("{}: {}", dir.display(), command);

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::GitCommand {
                directory: directory_name(dir),
                command: command.clone(),
                output: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitCommand {
                directory: directory_name(dir),
                command,
                output: format!("{}{}", stdout, stderr),
            });
        }

        Ok(stdout)
    }
}

/// Renders a command line for diagnostics.
pub fn describe(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// The name used to identify a repository directory in diagnostics.
pub fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Name reported for the current branch when `HEAD` is detached.
pub const DETACHED_HEAD: &str = "HEAD";

/// Typed git operations on one repository.
pub struct Repo<'a> {
    runner: &'a dyn CommandRunner,
    path: &'a Path,
}

impl<'a> Repo<'a> {
    pub fn new(runner: &'a dyn CommandRunner, path: &'a Path) -> Self {
        Self { runner, path }
    }

    pub fn path(&self) -> &Path {
        self.path
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.runner.run(self.path, args)
    }

    /// Lists local and remote-tracking branches.
    pub fn list_branches(&self) -> Result<Vec<BranchDescriptor>> {
        let listing = self.git(&["branch", "-a", "--no-color"])?;
        Ok(parse_branch_listing(&listing))
    }

    /// Refreshes the remote-tracking branches of every remote.
    pub fn fetch_all(&self) -> Result<()> {
        self.git(&["fetch", "--all"]).map(|_| ())
    }

    /// Name of the checked-out branch, `HEAD` when detached.
    ///
    /// An unborn branch (no commit yet) is still reported by name.
    pub fn current_branch(&self) -> Result<String> {
        let out = self.git(&["branch", "--show-current"])?;
        let name = out.trim();
        if name.is_empty() {
            Ok(DETACHED_HEAD.to_string())
        } else {
            Ok(name.to_string())
        }
    }

    /// Commit id of `HEAD`.
    pub fn head_commit(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "HEAD"])?;
        Ok(out.trim().to_string())
    }

    /// Whether the working tree has staged, unstaged or untracked changes.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let out = self.git(&["status", "--porcelain"])?;
        Ok(!out.trim().is_empty())
    }

    /// Number of commits reachable from `to` but not from `from`.
    pub fn count_commits(&self, from: &str, to: &str) -> Result<u64> {
        let range = format!("{}..{}", from, to);
        let args = ["rev-list", "--count", range.as_str()];
        let out = self.git(&args)?;
        out.trim()
            .parse()
            .map_err(|_| Error::UnexpectedOutput {
                directory: directory_name(self.path),
                command: describe(&args),
                output: out.clone(),
            })
    }

    /// Checks out a branch or commit.
    pub fn checkout(&self, target: &str) -> Result<()> {
        self.git(&["checkout", target]).map(|_| ())
    }

    /// Pulls `branch` from `remote` into the checked-out branch, rebasing
    /// local commits on top.
    pub fn pull_rebase(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["pull", "--rebase=true", remote, branch])
            .map(|_| ())
    }

    /// Abandons a rebase left in progress by a failed pull.
    pub fn abort_rebase(&self) -> Result<()> {
        self.git(&["rebase", "--abort"]).map(|_| ())
    }
}
