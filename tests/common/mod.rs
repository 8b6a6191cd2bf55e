//! Shared test utilities for the E2E tests.
//!
//! This module provides fixtures that lay out a root directory of git clones,
//! each with its own local bare remote, so the `gits` binary can be run
//! against real repositories without touching the network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! #[cfg_attr(not(feature = "integration-tests"), ignore)]
//! fn test_example() {
//!     let fixture = GitFixture::new();
//!     fixture.add_repository("alpha", "master");
//!     fixture.command().arg("status").assert().success();
//! }
//! ```

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::GitFixture;
    #[allow(unused_imports)]
    pub use super::TestFixture;
}

const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "gits tests"),
    ("GIT_AUTHOR_EMAIL", "tests@gits.invalid"),
    ("GIT_COMMITTER_NAME", "gits tests"),
    ("GIT_COMMITTER_EMAIL", "tests@gits.invalid"),
];

/// A temporary root directory with plain (non-git) content.
///
/// Enough for the tests that never reach a git command: empty roots,
/// configuration errors, fake `.git` markers.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.gits.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".gits.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a directory that looks like a repository root to the locator.
    pub fn with_fake_repository(self, name: &str) -> Self {
        self.temp_dir
            .child(name)
            .child(".git")
            .create_dir_all()
            .expect("Failed to create .git directory");
        self
    }

    /// Add a plain directory.
    pub fn with_directory(self, name: &str) -> Self {
        self.temp_dir
            .child(name)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A `gits` command rooted at the fixture directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("gits");
        cmd.arg("--color")
            .arg("never")
            .env_remove("GITS_ROOT")
            .env_remove("GITS_GIT")
            .env_remove("RUST_LOG")
            .current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A root directory of real clones, each pushing to a bare remote kept
/// outside the root.
///
/// ```text
/// <tmp>/root/<name>          clone scanned by gits
/// <tmp>/remotes/<name>.git   its `origin`
/// <tmp>/scratch/<name>       second clone used to push upstream commits
/// ```
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

impl GitFixture {
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        for dir in ["root", "remotes", "scratch"] {
            temp_dir
                .child(dir)
                .create_dir_all()
                .expect("Failed to create fixture directory");
        }
        Self { temp_dir }
    }

    /// The directory scanned by `gits`.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("root")
    }

    pub fn repository(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    fn remote(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("remotes").join(format!("{}.git", name))
    }

    fn scratch(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("scratch").join(name)
    }

    /// Runs git in `dir` and returns its trimmed stdout, panicking on failure.
    pub fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .envs(IDENTITY)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed in {}: {}",
            args.join(" "),
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Creates a clone called `name` with one commit on `branch`, pushed to
    /// its remote.
    pub fn add_repository(&self, name: &str, branch: &str) -> &Self {
        let remote = self.remote(name);
        let remote_str = remote.to_string_lossy().into_owned();
        self.git(self.temp_dir.path(), &["init", "--bare", "--quiet", &remote_str]);
        self.git(&self.root(), &["clone", "--quiet", &remote_str, name]);

        let repo = self.repository(name);
        self.git(&repo, &["symbolic-ref", "HEAD", &format!("refs/heads/{}", branch)]);
        self.commit(name, "README.md", "initial\n");
        self.git(&repo, &["push", "--quiet", "-u", "origin", branch]);
        self
    }

    /// Creates a clone called `name` with no commit yet, its HEAD on the
    /// unborn `branch`.
    pub fn add_empty_repository(&self, name: &str, branch: &str) -> &Self {
        self.git(&self.root(), &["init", "--quiet", name]);
        self.git(
            &self.repository(name),
            &["symbolic-ref", "HEAD", &format!("refs/heads/{}", branch)],
        );
        self
    }

    /// Creates `branch` from the current one and pushes it.
    pub fn add_pushed_branch(&self, name: &str, branch: &str) -> &Self {
        let repo = self.repository(name);
        self.git(&repo, &["branch", branch]);
        self.git(&repo, &["push", "--quiet", "-u", "origin", branch]);
        self
    }

    /// Creates `branch` locally without pushing it.
    pub fn add_local_branch(&self, name: &str, branch: &str) -> &Self {
        self.git(&self.repository(name), &["branch", branch]);
        self
    }

    pub fn checkout(&self, name: &str, target: &str) -> &Self {
        self.git(&self.repository(name), &["checkout", "--quiet", target]);
        self
    }

    /// Commits `file` with `content` on the current branch of the clone.
    pub fn commit(&self, name: &str, file: &str, content: &str) -> &Self {
        let repo = self.repository(name);
        std::fs::write(repo.join(file), content).expect("Failed to write file");
        self.git(&repo, &["add", file]);
        self.git(&repo, &["commit", "--quiet", "-m", &format!("update {}", file)]);
        self
    }

    /// Leaves an uncommitted change in the clone.
    pub fn make_dirty(&self, name: &str) -> &Self {
        std::fs::write(self.repository(name).join("scratch.txt"), "wip\n").expect("Failed to write file");
        self
    }

    /// Pushes a new commit on `branch` from another clone, so the scanned
    /// clone falls behind once it fetches.
    pub fn push_upstream_commit(&self, name: &str, branch: &str) -> &Self {
        let scratch = self.scratch(name);
        if !scratch.exists() {
            let remote_str = self.remote(name).to_string_lossy().into_owned();
            let parent = self.temp_dir.path().join("scratch");
            self.git(&parent, &["clone", "--quiet", &remote_str, name]);
        }
        self.git(&scratch, &["fetch", "--quiet", "origin"]);
        self.git(&scratch, &["checkout", "--quiet", "-B", branch, &format!("origin/{}", branch)]);
        let marker = scratch.join("upstream.txt");
        let previous = std::fs::read_to_string(&marker).unwrap_or_default();
        std::fs::write(&marker, format!("{}upstream\n", previous)).expect("Failed to write file");
        self.git(&scratch, &["add", "upstream.txt"]);
        self.git(&scratch, &["commit", "--quiet", "-m", "upstream change"]);
        self.git(&scratch, &["push", "--quiet", "origin", branch]);
        self
    }

    pub fn current_branch(&self, name: &str) -> String {
        self.git(&self.repository(name), &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn rev_parse(&self, name: &str, rev: &str) -> String {
        self.git(&self.repository(name), &["rev-parse", rev])
    }

    /// A `gits` command rooted at the fixture's root directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("gits");
        cmd.arg("--color")
            .arg("never")
            .env_remove("GITS_ROOT")
            .env_remove("GITS_GIT")
            .env_remove("RUST_LOG")
            .envs(IDENTITY)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_TERMINAL_PROMPT", "0")
            .current_dir(self.root());
        cmd
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}
