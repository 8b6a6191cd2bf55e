//! Default values for gits configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the optional configuration file looked up in the root directory.
pub const CONFIG_FILENAME: &str = ".gits.yaml";

/// Marker directory identifying a repository root.
pub const REPOSITORY_MARKER: &str = ".git";

/// Remote whose tracking branches are compared against local branches.
pub const DEFAULT_REMOTE: &str = "origin";

/// Integration branch of the two-branch workflow.
pub const DEFAULT_DEVELOP_BRANCH: &str = "develop";

/// Stable branch when the repository does not use the two-branch workflow.
pub const DEFAULT_MAIN_BRANCH: &str = "master";

/// Git executable used when `GITS_GIT` is not set.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Returns the default root directory to scan.
///
/// This is the current working directory, falling back to `.` when it cannot
/// be determined (for example when it was deleted under us).
pub fn default_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
