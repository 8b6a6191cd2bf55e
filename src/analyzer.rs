//! # Divergence Analyzer
//!
//! Classifies every local branch of a repository against its counterpart on
//! the configured remote:
//!
//! - **unpushed**: no remote-tracking branch of the same name exists;
//! - **ahead**: the local branch has commits the remote branch lacks;
//! - **not up-to-date**: the remote branch has commits the local branch lacks.
//!
//! Ahead and not-up-to-date are counted independently, so a diverged branch is
//! both. An unpushed branch is never counted at all.
//!
//! The analyzer also detects the workflow: a remote-tracking branch named like
//! the configured develop branch means the repository follows the two-branch
//! workflow, where work is expected to happen on `develop` rather than on the
//! main branch.

use crate::branch::BranchDescriptor;
use crate::config::Config;
use crate::error::Result;
use crate::git::Repo;
use std::collections::HashSet;

/// Branching convention of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workflow {
    /// `develop` exists on the remote and is the expected branch.
    TwoBranch,
    /// Only the main branch is expected.
    #[default]
    SingleBranch,
}

impl Workflow {
    /// The branch a repository is expected to have checked out.
    pub fn stable_branch<'c>(&self, config: &'c Config) -> &'c str {
        match self {
            Workflow::TwoBranch => &config.develop_branch,
            Workflow::SingleBranch => &config.main_branch,
        }
    }
}

/// Per-branch classification of one repository.
///
/// Every list keeps the order of the branch listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Divergence {
    pub unpushed: Vec<String>,
    pub not_up_to_date: Vec<String>,
    pub ahead: Vec<String>,
    pub workflow: Workflow,
}

/// Lists the branches of `repo` and classifies them.
pub fn analyze(repo: &Repo<'_>, config: &Config) -> Result<Divergence> {
    let branches = repo.list_branches()?;
    classify(&branches, config, |from, to| repo.count_commits(from, to))
}

/// Classifies `branches`, using `count` to get the number of commits
/// reachable from its second argument but not from its first.
pub fn classify<F>(branches: &[BranchDescriptor], config: &Config, mut count: F) -> Result<Divergence>
where
    F: FnMut(&str, &str) -> Result<u64>,
{
    let remote_names: HashSet<&str> = branches
        .iter()
        .filter(|b| b.tracks(&config.remote))
        .map(|b| b.name.as_str())
        .collect();

    let mut divergence = Divergence {
        workflow: if remote_names.contains(config.develop_branch.as_str()) {
            Workflow::TwoBranch
        } else {
            Workflow::SingleBranch
        },
        ..Divergence::default()
    };

    for local in branches.iter().filter(|b| !b.is_remote()) {
        if !remote_names.contains(local.name.as_str()) {
            divergence.unpushed.push(local.name.clone());
            continue;
        }

        let local_ref = format!("refs/heads/{}", local.name);
        let remote_ref = format!("refs/remotes/{}/{}", config.remote, local.name);

        if count(&local_ref, &remote_ref)? > 0 {
            divergence.not_up_to_date.push(local.name.clone());
        }
        if count(&remote_ref, &local_ref)? > 0 {
            divergence.ahead.push(local.name.clone());
        }
    }

    Ok(divergence)
}
