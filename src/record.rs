//! The per-repository results produced by the fan-out.

use crate::analyzer::Divergence;
use crate::error::Error;

/// Synchronization state of one repository.
///
/// A record is built by one worker and handed over once to the shared
/// collection. The name is fixed at creation; a record that could not be
/// populated stays in its default state and carries no warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRecord {
    name: String,
    /// Branch checked out at scan time, `HEAD` when detached.
    pub current_branch: String,
    /// The branch the repository was expected to be on.
    pub expected_branch: String,
    /// Uncommitted, unstaged or untracked changes in the working tree.
    pub is_working_in_progress: bool,
    pub is_not_on_expected_branch: bool,
    /// Branches with commits not yet on the remote.
    pub ahead_branches: Vec<String>,
    /// Branches without a remote counterpart.
    pub unpushed_branches: Vec<String>,
    /// Branches whose remote counterpart has commits not present locally.
    pub not_up_to_date_branches: Vec<String>,
}

impl RepositoryRecord {
    /// Creates an empty record for the repository called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fills the record from an analysis of the repository.
    pub fn populate(
        mut self,
        current_branch: String,
        expected_branch: &str,
        is_working_in_progress: bool,
        divergence: Divergence,
    ) -> Self {
        self.is_not_on_expected_branch = current_branch != expected_branch;
        self.current_branch = current_branch;
        self.expected_branch = expected_branch.to_string();
        self.is_working_in_progress = is_working_in_progress;
        self.ahead_branches = divergence.ahead;
        self.unpushed_branches = divergence.unpushed;
        self.not_up_to_date_branches = divergence.not_up_to_date;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether any anomaly was found.
    pub fn has_warning(&self) -> bool {
        self.is_working_in_progress
            || self.is_not_on_expected_branch
            || !self.ahead_branches.is_empty()
            || !self.unpushed_branches.is_empty()
            || !self.not_up_to_date_branches.is_empty()
    }
}

/// A repository whose unit of work failed and was left out of the results.
#[derive(Debug)]
pub struct SkippedRepository {
    pub name: String,
    pub error: Error,
}
