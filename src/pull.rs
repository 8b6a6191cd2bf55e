//! # Multi-branch Pull
//!
//! Brings every local branch that is behind its remote counterpart up to date,
//! in every repository, and leaves each repository on the branch it started
//! on.
//!
//! For one repository the sequence is:
//!
//! 1.  Skip the repository entirely if its working tree is dirty.
//! 2.  Fetch all remotes (unless fetching is disabled).
//! 3.  Find the not-up-to-date branches.
//! 4.  For each of them, in listing order: check it out, pull it with rebase.
//! 5.  Check out the original branch again (or the original commit when HEAD
//!     was detached).
//!
//! The steps run strictly in sequence within a repository; repositories are
//! processed in parallel by the scheduler. When a step fails, any rebase left
//! in progress is aborted and the original branch is still restored before
//! the failure is reported. Under `--fail-fast`, a failure in another
//! repository stops the sequence before the next branch.

use crate::analyzer::analyze;
use crate::config::Config;
use crate::error::Result;
use crate::git::{CommandRunner, Repo, DETACHED_HEAD};
use crate::locator::LocatedRepository;
use crate::report::PullReport;
use crate::scheduler::{partition, RunOptions, Scheduler, StopSignal};

/// What happened to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// These branches were pulled, in this order.
    Updated { branches: Vec<String> },
    /// No local branch was behind its remote counterpart.
    UpToDate,
    /// The working tree had uncommitted changes; nothing was done.
    SkippedDirty,
}

/// The pull outcome of one named repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulledRepository {
    pub name: String,
    pub outcome: PullOutcome,
}

/// Where HEAD was before the pull started.
enum OriginalHead {
    Branch(String),
    Detached(String),
}

impl OriginalHead {
    fn capture(repo: &Repo<'_>) -> Result<Self> {
        let branch = repo.current_branch()?;
        if branch == DETACHED_HEAD {
            Ok(OriginalHead::Detached(repo.head_commit()?))
        } else {
            Ok(OriginalHead::Branch(branch))
        }
    }

    fn target(&self) -> &str {
        match self {
            OriginalHead::Branch(name) | OriginalHead::Detached(name) => name,
        }
    }
}

/// Runs the pull sequence on one repository.
pub fn pull_repository(
    runner: &dyn CommandRunner,
    repository: &LocatedRepository,
    config: &Config,
    fetch: bool,
) -> Result<PullOutcome> {
    pull(runner, repository, config, fetch, &StopSignal::default())
}

fn pull(
    runner: &dyn CommandRunner,
    repository: &LocatedRepository,
    config: &Config,
    fetch: bool,
    stop: &StopSignal,
) -> Result<PullOutcome> {
    let repo = Repo::new(runner, &repository.path);

    if repo.has_uncommitted_changes()? {
        log::info!("{}: uncommitted changes, not pulling", repository.name);
        return Ok(PullOutcome::SkippedDirty);
    }

    if fetch {
        repo.fetch_all()?;
    }

    let divergence = analyze(&repo, config)?;
    if divergence.not_up_to_date.is_empty() {
        return Ok(PullOutcome::UpToDate);
    }

    let original = OriginalHead::capture(&repo)?;
    let pulled = pull_branches(
        &repo,
        &repository.name,
        &config.remote,
        &divergence.not_up_to_date,
        stop,
    );
    if pulled.as_ref().is_err_and(|error| !error.is_interruption()) {
        // A conflicting rebase keeps the branch checked out mid-rebase.
        if let Err(error) = repo.abort_rebase() {
            log::debug!("{}: no rebase to abort: {}", repository.name, error);
        }
    }
    let restored = repo.checkout(original.target());

    match (pulled, restored) {
        (Ok(()), Ok(())) => Ok(PullOutcome::Updated {
            branches: divergence.not_up_to_date,
        }),
        (Err(error), restored) => {
            if let Err(restore_error) = restored {
                log::warn!(
                    "{}: could not return to {}: {}",
                    repository.name,
                    original.target(),
                    restore_error
                );
            }
            Err(error)
        }
        (Ok(()), Err(error)) => Err(error),
    }
}

fn pull_branches(
    repo: &Repo<'_>,
    name: &str,
    remote: &str,
    branches: &[String],
    stop: &StopSignal,
) -> Result<()> {
    for branch in branches {
        stop.check(name)?;
        log::debug!("{}: pulling {}", name, branch);
        repo.checkout(branch)?;
        repo.pull_rebase(remote, branch)?;
        log::info!("{}: pulled {}", name, branch);
    }
    Ok(())
}

/// Pulls every repository in parallel and builds the sorted summary.
pub fn run_pull(
    runner: &dyn CommandRunner,
    repositories: &[LocatedRepository],
    config: &Config,
    options: RunOptions,
) -> Result<PullReport> {
    let results = Scheduler::new(config.jobs)
        .fail_fast(options.fail_fast)
        .run(repositories, |repository, stop| {
            pull(runner, repository, config, options.fetch, stop).map(|outcome| PulledRepository {
                name: repository.name.clone(),
                outcome,
            })
        })?;
    let (pulled, failed) = partition(results, options.fail_fast)?;
    Ok(PullReport::new(pulled, failed))
}
