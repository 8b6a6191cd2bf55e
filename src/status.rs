//! # Status
//!
//! The read-only side of the tool: inspect every repository and build the
//! report of the ones needing attention.
//!
//! Repositories with uncommitted changes are inspected like any other. The
//! fetch only updates remote-tracking branches and never touches the working
//! tree, so a dirty repository still gets its full divergence analysis, with
//! the working-in-progress flag on top.

use crate::analyzer::analyze;
use crate::config::Config;
use crate::error::Result;
use crate::git::{CommandRunner, Repo};
use crate::locator::LocatedRepository;
use crate::record::RepositoryRecord;
use crate::report::StatusReport;
use crate::scheduler::{partition, RunOptions, Scheduler, StopSignal};

/// Inspects one repository.
pub fn inspect_repository(
    runner: &dyn CommandRunner,
    repository: &LocatedRepository,
    config: &Config,
    fetch: bool,
) -> Result<RepositoryRecord> {
    inspect(runner, repository, config, fetch, &StopSignal::default())
}

fn inspect(
    runner: &dyn CommandRunner,
    repository: &LocatedRepository,
    config: &Config,
    fetch: bool,
    stop: &StopSignal,
) -> Result<RepositoryRecord> {
    let repo = Repo::new(runner, &repository.path);
    let record = RepositoryRecord::new(repository.name.as_str());

    if fetch {
        repo.fetch_all()?;
        stop.check(&repository.name)?;
    }
    let divergence = analyze(&repo, config)?;
    let current_branch = repo.current_branch()?;
    let is_working_in_progress = repo.has_uncommitted_changes()?;
    let expected_branch = divergence.workflow.stable_branch(config).to_string();

    log::debug!(
        "{}: on {} (expected {}), {} unpushed, {} ahead, {} not up-to-date",
        repository.name,
        current_branch,
        expected_branch,
        divergence.unpushed.len(),
        divergence.ahead.len(),
        divergence.not_up_to_date.len()
    );

    Ok(record.populate(
        current_branch,
        &expected_branch,
        is_working_in_progress,
        divergence,
    ))
}

/// Inspects every repository in parallel and builds the sorted report.
pub fn run_status(
    runner: &dyn CommandRunner,
    repositories: &[LocatedRepository],
    config: &Config,
    options: RunOptions,
) -> Result<StatusReport> {
    let results = Scheduler::new(config.jobs)
        .fail_fast(options.fail_fast)
        .run(repositories, |repository, stop| {
            inspect(runner, repository, config, options.fetch, stop)
        })?;
    let (records, skipped) = partition(results, options.fail_fast)?;
    Ok(StatusReport::new(records, skipped))
}
