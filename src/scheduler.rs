//! # Fan-out Scheduler
//!
//! Runs one unit of work per repository in parallel and waits for all of them
//! before handing the results back.
//!
//! Units only ever block on git subprocesses, so the scheduler sizes a
//! dedicated rayon pool with one thread per repository (or `jobs` threads when
//! configured) instead of sharing the global, CPU-sized pool. Each unit pushes
//! its result into a `Mutex`-guarded vector; completion order is therefore
//! arbitrary and callers sort before rendering.
//!
//! ## Failure policy
//!
//! A unit failing with a repository-scoped error (see
//! [`Error::is_repository_scoped`](crate::error::Error::is_repository_scoped)) does not affect the other units. When the
//! results are split with [`partition`], such failures become
//! [`SkippedRepository`] entries with a logged diagnostic.
//!
//! With `fail_fast`, or on an error that is not repository-scoped, the first
//! failure raises the shared [`StopSignal`]: units not yet started are never
//! started, and running units give up at their next checkpoint with
//! [`Error::Interrupted`](crate::error::Error::Interrupted). [`partition`]
//! then returns the first real failure by repository name and the run
//! produces no report at all.

use crate::error::{Error, Result};
use crate::locator::LocatedRepository;
use crate::record::SkippedRepository;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Options shared by the status and pull fan-outs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Refresh remote-tracking branches before analysing.
    pub fetch: bool,
    /// Abort on the first failing repository instead of skipping it.
    pub fail_fast: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fetch: true,
            fail_fast: false,
        }
    }
}

/// The outcome of one unit of work.
#[derive(Debug)]
pub struct UnitResult<T> {
    pub name: String,
    pub result: Result<T>,
}

/// Tells running units that the run was stopped by a failure elsewhere.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Checkpoint for a unit working in `directory`: fails with
    /// [`Error::Interrupted`] once the run was stopped.
    pub fn check(&self, directory: &str) -> Result<()> {
        if self.is_stopped() {
            return Err(Error::Interrupted {
                directory: directory.to_string(),
            });
        }
        Ok(())
    }
}

/// Runs units of work over a set of repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    jobs: Option<usize>,
    fail_fast: bool,
}

impl Scheduler {
    /// Creates a scheduler running at most `jobs` units at once, or one per
    /// repository when `None`.
    pub fn new(jobs: Option<usize>) -> Self {
        Self {
            jobs,
            fail_fast: false,
        }
    }

    /// Stops the whole run on the first repository-scoped failure too.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Number of worker threads used for `repositories` repositories.
    pub fn worker_count(&self, repositories: usize) -> usize {
        self.jobs
            .map_or(repositories, |jobs| jobs.min(repositories))
            .max(1)
    }

    fn stops_run(&self, error: &Error) -> bool {
        !error.is_interruption() && (self.fail_fast || !error.is_repository_scoped())
    }

    /// Runs `unit` once per repository and returns every result, in
    /// completion order.
    ///
    /// Repositories whose unit was never started because the run stopped
    /// have no result.
    pub fn run<T, F>(&self, repositories: &[LocatedRepository], unit: F) -> Result<Vec<UnitResult<T>>>
    where
        T: Send,
        F: Fn(&LocatedRepository, &StopSignal) -> Result<T> + Sync,
    {
        if repositories.is_empty() {
            return Ok(Vec::new());
        }

        let workers = self.worker_count(repositories.len());
        log::info!(
            "Processing {} repositories with {} workers",
            repositories.len(),
            workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gits-worker-{}", i))
            .build()?;

        let stop = StopSignal::default();
        let collected: Mutex<Vec<UnitResult<T>>> = Mutex::new(Vec::with_capacity(repositories.len()));
        pool.install(|| {
            repositories.par_iter().for_each(|repository| {
                if stop.is_stopped() {
                    log::debug!("Not starting {}: run stopped", repository.name);
                    return;
                }

                let result = unit(repository, &stop);
                if let Err(error) = &result {
                    if self.stops_run(error) {
                        stop.stop();
                    }
                }
                collected
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(UnitResult {
                        name: repository.name.clone(),
                        result,
                    });
            });
        });

        Ok(collected.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Splits unit results into successes and skipped repositories.
///
/// Errors that are not repository-scoped are always returned. With
/// `fail_fast`, so is the first repository-scoped error by name; units that
/// were interrupted by that failure are never the one reported.
pub fn partition<T>(results: Vec<UnitResult<T>>, fail_fast: bool) -> Result<(Vec<T>, Vec<SkippedRepository>)> {
    let mut completed = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();

    for UnitResult { name, result } in results {
        match result {
            Ok(value) => completed.push(value),
            Err(error) => skipped.push(SkippedRepository { name, error }),
        }
    }
    skipped.sort_by(|a, b| a.name.cmp(&b.name));

    let is_fatal = |s: &SkippedRepository| fail_fast || !s.error.is_repository_scoped();
    let fatal = skipped
        .iter()
        .position(|s| is_fatal(s) && !s.error.is_interruption())
        .or_else(|| skipped.iter().position(is_fatal));
    if let Some(index) = fatal {
        return Err(skipped.swap_remove(index).error);
    }

    for entry in &skipped {
        log::warn!("Skipping {}: {}", entry.name, entry.error);
    }
    Ok((completed, skipped))
}
