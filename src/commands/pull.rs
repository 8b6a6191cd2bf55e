//! # Pull Command Implementation
//!
//! Brings every local branch that is behind its remote counterpart up to date,
//! in every repository under the root, then puts each repository back on the
//! branch it started on. Repositories with uncommitted changes are left alone.
//!
//! The command fails when at least one repository could not be pulled, after
//! printing the summary of all of them.

use anyhow::{bail, Result};
use clap::Args;
use gits::output::{self, OutputConfig};
use gits::pull::run_pull;

use super::{RepositoryArgs, Workspace};

/// Pull every branch that is behind its remote, in every repository
#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub repositories: RepositoryArgs,
}

/// Execute the `pull` command.
pub fn execute(args: PullArgs, out: &OutputConfig) -> Result<()> {
    let workspace = Workspace::prepare(&args.repositories)?;

    let progress = output::spinner(out, "Waiting ...");
    let report = run_pull(
        &workspace.git,
        &workspace.repositories,
        &workspace.config,
        args.repositories.run_options(),
    );
    progress.finish_and_clear();

    let report = report?;
    print!("{}", report.render(out));

    if report.has_failures() {
        bail!(
            "{} of {} repositories could not be pulled",
            report.failed().len(),
            workspace.repositories.len()
        );
    }
    Ok(())
}
