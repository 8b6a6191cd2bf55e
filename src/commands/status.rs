//! # Status Command Implementation
//!
//! Inspects every repository under the root and prints the ones that need
//! attention: unexpected branch, uncommitted changes, and branches that are
//! unpushed, ahead of or behind their remote counterpart.
//!
//! Nothing in the repositories is modified apart from the remote-tracking
//! branches refreshed by the initial fetch (disable it with `--no-fetch`).

use anyhow::Result;
use clap::Args;
use gits::output::{self, OutputConfig};
use gits::status::run_status;

use super::{RepositoryArgs, Workspace};

/// Report every repository that needs attention
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub repositories: RepositoryArgs,
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, out: &OutputConfig) -> Result<()> {
    let workspace = Workspace::prepare(&args.repositories)?;

    let progress = output::spinner(out, "Waiting ...");
    let report = run_status(
        &workspace.git,
        &workspace.repositories,
        &workspace.config,
        args.repositories.run_options(),
    );
    progress.finish_and_clear();

    print!("{}", report?.render(out));
    Ok(())
}
