//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `gits`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! `status` and `pull` share their repository-selection options through
//! [`RepositoryArgs`] and their setup through [`Workspace::prepare`].

pub mod completions;
pub mod poule;
pub mod pull;
pub mod status;

use anyhow::{bail, Result};
use clap::Args;
use gits::config::Config;
use gits::defaults;
use gits::git::SystemGit;
use gits::locator::{locate_repositories, LocatedRepository};
use gits::scheduler::RunOptions;
use std::path::PathBuf;

/// Options selecting and driving the repositories to work on.
#[derive(Args, Debug, Clone)]
pub struct RepositoryArgs {
    /// Directory whose subdirectories are scanned for repositories [default: current directory]
    #[arg(long, value_name = "DIR", env = "GITS_ROOT")]
    pub root: Option<PathBuf>,

    /// Skip refreshing remote-tracking branches before analysing
    #[arg(long)]
    pub no_fetch: bool,

    /// Abort on the first repository error instead of skipping the repository
    #[arg(long)]
    pub fail_fast: bool,

    /// Remote whose tracking branches are compared [default: origin]
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Maximum number of repositories processed at once [default: one per repository]
    #[arg(long, short, value_name = "N")]
    pub jobs: Option<usize>,

    /// Git executable to run
    #[arg(long, value_name = "PATH", env = "GITS_GIT", default_value = defaults::DEFAULT_GIT_PROGRAM)]
    pub git: PathBuf,
}

impl RepositoryArgs {
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(defaults::default_root)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            fetch: !self.no_fetch,
            fail_fast: self.fail_fast,
        }
    }
}

/// Everything a fan-out command needs, resolved from the arguments.
#[derive(Debug)]
pub struct Workspace {
    pub config: Config,
    pub repositories: Vec<LocatedRepository>,
    pub git: SystemGit,
}

impl Workspace {
    /// Loads the configuration and locates the repositories under the root.
    ///
    /// Finding no repository at all is an error.
    pub fn prepare(args: &RepositoryArgs) -> Result<Self> {
        let root = args.root();
        let config = Config::load(&root)?.apply_overrides(args.remote.clone(), args.jobs)?;
        let repositories = locate_repositories(&root, &config.ignore_patterns()?)?;

        if repositories.is_empty() {
            bail!("No git directories");
        }
        log::info!(
            "Found {} repositories under {}",
            repositories.len(),
            root.display()
        );

        Ok(Self {
            config,
            repositories,
            git: SystemGit::new(args.git.clone()),
        })
    }
}
