//! # gits
//!
//! This library provides the engine behind the `gits` command-line tool: it
//! inspects many local git clones sitting side by side under one directory,
//! reports the ones that need attention, and brings their branches up to date
//! in a single invocation.
//!
//! ## Quick Example
//!
//! ```
//! use gits::branch::parse_branch_listing;
//!
//! let listing = "* develop\n  master\n  remotes/origin/HEAD -> origin/develop\n  remotes/origin/develop\n";
//! let branches = parse_branch_listing(listing);
//!
//! assert_eq!(branches.len(), 3);
//! assert!(branches[0].is_current);
//! assert_eq!(branches[2].remote.as_deref(), Some("origin"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Locator (`locator`)**: finds the immediate subdirectories of a root that
//!   are repository roots.
//! - **Command runner (`git`)**: runs git in one repository's working directory
//!   behind the [`git::CommandRunner`] trait, so everything above it can be
//!   tested with a scripted runner.
//! - **Divergence analysis (`branch`, `analyzer`)**: parses the branch listing
//!   and classifies each local branch as unpushed, ahead or not up-to-date.
//! - **Units of work (`status`, `pull`)**: the per-repository sequences.
//! - **Fan-out (`scheduler`)**: runs one unit per repository concurrently.
//! - **Reports (`record`, `report`)**: collected results, sorted and rendered.
//!
//! ## Execution Flow
//!
//! 1.  **Configuration**: defaults, then `.gits.yaml` in the root, then flags.
//! 2.  **Location**: list the repositories under the root, sorted by name.
//! 3.  **Fan-out**: inspect (or pull) every repository in parallel.
//! 4.  **Report**: sort the results by name and render them.

pub mod analyzer;
pub mod branch;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod locator;
pub mod output;
pub mod pull;
pub mod record;
pub mod report;
pub mod scheduler;
pub mod status;
