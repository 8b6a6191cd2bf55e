//! # gits CLI
//!
//! This is the binary entry point for the `gits` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and output styling.
//! - Executing the appropriate command and turning errors into a non-zero
//!   exit status.
//!
//! The repository logic lives in the `gits` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
