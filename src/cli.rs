//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use gits::output::OutputConfig;

use crate::commands;

/// gits - Status report and multi-branch pull across many git clones
#[derive(Parser, Debug)]
#[command(name = "gits")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,

    /// Do not show the progress spinner
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report every repository that needs attention
    Status(commands::status::StatusArgs),

    /// Pull every branch that is behind its remote, in every repository
    Pull(commands::pull::PullArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),

    /// Display a chicken
    Poule,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let mut out = OutputConfig::from_env_and_flag(&self.color);
        if self.quiet || !out.use_color {
            out = out.quiet();
        }

        match self.command {
            Commands::Status(args) => commands::status::execute(args, &out),
            Commands::Pull(args) => commands::pull::execute(args, &out),
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::Poule => commands::poule::execute(&out),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when the CLI is driven in-process.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_defaults() {
        let cli = Cli::try_parse_from(["gits", "status"]).unwrap();
        assert_eq!(cli.color, "auto");
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.quiet);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gits", "pull", "--color", "never", "--log-level", "debug", "-q"]).unwrap();
        assert_eq!(cli.color, "never");
        assert_eq!(cli.log_level, "debug");
        assert!(cli.quiet);
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["gits", "status", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["gits"]).is_err());
    }
}
