//! # Error Handling
//!
//! This module defines the centralized error type for `gits`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! the engine can run into, each variant carrying enough context to produce a
//! useful diagnostic.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. The two families that matter to
//!   the engine are:
//!   - filesystem failures while locating repositories (`Filesystem`), which
//!     always abort the run, and
//!   - git failures (`GitCommand`, `UnexpectedOutput`), which are scoped to a
//!     single repository and are recoverable unless the user asked for
//!     fail-fast behavior.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The remaining variants wrap configuration, I/O and thread pool errors.

use thiserror::Error;

/// Main error type for gits operations
#[derive(Error, Debug)]
pub enum Error {
    /// The root directory, or a candidate repository directory, could not be
    /// read.
    #[error("Filesystem error at {path}: {message}")]
    Filesystem { path: String, message: String },

    /// A git command exited with a non-zero status or could not be started.
    ///
    /// `output` holds whatever the command printed before failing.
    #[error("Git command failed in {directory}: {command}{}", format_output(output))]
    GitCommand {
        directory: String,
        command: String,
        output: String,
    },

    /// A git command succeeded but printed something we could not interpret.
    #[error("Unexpected output from {command} in {directory}: {output:?}")]
    UnexpectedOutput {
        directory: String,
        command: String,
        output: String,
    },

    /// The unit stopped early because another repository failed under
    /// `--fail-fast`.
    #[error("Stopped in {directory} after another repository failed")]
    Interrupted { directory: String },

    /// The `.gits.yaml` configuration file is invalid.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// The worker pool for the fan-out could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Whether the error is confined to a single repository.
    ///
    /// Repository-scoped errors can be turned into a skipped entry of the
    /// report; everything else aborts the run.
    pub fn is_repository_scoped(&self) -> bool {
        matches!(
            self,
            Error::GitCommand { .. } | Error::UnexpectedOutput { .. } | Error::Interrupted { .. }
        )
    }

    /// Whether the unit gave up on its own because the run was stopped.
    pub fn is_interruption(&self) -> bool {
        matches!(self, Error::Interrupted { .. })
    }
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" - {}", trimmed)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
