//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance:
//! colors in the rendered reports and the progress spinner shown while the
//! repositories are being processed.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust
//! use gits::output::{paint, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! assert_eq!(paint(&config, "O", &console::Style::new().yellow()), "O");
//! ```

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::time::Duration;

/// Output configuration for controlling colors and progress display.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
    /// Whether progress indicators should be drawn.
    pub show_progress: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// # Behavior
    /// - `--color=always`: Force colors on (overrides NO_COLOR)
    /// - `--color=never`: Force colors off
    /// - `--color=auto`: Detect based on environment
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    ///
    /// Progress is only drawn when stderr is a terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self {
            use_color,
            show_progress: console::Term::stderr().is_term(),
        }
    }

    /// Disables progress output, used by `--quiet`.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self {
            use_color: true,
            show_progress: false,
        }
    }

    /// Create a configuration with colors always disabled.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            show_progress: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Applies `style` to `text` when colors are enabled.
///
/// Styling is forced rather than left to `console`'s own terminal detection,
/// so the decision made in [`OutputConfig`] is the only one that counts.
pub fn paint(config: &OutputConfig, text: &str, style: &Style) -> String {
    if config.use_color {
        style.clone().force_styling(true).apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Starts a spinner on stderr, or a hidden bar when progress is disabled.
pub fn spinner(config: &OutputConfig, message: &'static str) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
