//! # Poule Command Implementation
//!
//! Prints the chicken mascot.

use anyhow::Result;
use console::Style;
use gits::output::{paint, OutputConfig};

/// Renders the chicken, comb in red and feet in yellow.
pub fn render(out: &OutputConfig) -> String {
    [
        paint(out, " MM", &Style::new().red()),
        "<O \\___/|".to_string(),
        "  \\_  _/".to_string(),
        paint(out, "    ][  O", &Style::new().yellow()),
    ]
    .join("\n")
}

/// Execute the `poule` command.
pub fn execute(out: &OutputConfig) -> Result<()> {
    println!("{}", render(out));
    Ok(())
}
