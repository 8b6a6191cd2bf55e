//! # Report Builder
//!
//! Turns the results collected by the fan-out into the text printed on
//! stdout. Results arrive in completion order, which varies from run to run;
//! both reports sort them by repository name when they are built so the
//! output is the same for the same repository state.
//!
//! The status report lists only repositories with a warning. For each, the
//! anomalies come in a fixed order: unexpected branch, work in progress,
//! ahead branches, unpushed branches, not up-to-date branches. When nothing
//! needs attention a single "Nothing to report." line is printed instead.

use crate::output::{paint, OutputConfig};
use crate::pull::{PullOutcome, PulledRepository};
use crate::record::{RepositoryRecord, SkippedRepository};
use console::Style;

const SEPARATOR: &str = "----------";

/// Line printed when no repository has a warning.
pub const NOTHING_TO_REPORT: &str = "Nothing to report.";

/// The result of a status run.
#[derive(Debug)]
pub struct StatusReport {
    records: Vec<RepositoryRecord>,
    skipped: Vec<SkippedRepository>,
}

impl StatusReport {
    pub fn new(mut records: Vec<RepositoryRecord>, mut skipped: Vec<SkippedRepository>) -> Self {
        records.sort_by(|a, b| a.name().cmp(b.name()));
        skipped.sort_by(|a, b| a.name.cmp(&b.name));
        Self { records, skipped }
    }

    /// Every inspected repository, sorted by name.
    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    /// Repositories with at least one warning, sorted by name.
    pub fn warnings(&self) -> impl Iterator<Item = &RepositoryRecord> {
        self.records.iter().filter(|r| r.has_warning())
    }

    /// Repositories that could not be inspected, sorted by name.
    pub fn skipped(&self) -> &[SkippedRepository] {
        &self.skipped
    }

    pub fn render(&self, out: &OutputConfig) -> String {
        let mut lines: Vec<String> = Vec::new();

        for record in self.warnings() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            render_record(&mut lines, record, out);
        }

        if lines.is_empty() {
            lines.push(NOTHING_TO_REPORT.to_string());
        }

        render_failures(&mut lines, "Skipped repositories:", &self.skipped, out);
        finish(lines)
    }
}

fn render_record(lines: &mut Vec<String>, record: &RepositoryRecord, out: &OutputConfig) {
    lines.push(format!(
        "{} {}",
        paint(out, "O", &Style::new().yellow()),
        record.name()
    ));
    lines.push(SEPARATOR.to_string());

    if record.is_not_on_expected_branch {
        lines.push(format!(
            "current branch: {} (expected {})",
            record.current_branch, record.expected_branch
        ));
    }
    if record.is_working_in_progress {
        lines.push(paint(out, "changes not staged or committed", &Style::new().red()));
    }
    push_branches(
        lines,
        paint(out, "ahead branches (commits not pushed):", &Style::new().blue()),
        &record.ahead_branches,
    );
    push_branches(lines, "unpushed branches:".to_string(), &record.unpushed_branches);
    push_branches(
        lines,
        "not up-to-date branches:".to_string(),
        &record.not_up_to_date_branches,
    );
}

fn push_branches(lines: &mut Vec<String>, heading: String, branches: &[String]) {
    if branches.is_empty() {
        return;
    }
    lines.push(heading);
    lines.extend(branches.iter().map(|branch| format!("- {}", branch)));
}

fn render_failures(lines: &mut Vec<String>, heading: &str, failures: &[SkippedRepository], out: &OutputConfig) {
    if failures.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(paint(out, heading, &Style::new().red()));
    lines.extend(
        failures
            .iter()
            .map(|failure| format!("- {}: {}", failure.name, failure.error)),
    );
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// The result of a pull run.
#[derive(Debug)]
pub struct PullReport {
    pulled: Vec<PulledRepository>,
    failed: Vec<SkippedRepository>,
}

impl PullReport {
    pub fn new(mut pulled: Vec<PulledRepository>, mut failed: Vec<SkippedRepository>) -> Self {
        pulled.sort_by(|a, b| a.name.cmp(&b.name));
        failed.sort_by(|a, b| a.name.cmp(&b.name));
        Self { pulled, failed }
    }

    pub fn pulled(&self) -> &[PulledRepository] {
        &self.pulled
    }

    pub fn failed(&self) -> &[SkippedRepository] {
        &self.failed
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn render(&self, out: &OutputConfig) -> String {
        let mut lines: Vec<String> = self
            .pulled
            .iter()
            .map(|repository| {
                let summary = match &repository.outcome {
                    PullOutcome::Updated { branches } => {
                        paint(out, &format!("updated {}", branches.join(", ")), &Style::new().green())
                    }
                    PullOutcome::UpToDate => "up to date".to_string(),
                    PullOutcome::SkippedDirty => {
                        paint(out, "skipped (uncommitted changes)", &Style::new().yellow())
                    }
                };
                format!("{}: {}", repository.name, summary)
            })
            .collect();

        render_failures(&mut lines, "Failed repositories:", &self.failed, out);
        finish(lines)
    }
}
