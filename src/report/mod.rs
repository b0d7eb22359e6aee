//! Rendering a [`Plan`] for the operator.
//!
//! The text report is a sequence of banner-headed sections meant to be read
//! top to bottom before anything is applied. The JSON form carries the same
//! data for tooling.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::plan::{AmbiguousMatch, Collision, OutputStatus, Plan};
use crate::rename::FilenameChange;
use crate::roster::{MatchDiagnostic, NameEntry, DISPLAY_FORMAT};

const BANNER_WIDTH: usize = 32;
const VERIFY: &str = "VERIFY THIS";

/// How the plan is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Sectioned human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Renders `plan` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(plan: &Plan, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format_plan(plan)),
        OutputFormat::Json => serde_json::to_string_pretty(plan),
    }
}

/// Formats the full sectioned report.
#[must_use]
pub fn format_plan(plan: &Plan) -> String {
    let mut lines = roster_section(&plan.roster);

    lines.push(banner("INPUT DIRECTORIES", VERIFY));
    if plan.inputs.is_empty() {
        lines.push("none".to_string());
    }
    lines.extend(plan.inputs.iter().map(ToString::to_string));
    lines.push(String::new());

    lines.push(banner("OUTPUT DIRECTORY", "GOOD"));
    let status = match plan.output_status {
        OutputStatus::Existing => "already exists",
        OutputStatus::Created => "created",
    };
    lines.push(format!("{} ({status})", plan.output_root.display()));
    lines.push(String::new());

    let diagnostics = &plan.diagnostics;

    let ambiguous = &diagnostics.ambiguous;
    let verdict = if ambiguous.is_empty() {
        "GOOD! NONE"
    } else {
        VERIFY
    };
    lines.push(banner("FILES THAT MATCH MULTIPLE NAMES", verdict));
    if ambiguous.is_empty() {
        lines.push("none".to_string());
    }
    lines.extend(ambiguous.iter().map(format_ambiguous));
    lines.push(String::new());

    let unmatched = &diagnostics.unmatched;
    let verdict = if unmatched.is_empty() {
        "GOOD! NO MANUAL WORK"
    } else {
        "NEEDS MANUAL WORK"
    };
    lines.push(banner("NO NAME MATCH FOR", verdict));
    if unmatched.is_empty() {
        lines.push("none - all files matched!".to_string());
    }
    for change in unmatched {
        lines.push(change.original_path().display().to_string());
    }
    lines.push(String::new());

    lines.extend(collision_section(
        "NAME COLLISIONS",
        &diagnostics.name_collisions,
    ));

    lines.push(banner("NEW FILE NAMES", VERIFY));
    let rows: Vec<&FilenameChange> = plan.traces.iter().map(|t| &t.relocated).collect();
    if rows.is_empty() {
        lines.push("none".to_string());
    }
    lines.extend(format_columns(&rows));
    lines.push(String::new());

    lines.push(banner("OUTPUT DIR CONTENTS", VERIFY));
    let contents = plan.output_contents();
    if contents.is_empty() {
        lines.push("empty".to_string());
    }
    lines.extend(contents);
    lines.push(String::new());

    lines.extend(collision_section(
        "OUTPUT FILE COLLISIONS",
        &diagnostics.output_collisions,
    ));

    lines.push("No files were moved. Review the plan above before applying it.".to_string());
    lines.join("\n")
}

/// Formats the roster listing on its own, for `check-roster`.
#[must_use]
pub fn format_roster(entries: &[NameEntry]) -> String {
    let mut lines = roster_section(entries);
    lines.push(format!("{} name(s) loaded.", entries.len()));
    lines.join("\n")
}

fn roster_section(entries: &[NameEntry]) -> Vec<String> {
    let mut lines = vec![
        banner("NAMES", VERIFY),
        DISPLAY_FORMAT.to_string(),
        "-".repeat(11),
    ];
    lines.extend(entries.iter().map(NameEntry::display_form));
    lines.push(String::new());
    lines
}

fn collision_section(title: &str, collisions: &[Collision]) -> Vec<String> {
    let verdict = if collisions.is_empty() {
        "GOOD! NO COLLISIONS"
    } else {
        "BAD!"
    };
    let mut lines = vec![banner(title, verdict)];
    if collisions.is_empty() {
        lines.push("none".to_string());
    }
    for collision in collisions {
        let count = collision.originals.len();
        lines.push(format!("{} ({count} files)", collision.value));
        for path in &collision.originals {
            lines.push(format!("    {}", path.display()));
        }
    }
    lines.push(String::new());
    lines
}

fn format_ambiguous(ambiguous: &AmbiguousMatch) -> String {
    let MatchDiagnostic::Ambiguous {
        text,
        candidates,
        resolved,
    } = &ambiguous.diagnostic;
    let names: Vec<String> = candidates
        .iter()
        .map(|c| format!("\"{}\" ({})", c.name, c.score))
        .collect();
    let outcome = if *resolved {
        "using top score"
    } else {
        "left unmatched"
    };
    let original = ambiguous.original.display();
    let names = names.join(", ");
    format!("{original}: {text} matches multiple names: [{names}], {outcome}")
}

fn format_columns(rows: &[&FilenameChange]) -> Vec<String> {
    let originals: Vec<String> = rows
        .iter()
        .map(|change| change.original_path().display().to_string())
        .collect();
    let width = originals.iter().map(String::len).max().unwrap_or(0);
    originals
        .iter()
        .zip(rows)
        .map(|(original, change)| {
            let proposed = change.current_path().display();
            format!("{original:<width$}  =>  {proposed}")
        })
        .collect()
}

fn banner(title: &str, verdict: &str) -> String {
    let heading = format!("== {title} ");
    format!("{heading:=<BANNER_WIDTH$} {verdict}")
}
