//! Building the rename plan for a whole batch.
//!
//! Loads the roster, scans the input tree, prepares the output root, runs
//! every file through the pipeline and then runs the batch diagnostics.
//! Nothing is moved; the plan is meant to be reviewed first.

pub mod diagnostics;

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::rename::{FileTrace, FileTransformPipeline, TransformError};
use crate::roster::{load_roster, NameEntry, RosterError};
use crate::scan::{discover_inputs, InputDir, ScanError};

pub use diagnostics::{AmbiguousMatch, BatchDiagnostics, Collision};

/// Errors that abort planning.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The roster could not be loaded.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// The input tree could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The output root could not be created.
    #[error("Failed to prepare output directory {path}: {reason}")]
    OutputRoot {
        /// Output root path.
        path: String,
        /// Underlying error message.
        reason: String,
    },

    /// One or more input filenames could not be transformed.
    #[error("{}", RejectedList(.0))]
    RejectedFiles(Vec<TransformError>),
}

struct RejectedList<'a>(&'a [TransformError]);

impl fmt::Display for RejectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} input file(s) cannot be renamed:", self.0.len())?;
        for err in self.0 {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

/// State of the output root when planning started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStatus {
    /// The directory was already there.
    Existing,
    /// The directory was created for this run.
    Created,
}

/// Everything an operator needs to verify before applying a rename.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// When the plan was computed.
    pub generated_at: DateTime<Utc>,
    /// The parsed roster, in file order.
    pub roster: Vec<NameEntry>,
    /// Category directories and their files.
    pub inputs: Vec<InputDir>,
    /// Where renamed files would go.
    pub output_root: PathBuf,
    /// Whether the output root had to be created.
    pub output_status: OutputStatus,
    /// One trace per input file, in discovery order.
    pub traces: Vec<FileTrace>,
    /// Batch-level findings.
    pub diagnostics: BatchDiagnostics,
}

impl Plan {
    /// Final filenames inside the output root, in discovery order.
    #[must_use]
    pub fn output_contents(&self) -> Vec<String> {
        self.traces.iter().map(FileTrace::output_file_name).collect()
    }
}

/// Computes the rename plan described by `config`.
///
/// Fails fast on a bad roster or missing input root. Every input file is run
/// through the pipeline before failing, so one error lists all rejected files.
///
/// # Errors
///
/// Returns an error if the roster, input tree or output root is unusable, or
/// any input filename cannot be transformed.
pub fn build_plan(ctx: &ServiceContext, config: &Config) -> Result<Plan, PlanError> {
    let directory = load_roster(ctx, &config.roster_path)?;
    let directory = directory.with_policy(config.ambiguity);
    let inputs = discover_inputs(ctx, &config.input_root)?;
    let output_status = prepare_output_root(ctx, config)?;

    let pipeline = FileTransformPipeline::new(&directory, &config.output_root);
    let mut traces = Vec::new();
    let mut rejected = Vec::new();
    for path in inputs.iter().flat_map(|dir| dir.files.iter()) {
        match pipeline.run(path) {
            Ok(trace) => traces.push(trace),
            Err(err) => {
                tracing::warn!(error = %err, "rejected input file");
                rejected.push(err);
            }
        }
    }
    if !rejected.is_empty() {
        return Err(PlanError::RejectedFiles(rejected));
    }

    let diagnostics = BatchDiagnostics::collect(&traces);
    tracing::info!(
        files = traces.len(),
        unmatched = diagnostics.unmatched.len(),
        name_collisions = diagnostics.name_collisions.len(),
        output_collisions = diagnostics.output_collisions.len(),
        "plan computed"
    );

    Ok(Plan {
        generated_at: ctx.clock.now(),
        roster: directory.entries().to_vec(),
        inputs,
        output_root: config.output_root.clone(),
        output_status,
        traces,
        diagnostics,
    })
}

fn prepare_output_root(ctx: &ServiceContext, config: &Config) -> Result<OutputStatus, PlanError> {
    let path = &config.output_root;
    if ctx.fs.is_dir(path) {
        return Ok(OutputStatus::Existing);
    }
    ctx.fs.create_dir_all(path).map_err(|e| PlanError::OutputRoot {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), "created output directory");
    Ok(OutputStatus::Created)
}
