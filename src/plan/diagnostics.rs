//! Batch-level checks over completed file traces.
//!
//! Nothing here changes a trace. Results are sorted by value so they are the
//! same for any ordering of the input files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::rename::{FileTrace, FilenameChange};
use crate::roster::MatchDiagnostic;

/// Two or more input files that would end up with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The shared name.
    pub value: String,
    /// Original paths producing it, sorted.
    pub originals: Vec<PathBuf>,
}

/// A roster lookup that found more than one candidate for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousMatch {
    /// The file being named.
    pub original: PathBuf,
    /// What the lookup reported.
    pub diagnostic: MatchDiagnostic,
}

/// Everything an operator should review before trusting the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchDiagnostics {
    /// Lookups with several candidates.
    pub ambiguous: Vec<AmbiguousMatch>,
    /// Files whose name no roster entry replaced, as of the clean-name stage.
    pub unmatched: Vec<FilenameChange>,
    /// Stems shared by several files after name substitution.
    pub name_collisions: Vec<Collision>,
    /// Output filenames shared by several files.
    pub output_collisions: Vec<Collision>,
}

impl BatchDiagnostics {
    /// Runs every check over `traces`.
    #[must_use]
    pub fn collect(traces: &[FileTrace]) -> Self {
        Self {
            ambiguous: find_ambiguous(traces),
            unmatched: find_unmatched(traces),
            name_collisions: find_name_collisions(traces),
            output_collisions: find_output_collisions(traces),
        }
    }

    /// Returns `true` if nothing needs manual attention.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.ambiguous.is_empty()
            && self.unmatched.is_empty()
            && self.name_collisions.is_empty()
            && self.output_collisions.is_empty()
    }
}

/// Lookups that raised an ambiguity, in trace order.
#[must_use]
pub fn find_ambiguous(traces: &[FileTrace]) -> Vec<AmbiguousMatch> {
    traces
        .iter()
        .flat_map(|trace| {
            trace.match_diagnostics.iter().map(|diagnostic| AmbiguousMatch {
                original: trace.discovered.original_path().to_path_buf(),
                diagnostic: diagnostic.clone(),
            })
        })
        .collect()
}

/// Files whose stem was unchanged by the clean-name stage, in trace order.
#[must_use]
pub fn find_unmatched(traces: &[FileTrace]) -> Vec<FilenameChange> {
    traces
        .iter()
        .filter(|trace| trace.is_unmatched())
        .map(|trace| trace.named.clone())
        .collect()
}

/// Stems after name substitution that more than one file shares.
#[must_use]
pub fn find_name_collisions(traces: &[FileTrace]) -> Vec<Collision> {
    collisions_by(traces, |trace| trace.named_stem().to_string())
}

/// Final output filenames that more than one file shares.
#[must_use]
pub fn find_output_collisions(traces: &[FileTrace]) -> Vec<Collision> {
    collisions_by(traces, FileTrace::output_file_name)
}

fn collisions_by<F>(traces: &[FileTrace], key: F) -> Vec<Collision>
where
    F: Fn(&FileTrace) -> String,
{
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for trace in traces {
        let original = trace.discovered.original_path().to_path_buf();
        groups.entry(key(trace)).or_default().push(original);
    }

    groups
        .into_iter()
        .filter(|(_, originals)| originals.len() > 1)
        .map(|(value, mut originals)| {
            originals.sort();
            Collision { value, originals }
        })
        .collect()
}
