//! Running the stages in order for one file.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::change::FilenameChange;
use super::stages::{append_category, clean_name, relocate, stem_of, strip_id, TransformError};
use crate::roster::{MatchDiagnostic, NameDirectory};

/// Every intermediate value produced for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTrace {
    /// As discovered.
    pub discovered: FilenameChange,
    /// After the leading ID was stripped.
    pub stripped: FilenameChange,
    /// After roster name substitution.
    pub named: FilenameChange,
    /// After the category suffix was appended.
    pub categorized: FilenameChange,
    /// After relocation into the output root; the plan row.
    pub relocated: FilenameChange,
    /// Diagnostics raised while matching the name.
    pub match_diagnostics: Vec<MatchDiagnostic>,
}

impl FileTrace {
    /// Returns `true` if no roster entry replaced the stem.
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        stem_of(self.stripped.current_path()) == stem_of(self.named.current_path())
    }

    /// Stem after name substitution.
    #[must_use]
    pub fn named_stem(&self) -> &str {
        stem_of(self.named.current_path()).unwrap_or_default()
    }

    /// Final filename inside the output root.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        self.relocated
            .current_path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Applies strip-id, clean-name, append-category and relocate in that order.
pub struct FileTransformPipeline<'a> {
    directory: &'a NameDirectory,
    output_root: PathBuf,
}

impl<'a> FileTransformPipeline<'a> {
    /// Creates a pipeline matching against `directory` and relocating into `output_root`.
    #[must_use]
    pub fn new(directory: &'a NameDirectory, output_root: &Path) -> Self {
        Self {
            directory,
            output_root: output_root.to_path_buf(),
        }
    }

    /// Runs every stage for the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; later stages are not attempted.
    pub fn run(&self, path: &Path) -> Result<FileTrace, TransformError> {
        let discovered = FilenameChange::new(path);
        let stripped = strip_id(&discovered)?;
        let (named, match_diagnostics) = clean_name(&stripped, self.directory)?;
        let categorized = append_category(&named)?;
        let relocated = relocate(&categorized, &self.output_root)?;

        Ok(FileTrace {
            discovered,
            stripped,
            named,
            categorized,
            relocated,
            match_diagnostics,
        })
    }
}
