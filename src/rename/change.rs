//! Immutable original → proposed path records.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One file's original path and its current proposed path.
///
/// Transformations never mutate a change; [`FilenameChange::with_new_path`]
/// returns a new value that keeps `original`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameChange {
    original: PathBuf,
    current: PathBuf,
}

impl FilenameChange {
    /// Starts a change whose proposed path equals the original.
    #[must_use]
    pub fn new(original: impl Into<PathBuf>) -> Self {
        let original = original.into();
        Self {
            current: original.clone(),
            original,
        }
    }

    /// Path the file was discovered at.
    #[must_use]
    pub fn original_path(&self) -> &Path {
        &self.original
    }

    /// Most recently proposed path.
    #[must_use]
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    /// Returns a new change with the same original and `path` as the proposal.
    #[must_use]
    pub fn with_new_path(&self, path: impl Into<PathBuf>) -> Self {
        Self {
            original: self.original.clone(),
            current: path.into(),
        }
    }
}

impl fmt::Display for FilenameChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = (self.original.display(), self.current.display());
        write!(f, "{from} => {to}")
    }
}
