//! Discovery of category directories and the scanned files inside them.
//!
//! The input root holds one directory per category:
//!
//! ```text
//! <input_root>/
//!   ├── xrays/
//!   │     ├── 1234_Smith_report.pdf
//!   │     └── 1235_Garcia.pdf
//!   └── labs/
//!         └── 88_Nguyen_bloodwork.pdf
//! ```
//!
//! Only one level is read. Hidden entries are ignored. Names that are not
//! valid UTF-8 are kept so the pipeline can reject them.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::context::ServiceContext;

/// Errors raised while scanning the input tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input root is missing or not a directory.
    #[error("Input directory {path} does not exist or is not a directory")]
    InputRootMissing {
        /// The configured input root.
        path: String,
    },

    /// A directory could not be listed.
    #[error("Failed to list {path}: {reason}")]
    List {
        /// Directory being listed.
        path: String,
        /// Underlying error message.
        reason: String,
    },
}

/// A category directory and the files directly inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDir {
    /// Path of the category directory.
    pub path: PathBuf,
    /// Files in the directory, sorted by name.
    pub files: Vec<PathBuf>,
}

impl InputDir {
    /// Number of files found in this directory.
    #[must_use]
    pub fn num_files(&self) -> usize {
        self.files.len()
    }
}

impl fmt::Display for InputDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} files)", self.path.display(), self.num_files())
    }
}

/// Lists every category directory under `input_root` and the files inside each.
///
/// # Errors
///
/// Returns an error if the root is missing or any directory cannot be listed.
pub fn discover_inputs(
    ctx: &ServiceContext,
    input_root: &Path,
) -> Result<Vec<InputDir>, ScanError> {
    if !ctx.fs.is_dir(input_root) {
        return Err(ScanError::InputRootMissing {
            path: input_root.display().to_string(),
        });
    }

    let mut dirs = Vec::new();
    for name in list_visible(ctx, input_root)? {
        let path = input_root.join(&name);
        if !ctx.fs.is_dir(&path) {
            tracing::warn!(path = %path.display(), "ignoring file outside a category directory");
            continue;
        }
        let files = list_files(ctx, &path)?;
        tracing::debug!(dir = %path.display(), files = files.len(), "scanned category directory");
        dirs.push(InputDir { path, files });
    }

    tracing::info!(
        root = %input_root.display(),
        dirs = dirs.len(),
        files = dirs.iter().map(InputDir::num_files).sum::<usize>(),
        "discovered inputs"
    );
    Ok(dirs)
}

fn list_files(ctx: &ServiceContext, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for name in list_visible(ctx, dir)? {
        let path = dir.join(&name);
        if ctx.fs.is_dir(&path) {
            tracing::debug!(path = %path.display(), "skipping nested directory");
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

fn list_visible(ctx: &ServiceContext, dir: &Path) -> Result<Vec<OsString>, ScanError> {
    let mut names = ctx.fs.list_dir(dir).map_err(|e| ScanError::List {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    names.retain(|name| !name.to_string_lossy().starts_with('.'));
    names.sort();
    Ok(names)
}
