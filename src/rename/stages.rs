//! The individual filename transformations.
//!
//! Every stage reads only `current_path` (plus its declared extra input) and
//! returns a new [`FilenameChange`]. The stem-rewriting stages keep the
//! directory and the final extension exactly as they were.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::change::FilenameChange;
use crate::roster::{MatchDiagnostic, NameDirectory, NameEntry};

/// Separator between the leading ID and the rest of a scanned filename.
pub const ID_SEPARATOR: char = '_';

/// Joins the category to the end of a renamed stem.
pub const CATEGORY_SEPARATOR: char = '_';

/// Errors raised when a filename cannot be transformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The stem has no underscore, so there is no ID to strip.
    #[error("{path}: no '_' separating the ID from the rest of the name")]
    MissingIdSeparator {
        /// The offending path.
        path: String,
    },

    /// Stripping the ID left nothing of the stem.
    #[error("{path}: nothing left of the name after stripping the ID")]
    EmptyStem {
        /// The offending path.
        path: String,
    },

    /// The path has no filename component.
    #[error("{path}: path has no file name")]
    NoFileName {
        /// The offending path.
        path: String,
    },

    /// The filename is not valid UTF-8.
    #[error("{path}: file name is not valid UTF-8")]
    NonUtf8Name {
        /// The offending path, lossily rendered.
        path: String,
    },

    /// The original path has no parent directory to take a category from.
    #[error("{path}: no parent directory to derive a category from")]
    MissingCategory {
        /// The offending path.
        path: String,
    },
}

/// Returns the UTF-8 stem of `path`, if it has one.
#[must_use]
pub fn stem_of(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

/// Removes everything up to and including the first underscore of the stem.
///
/// # Errors
///
/// Fails if the stem has no underscore or nothing follows it.
pub fn strip_id(change: &FilenameChange) -> Result<FilenameChange, TransformError> {
    let path = display(change.current_path());
    on_stem(change, |stem| match stem.split_once(ID_SEPARATOR) {
        None => Err(TransformError::MissingIdSeparator { path }),
        Some((_, "")) => Err(TransformError::EmptyStem { path }),
        Some((_, rest)) => Ok(rest.to_string()),
    })
}

/// Replaces the stem with the matched person's file token.
///
/// The stem is left as is when the roster yields no match. Lookup
/// diagnostics are handed back to the caller.
///
/// # Errors
///
/// Fails if the current filename is missing or not UTF-8.
pub fn clean_name(
    change: &FilenameChange,
    directory: &NameDirectory,
) -> Result<(FilenameChange, Vec<MatchDiagnostic>), TransformError> {
    let mut diagnostics = Vec::new();
    let renamed = on_stem(change, |stem| {
        let lookup = directory.find_best_match(stem);
        diagnostics = lookup.diagnostics;
        let token = lookup.entry.map(NameEntry::file_token);
        Ok(token.unwrap_or_else(|| stem.to_string()))
    })?;
    Ok((renamed, diagnostics))
}

/// Appends `_<category>` to the stem, taking the category from the original
/// path's parent directory.
///
/// # Errors
///
/// Fails if the original path has no named parent directory.
pub fn append_category(change: &FilenameChange) -> Result<FilenameChange, TransformError> {
    let category = category_of(change.original_path())?;
    on_stem(change, |stem| Ok(format!("{stem}{CATEGORY_SEPARATOR}{category}")))
}

/// Moves the proposed file into `output_root`, keeping its filename.
///
/// # Errors
///
/// Fails if the current path has no filename.
pub fn relocate(
    change: &FilenameChange,
    output_root: &Path,
) -> Result<FilenameChange, TransformError> {
    let current = change.current_path();
    let Some(file_name) = current.file_name() else {
        return Err(TransformError::NoFileName {
            path: display(current),
        });
    };
    Ok(change.with_new_path(output_root.join(file_name)))
}

/// Name of the directory directly containing `path`.
///
/// # Errors
///
/// Fails if there is no parent or its name is not UTF-8.
pub fn category_of(path: &Path) -> Result<&str, TransformError> {
    let Some(category) = path.parent().and_then(Path::file_name) else {
        return Err(TransformError::MissingCategory {
            path: display(path),
        });
    };
    category.to_str().ok_or_else(|| TransformError::NonUtf8Name {
        path: display(path),
    })
}

fn on_stem<F>(change: &FilenameChange, rewrite: F) -> Result<FilenameChange, TransformError>
where
    F: FnOnce(&str) -> Result<String, TransformError>,
{
    let current = change.current_path();
    if current.file_name().is_none() {
        return Err(TransformError::NoFileName {
            path: display(current),
        });
    }
    let non_utf8 = || TransformError::NonUtf8Name {
        path: display(current),
    };
    let stem = stem_of(current).ok_or_else(non_utf8)?;
    let extension = current
        .extension()
        .map(|ext| ext.to_str().ok_or_else(non_utf8))
        .transpose()?;

    let new_stem = rewrite(stem)?;
    let file_name = match extension {
        Some(ext) => format!("{new_stem}.{ext}"),
        None => new_stem,
    };
    let new_path = match current.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    };
    Ok(change.with_new_path(new_path))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
