//! Parsing roster CSV into a [`NameDirectory`].
//!
//! Rows are `last, first[, middle]` with no header. Fields are trimmed and a
//! blank middle is treated as absent. Blank lines and `#` comments are skipped.

use std::path::Path;

use thiserror::Error;

use super::directory::NameDirectory;
use super::entry::NameEntry;
use crate::context::ServiceContext;

/// Characters that would break a filename built from a roster field.
const FORBIDDEN_CHARS: [char; 3] = ['/', '\\', '\0'];

/// Errors raised while loading the roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster file could not be read.
    #[error("Failed to read roster {path}: {reason}")]
    Read {
        /// Roster path.
        path: String,
        /// Underlying error message.
        reason: String,
    },

    /// The CSV reader rejected the input.
    #[error("Malformed roster CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row is missing its last or first name.
    #[error("Roster line {line}: missing {field} name")]
    MissingField {
        /// 1-based line number of the row.
        line: u64,
        /// Which field was empty.
        field: &'static str,
    },

    /// A row has more than three columns.
    #[error("Roster line {line}: expected at most 3 columns (last, first, middle), found {found}")]
    TooManyColumns {
        /// 1-based line number of the row.
        line: u64,
        /// Number of columns found.
        found: usize,
    },

    /// A field contains a path separator or NUL.
    #[error("Roster line {line}: {field} name {value:?} contains a path separator")]
    InvalidCharacter {
        /// 1-based line number of the row.
        line: u64,
        /// Which field was rejected.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Reads and parses the roster at `path` through `ctx.fs`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any row is malformed.
pub fn load_roster(ctx: &ServiceContext, path: &Path) -> Result<NameDirectory, RosterError> {
    let contents = ctx.fs.read_to_string(path).map_err(|e| RosterError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let directory = parse_roster(&contents)?;
    tracing::info!(path = %path.display(), names = directory.len(), "loaded roster");
    Ok(directory)
}

/// Parses roster CSV text. The first malformed row aborts parsing.
///
/// # Errors
///
/// Returns an error identifying the first malformed row.
pub fn parse_roster(contents: &str) -> Result<NameDirectory, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(contents.as_bytes());

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.iter().all(str::is_empty) {
            continue;
        }
        entries.push(parse_row(&record, line)?);
    }
    Ok(NameDirectory::new(entries))
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<NameEntry, RosterError> {
    if record.len() > 3 {
        return Err(RosterError::TooManyColumns {
            line,
            found: record.len(),
        });
    }

    let last = required_field(record, 0, "last", line)?;
    let first = required_field(record, 1, "first", line)?;
    let middle = match record.get(2) {
        Some(middle) if !middle.is_empty() => Some(checked(middle, "middle", line)?.to_string()),
        _ => None,
    };

    Ok(NameEntry::new(last, first, middle))
}

fn required_field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    field: &'static str,
    line: u64,
) -> Result<&'r str, RosterError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => checked(value, field, line),
        _ => Err(RosterError::MissingField { line, field }),
    }
}

fn checked<'v>(value: &'v str, field: &'static str, line: u64) -> Result<&'v str, RosterError> {
    if value.contains(FORBIDDEN_CHARS) {
        return Err(RosterError::InvalidCharacter {
            line,
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MemFs};

    #[test]
    fn parses_rows_with_and_without_middle() {
        let csv = "Smith, John\nGarcia , Maria , Elena\nNguyen,Bao,\n";
        let directory = parse_roster(csv).unwrap();
        let tokens: Vec<String> = directory
            .entries()
            .iter()
            .map(NameEntry::file_token)
            .collect();
        assert_eq!(tokens, ["Smith_John", "Garcia_Maria_Elena", "Nguyen_Bao"]);
        assert_eq!(directory.entries()[2].middle(), None);
    }

    #[test]
    fn keeps_duplicate_rows() {
        let directory = parse_roster("Smith,John\nSmith,John\n").unwrap();
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let csv = "# last,first,middle\n\nSmith,John\n , , \n";
        let directory = parse_roster(csv).unwrap();
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn missing_first_name_names_the_line() {
        let err = parse_roster("Smith,John\nGarcia\n").unwrap_err();
        assert!(matches!(err, RosterError::MissingField { line: 2, .. }));
        assert_eq!(err.to_string(), "Roster line 2: missing first name");
    }

    #[test]
    fn blank_last_name_is_rejected() {
        let err = parse_roster(" ,John\n").unwrap_err();
        assert_eq!(err.to_string(), "Roster line 1: missing last name");
    }

    #[test]
    fn rejects_extra_columns() {
        let err = parse_roster("Smith,John,Paul,Jr\n").unwrap_err();
        assert!(matches!(err, RosterError::TooManyColumns { line: 1, found: 4 }));
    }

    #[test]
    fn rejects_path_separators() {
        let err = parse_roster("Smith/Jones,John\n").unwrap_err();
        assert!(matches!(err, RosterError::InvalidCharacter { field: "last", .. }));
    }

    #[test]
    fn load_roster_reads_through_fs_port() {
        let fs = MemFs::new().with_file("/work/names.csv", "Smith,John\n");
        let ctx = test_context(fs);
        let directory = load_roster(&ctx, Path::new("/work/names.csv")).unwrap();
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn load_roster_missing_file_is_read_error() {
        let ctx = test_context(MemFs::new());
        let err = load_roster(&ctx, Path::new("/work/names.csv")).unwrap_err();
        assert!(matches!(err, RosterError::Read { .. }));
        assert!(err.to_string().contains("/work/names.csv"));
    }
}
