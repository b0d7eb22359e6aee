//! A single roster row.

use std::fmt;

use serde::Serialize;

/// Header line describing the layout of [`NameEntry::display_form`].
pub const DISPLAY_FORMAT: &str = "Last, First Middle";

/// Points awarded when the text contains the full last name.
pub const LAST_NAME_POINTS: u32 = 10;
/// Points awarded when the text contains the full first name.
pub const FIRST_NAME_POINTS: u32 = 8;
/// Points awarded when the text contains a middle name longer than one character.
pub const MIDDLE_NAME_POINTS: u32 = 5;

/// A known person's name.
///
/// `last` and `first` are never empty. `middle` is `None` when the roster
/// left it blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameEntry {
    last: String,
    first: String,
    middle: Option<String>,
}

impl NameEntry {
    /// Creates an entry. Callers are expected to have validated the parts;
    /// the roster loader does so.
    #[must_use]
    pub fn new(last: impl Into<String>, first: impl Into<String>, middle: Option<String>) -> Self {
        Self {
            last: last.into(),
            first: first.into(),
            middle,
        }
    }

    /// Last name.
    #[must_use]
    pub fn last(&self) -> &str {
        &self.last
    }

    /// First name.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Middle name, if the roster supplied one.
    #[must_use]
    pub fn middle(&self) -> Option<&str> {
        self.middle.as_deref()
    }

    /// `"Last, First Middle"`, keeping the trailing blank when there is no middle name.
    #[must_use]
    pub fn display_form(&self) -> String {
        let middle = self.middle.as_deref().unwrap_or_default();
        format!("{}, {} {middle}", self.last, self.first)
    }

    /// Normalized filename stem for this person.
    #[must_use]
    pub fn file_token(&self) -> String {
        match self.middle.as_deref() {
            Some(middle) if !middle.is_empty() => {
                format!("{}_{}_{middle}", self.last, self.first)
            }
            _ => format!("{}_{}", self.last, self.first),
        }
    }

    /// Scores how strongly `text` refers to this person.
    ///
    /// Each name part found verbatim in `text` contributes its points; the
    /// search is case-sensitive. Single-letter middle names never count.
    #[must_use]
    pub fn match_score(&self, text: &str) -> u32 {
        let mut score = 0;
        if text.contains(self.last.as_str()) {
            score += LAST_NAME_POINTS;
        }
        if text.contains(self.first.as_str()) {
            score += FIRST_NAME_POINTS;
        }
        if let Some(middle) = self.middle.as_deref() {
            if middle.chars().count() > 1 && text.contains(middle) {
                score += MIDDLE_NAME_POINTS;
            }
        }
        score
    }
}

impl fmt::Display for NameEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_form())
    }
}
