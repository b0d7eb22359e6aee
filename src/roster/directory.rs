//! Resolving free text to a roster entry.

use std::cmp::Reverse;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::entry::NameEntry;

/// Entries must score above this to be considered a candidate.
const MIN_CANDIDATE_SCORE: u32 = 1;

/// How a lookup treats more than one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Any second candidate suppresses the match.
    #[default]
    Suppress,
    /// Resolve to the top candidate when it strictly outscores the runner-up.
    Dominant,
}

/// A roster entry considered for a lookup, with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// The entry's display form.
    pub name: String,
    /// Score the entry earned against the queried text.
    pub score: u32,
}

/// Events raised while resolving text against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchDiagnostic {
    /// More than one entry scored as a candidate for `text`.
    Ambiguous {
        /// The queried text.
        text: String,
        /// Candidates, highest score first.
        candidates: Vec<Candidate>,
        /// Whether the lookup still resolved to the top candidate.
        resolved: bool,
    },
}

/// Outcome of [`NameDirectory::find_best_match`].
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    /// The matched entry, if exactly one could be chosen.
    pub entry: Option<&'a NameEntry>,
    /// Diagnostics raised during the lookup.
    pub diagnostics: Vec<MatchDiagnostic>,
}

/// The set of known people, built once from the roster.
///
/// Entries are kept in roster order and are never deduplicated.
#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    entries: Vec<NameEntry>,
    policy: AmbiguityPolicy,
}

impl NameDirectory {
    /// Creates a directory using the default [`AmbiguityPolicy::Suppress`].
    #[must_use]
    pub fn new(entries: Vec<NameEntry>) -> Self {
        Self {
            entries,
            policy: AmbiguityPolicy::default(),
        }
    }

    /// Replaces the ambiguity policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Entries in roster order.
    #[must_use]
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the roster had no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active ambiguity policy.
    #[must_use]
    pub fn policy(&self) -> AmbiguityPolicy {
        self.policy
    }

    /// Resolves `text` to at most one entry.
    ///
    /// Every entry scoring above 1 is a candidate. A single candidate is the
    /// match. Several candidates raise [`MatchDiagnostic::Ambiguous`]; under
    /// [`AmbiguityPolicy::Suppress`] no match is returned, under
    /// [`AmbiguityPolicy::Dominant`] the top candidate wins if nobody ties it.
    #[must_use]
    pub fn find_best_match(&self, text: &str) -> Lookup<'_> {
        let mut scored: Vec<(&NameEntry, u32)> = self
            .entries
            .iter()
            .map(|entry| (entry, entry.match_score(text)))
            .filter(|(_, score)| *score > MIN_CANDIDATE_SCORE)
            .collect();
        // Stable, so equal scores keep roster order.
        scored.sort_by_key(|&(_, score)| Reverse(score));

        let (entry, diagnostics) = match scored.as_slice() {
            [] => (None, Vec::new()),
            [(entry, _)] => (Some(*entry), Vec::new()),
            [(top, top_score), (_, runner_up), ..] => {
                let entry = match self.policy {
                    AmbiguityPolicy::Dominant if top_score > runner_up => Some(*top),
                    _ => None,
                };
                let candidates = scored
                    .iter()
                    .map(|(entry, score)| Candidate {
                        name: entry.display_form(),
                        score: *score,
                    })
                    .collect();
                let ambiguous = MatchDiagnostic::Ambiguous {
                    text: text.to_string(),
                    candidates,
                    resolved: entry.is_some(),
                };
                (entry, vec![ambiguous])
            }
        };
        Lookup { entry, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(last: &str, first: &str, middle: Option<&str>) -> NameEntry {
        NameEntry::new(last, first, middle.map(String::from))
    }

    fn directory() -> NameDirectory {
        NameDirectory::new(vec![
            entry("Smith", "John", None),
            entry("Garcia", "Maria", Some("Elena")),
            entry("Nguyen", "Bao", None),
        ])
    }

    fn twin_smiths() -> NameDirectory {
        NameDirectory::new(vec![entry("Smith", "John", None), entry("Smith", "John", None)])
    }

    fn resolved_flags(lookup: &Lookup<'_>) -> Vec<bool> {
        lookup
            .diagnostics
            .iter()
            .map(|MatchDiagnostic::Ambiguous { resolved, .. }| *resolved)
            .collect()
    }

    #[test]
    fn single_candidate_matches() {
        let dir = directory();
        let lookup = dir.find_best_match("Smith_report");
        let token = lookup.entry.map(NameEntry::file_token);
        assert_eq!(token.as_deref(), Some("Smith_John"));
        assert!(lookup.diagnostics.is_empty());
    }

    #[test]
    fn no_candidate_returns_none_quietly() {
        let dir = directory();
        let lookup = dir.find_best_match("invoice_2024");
        assert!(lookup.entry.is_none());
        assert!(lookup.diagnostics.is_empty());
    }

    #[test]
    fn two_candidates_suppress_match_and_report_both() {
        let dir = directory();
        let lookup = dir.find_best_match("Smith_Garcia_Maria");
        assert!(lookup.entry.is_none());
        assert_eq!(
            lookup.diagnostics,
            vec![MatchDiagnostic::Ambiguous {
                text: "Smith_Garcia_Maria".to_string(),
                candidates: vec![
                    Candidate {
                        name: "Garcia, Maria Elena".to_string(),
                        score: 18,
                    },
                    Candidate {
                        name: "Smith, John ".to_string(),
                        score: 10,
                    },
                ],
                resolved: false,
            }]
        );
    }

    #[test]
    fn duplicate_rows_are_ambiguous() {
        let dir = twin_smiths();
        let lookup = dir.find_best_match("Smith_John_labs");
        assert!(lookup.entry.is_none());
        assert_eq!(lookup.diagnostics.len(), 1);
    }

    #[test]
    fn dominant_policy_resolves_strict_winner() {
        let dir = directory().with_policy(AmbiguityPolicy::Dominant);
        let lookup = dir.find_best_match("Smith_Garcia_Maria");
        assert_eq!(lookup.entry.map(NameEntry::last), Some("Garcia"));
        assert_eq!(resolved_flags(&lookup), [true]);
    }

    #[test]
    fn dominant_policy_still_suppresses_ties() {
        let dir = twin_smiths().with_policy(AmbiguityPolicy::Dominant);
        let lookup = dir.find_best_match("Smith_John");
        assert!(lookup.entry.is_none());
        assert_eq!(resolved_flags(&lookup), [false]);
    }

    #[test]
    fn ties_keep_roster_order_in_diagnostics() {
        let dir = NameDirectory::new(vec![entry("Lee", "Ann", None), entry("Park", "Ann", None)]);
        let lookup = dir.find_best_match("Ann_scan");
        let MatchDiagnostic::Ambiguous { candidates, .. } = &lookup.diagnostics[0];
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Lee, Ann ", "Park, Ann "]);
    }
}
