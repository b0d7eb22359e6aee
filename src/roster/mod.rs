//! The roster of known people and name matching against it.

mod directory;
mod entry;
mod loader;

pub use directory::{AmbiguityPolicy, Candidate, Lookup, MatchDiagnostic, NameDirectory};
pub use entry::{
    NameEntry, DISPLAY_FORMAT, FIRST_NAME_POINTS, LAST_NAME_POINTS, MIDDLE_NAME_POINTS,
};
pub use loader::{load_roster, parse_roster, RosterError};
