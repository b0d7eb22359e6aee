//! `rostermatch check-roster` command.

use std::path::{Path, PathBuf};

use crate::config::{self, ConfigFile};
use crate::context::ServiceContext;
use crate::report::format_roster;
use crate::roster::load_roster;

/// Execute the `check-roster` command.
///
/// Loads the configured roster and lists the parsed names for verification.
///
/// # Errors
///
/// Returns an error string if configuration or roster loading fails.
pub fn run_with_context<F>(
    ctx: &ServiceContext,
    roster: Option<PathBuf>,
    config_path: Option<&Path>,
    env: F,
) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    let flags = ConfigFile {
        roster_path: roster,
        ..ConfigFile::default()
    };
    let config = config::resolve(ctx, flags, config_path, env)
        .map_err(|e| e.to_string())?;
    let directory = load_roster(ctx, &config.roster_path)
        .map_err(|e| e.to_string())?;
    Ok(format_roster(directory.entries()))
}
