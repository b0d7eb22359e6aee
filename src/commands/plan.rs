//! `rostermatch plan` command.

use std::path::Path;

use crate::config::{self, ConfigFile};
use crate::context::ServiceContext;
use crate::plan::build_plan;
use crate::report::{self, OutputFormat};

/// Execute the `plan` command.
///
/// Resolves configuration, builds the plan and renders it. The only
/// filesystem change is creating the output root if it is missing.
///
/// # Errors
///
/// Returns an error string if configuration, planning or rendering fails.
pub fn run_with_context<F>(
    ctx: &ServiceContext,
    flags: ConfigFile,
    config_path: Option<&Path>,
    env: F,
    format: OutputFormat,
) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    let config = config::resolve(ctx, flags, config_path, env)
        .map_err(|e| e.to_string())?;
    let plan = build_plan(ctx, &config).map_err(|e| e.to_string())?;
    report::render(&plan, format)
        .map_err(|e| format!("Failed to render plan: {e}"))
}
