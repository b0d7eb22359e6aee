//! Command dispatch and handlers.

pub mod check_roster;
pub mod plan;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), String> {
    let ctx = ServiceContext::live();
    let output = dispatch_with_context(cli, &ctx)?;
    println!("{output}");
    Ok(())
}

/// Dispatch a command with the given service context, returning its output.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(cli: Cli, ctx: &ServiceContext) -> Result<String, String> {
    let env = |var: &str| std::env::var(var).ok();
    let config = cli.config.as_deref();
    match cli.command {
        Command::Plan(args) => {
            let format = args.format;
            plan::run_with_context(ctx, args.into_layer(), config, env, format)
        }
        Command::CheckRoster { roster } => check_roster::run_with_context(ctx, roster, config, env),
    }
}
