//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigFile;
use crate::report::OutputFormat;
use crate::roster::AmbiguityPolicy;

/// Top-level CLI parser for `rostermatch`.
#[derive(Debug, Parser)]
#[command(
    name = "rostermatch",
    version,
    about = "Match scanned files to roster names and plan their renames"
)]
pub struct Cli {
    /// YAML config file. Defaults to ./rostermatch.yaml when it exists.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute and print the rename plan. No files are moved.
    Plan(PlanArgs),
    /// Load the roster and print the parsed names.
    CheckRoster {
        /// Roster CSV file.
        #[arg(long, value_name = "PATH")]
        roster: Option<PathBuf>,
    },
}

/// Flags accepted by `plan`.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Roster CSV file (last, first, middle).
    #[arg(long, value_name = "PATH")]
    pub roster: Option<PathBuf>,
    /// Directory holding one subdirectory per category.
    #[arg(long, value_name = "DIR")]
    pub input: Option<PathBuf>,
    /// Directory the renamed files would be placed in.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    /// How to treat text that matches more than one name.
    #[arg(long, value_enum)]
    pub ambiguity: Option<AmbiguityPolicy>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PlanArgs {
    /// Converts the flags into the highest-priority configuration layer.
    #[must_use]
    pub fn into_layer(self) -> ConfigFile {
        ConfigFile {
            roster_path: self.roster,
            input_root: self.input,
            output_root: self.output,
            ambiguity: self.ambiguity,
        }
    }
}
