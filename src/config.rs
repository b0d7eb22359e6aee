//! Run configuration.
//!
//! Values are resolved from, highest priority first: command-line flags,
//! `ROSTERMATCH_*` environment variables, a YAML config file, and defaults.
//!
//! ```yaml
//! roster_path: ./names.csv
//! input_root: ./input
//! output_root: ./output
//! ambiguity: suppress
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::context::ServiceContext;
use crate::roster::AmbiguityPolicy;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "rostermatch.yaml";
/// Roster path used when nothing else is configured.
pub const DEFAULT_ROSTER_PATH: &str = "./names.csv";
/// Input root used when nothing else is configured.
pub const DEFAULT_INPUT_ROOT: &str = "./input";
/// Output root used when nothing else is configured.
pub const DEFAULT_OUTPUT_ROOT: &str = "./output";

/// Environment variable overriding the roster path.
pub const ENV_ROSTER: &str = "ROSTERMATCH_ROSTER";
/// Environment variable overriding the input root.
pub const ENV_INPUT: &str = "ROSTERMATCH_INPUT";
/// Environment variable overriding the output root.
pub const ENV_OUTPUT: &str = "ROSTERMATCH_OUTPUT";
/// Environment variable overriding the ambiguity policy.
pub const ENV_AMBIGUITY: &str = "ROSTERMATCH_AMBIGUITY";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    Read {
        /// Config file path.
        path: String,
        /// Underlying error message.
        reason: String,
    },

    /// The config file is not valid YAML for [`ConfigFile`].
    #[error("Failed to parse config file {path}: {reason}")]
    Parse {
        /// Config file path.
        path: String,
        /// Underlying error message.
        reason: String,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Roster CSV file.
    pub roster_path: PathBuf,
    /// Directory holding one subdirectory per category.
    pub input_root: PathBuf,
    /// Directory the plan relocates files into.
    pub output_root: PathBuf,
    /// How ambiguous lookups are resolved.
    pub ambiguity: AmbiguityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

/// Settings that may be left unset at one layer and filled by a lower one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Roster CSV file.
    pub roster_path: Option<PathBuf>,
    /// Input root.
    pub input_root: Option<PathBuf>,
    /// Output root.
    pub output_root: Option<PathBuf>,
    /// Ambiguity policy.
    pub ambiguity: Option<AmbiguityPolicy>,
}

impl ConfigFile {
    /// Parses YAML config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or has unknown keys.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Fills every unset field from `lower`.
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            roster_path: self.roster_path.or(lower.roster_path),
            input_root: self.input_root.or(lower.input_root),
            output_root: self.output_root.or(lower.output_root),
            ambiguity: self.ambiguity.or(lower.ambiguity),
        }
    }

    /// Reads the layer held in `ROSTERMATCH_*` variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ambiguity variable is not a known policy.
    pub fn from_env<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ambiguity = lookup(ENV_AMBIGUITY).map(policy_from_env).transpose()?;
        Ok(Self {
            roster_path: lookup(ENV_ROSTER).map(PathBuf::from),
            input_root: lookup(ENV_INPUT).map(PathBuf::from),
            output_root: lookup(ENV_OUTPUT).map(PathBuf::from),
            ambiguity,
        })
    }

    /// Applies defaults to every unset field.
    #[must_use]
    pub fn finish(self) -> Config {
        let defaults = Config::default();
        Config {
            roster_path: self.roster_path.unwrap_or(defaults.roster_path),
            input_root: self.input_root.unwrap_or(defaults.input_root),
            output_root: self.output_root.unwrap_or(defaults.output_root),
            ambiguity: self.ambiguity.unwrap_or(defaults.ambiguity),
        }
    }
}

/// Resolves the run configuration.
///
/// `flags` holds command-line values. `config_path` is the `--config`
/// argument; without it [`DEFAULT_CONFIG_FILE`] is read if present. `env`
/// looks up environment variables.
///
/// # Errors
///
/// Returns an error if an explicit config file is missing, any config file
/// is invalid, or an environment value is rejected.
pub fn resolve<F>(
    ctx: &ServiceContext,
    flags: ConfigFile,
    config_path: Option<&Path>,
    env: F,
) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let file_layer = if let Some(path) = config_path {
        read_config_file(ctx, path)?
    } else if ctx.fs.exists(default_path) {
        read_config_file(ctx, default_path)?
    } else {
        ConfigFile::default()
    };

    let config = flags.or(ConfigFile::from_env(env)?).or(file_layer).finish();
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn read_config_file(ctx: &ServiceContext, path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = ctx.fs.read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    ConfigFile::parse(&contents, path)
}

fn policy_from_env(value: String) -> Result<AmbiguityPolicy, ConfigError> {
    AmbiguityPolicy::from_str(&value, true).map_err(|_| ConfigError::InvalidEnv {
        var: ENV_AMBIGUITY,
        value,
    })
}
