//! Command-line interface for atlas-ops
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Resolution of the connection URI from the environment

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::{Config, LogLevel};
use crate::error::{ConfigError, Result};
use crate::executor::Operation;

/// Environment variable supplying the connection string.
pub const URI_ENV_VAR: &str = "MONGODB_URI";

/// One-shot CRUD operations against the MongoDB Atlas sample datasets
#[derive(Parser, Debug)]
#[command(
    name = "atlas-ops",
    version,
    about = "Run one hardcoded CRUD operation against the Atlas sample datasets",
    long_about = "Connects to the MongoDB deployment named by MONGODB_URI, runs exactly one
of six hardcoded CRUD operations selected by the positional argument, prints
the result, and exits.

  1  fetch one movie by title
  2  list zip records with population <= 50
  3  increment a city's population and re-read it
  4  distinct movie titles for one director
  5  insert a city record with a random population
  6  reset one record's population by id"
)]
pub struct CliArgs {
    /// Operation to run (1-6)
    #[arg(value_name = "OPERATION")]
    pub operation: String,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format (json, json-pretty, compact)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already-parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args)?;

        Ok(config)
    }

    /// Apply CLI arguments on top of the loaded configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(ref format) = args.format {
            config.display.format = format.parse()?;
        }

        if args.no_color {
            config.display.color_output = false;
        }

        if let Some(timeout) = args.timeout {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "timeout".to_string(),
                    value: "0".to_string(),
                }
                .into());
            }
            config.connection.timeout = timeout;
        }

        if args.quiet {
            config.logging.level = LogLevel::Error;
        }

        Ok(())
    }

    /// Parse the positional operation token.
    ///
    /// Validated before any connection is attempted, so a bad argument
    /// never causes network traffic or a database mutation.
    pub fn operation(&self) -> Result<Operation> {
        Operation::from_arg(&self.args.operation)
    }

    /// Resolve the connection URI from the environment.
    pub fn resolve_uri(&self) -> Result<String> {
        uri_from_env(std::env::var(URI_ENV_VAR).ok())
    }

    /// Get the parsed arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Get the effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the config file path, if one was given
    pub fn config_path(&self) -> Option<&Path> {
        self.args.config_file.as_deref()
    }
}

/// Map an optional environment value to a URI or a fatal config error.
///
/// Empty values count as unset, so `MONGODB_URI=` in a stale `.env`
/// file fails the same way as a missing variable.
pub fn uri_from_env(value: Option<String>) -> Result<String> {
    match value {
        Some(uri) if !uri.is_empty() => Ok(uri),
        _ => Err(ConfigError::MissingEnv(URI_ENV_VAR.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_operation_argument() {
        let cli = CliInterface::from_args(parse(&["atlas-ops", "5"])).unwrap();
        assert_eq!(cli.operation().unwrap(), Operation::InsertCity);
    }

    #[test]
    fn test_invalid_operation_argument() {
        let cli = CliInterface::from_args(parse(&["atlas-ops", "9"])).unwrap();
        assert!(cli.operation().is_err());
    }

    #[test]
    fn test_missing_operation_is_a_parse_error() {
        assert!(CliArgs::try_parse_from(["atlas-ops"]).is_err());
    }

    #[test]
    fn test_format_override() {
        let cli =
            CliInterface::from_args(parse(&["atlas-ops", "1", "--format", "compact"])).unwrap();
        assert_eq!(cli.config().display.format, OutputFormat::Compact);
    }

    #[test]
    fn test_bad_format_is_fatal() {
        let result = CliInterface::from_args(parse(&["atlas-ops", "1", "--format", "xml"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_no_color_flag() {
        let cli = CliInterface::from_args(parse(&["atlas-ops", "1", "--no-color"])).unwrap();
        assert!(!cli.config().display.color_output);
    }

    #[test]
    fn test_timeout_override() {
        let cli = CliInterface::from_args(parse(&["atlas-ops", "2", "--timeout", "3"])).unwrap();
        assert_eq!(cli.config().connection.timeout, 3);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = CliInterface::from_args(parse(&["atlas-ops", "2", "--timeout", "0"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_drops_log_level() {
        let cli = CliInterface::from_args(parse(&["atlas-ops", "1", "-q"])).unwrap();
        assert_eq!(cli.config().logging.level, LogLevel::Error);
    }

    #[test]
    fn test_uri_from_env_missing() {
        assert!(uri_from_env(None).is_err());
        assert!(uri_from_env(Some(String::new())).is_err());
    }

    #[test]
    fn test_uri_from_env_present() {
        let uri = uri_from_env(Some("mongodb://localhost:27017".to_string())).unwrap();
        assert_eq!(uri, "mongodb://localhost:27017");
    }
}
