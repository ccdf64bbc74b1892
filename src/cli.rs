//! Command-line interface module for dirsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument definitions
//! - Logging setup
//! - Orchestration of rules loading and organization

use crate::config::{ConfigError, ConfigFormat, RulesConfig};
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeOptions, RunSummary};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Sort the files of a directory into subdirectories by extension.
#[derive(Debug, Clone, Parser)]
#[command(name = "dirsort", version, about, disable_version_flag = true)]
pub struct Cli {
    /// Path to a rules file (JSON, or TOML when it ends in .toml); built-in rules when unset
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to organize
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Print the built-in rules in the rules file format and exit
    #[arg(long)]
    pub print_default: bool,

    /// Format used by --print-default
    #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
    pub format: ConfigFormat,

    /// Recurse into subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Show what would be moved without moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    fn options(&self) -> OrganizeOptions {
        OrganizeOptions {
            recursive: self.recursive,
            dry_run: self.dry_run,
        }
    }
}

/// A fatal error that ends the run.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Organize(OrganizeError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Error loading config: {}", e),
            AppError::Organize(e) => write!(f, "Error organizing files: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Organize(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<OrganizeError> for AppError {
    fn from(e: OrganizeError) -> Self {
        AppError::Organize(e)
    }
}

/// Result of a completed invocation.
#[derive(Debug)]
pub enum RunOutcome {
    /// The default rules were printed; no directory was touched.
    PrintedDefault,
    /// The directory was organized (or simulated).
    Organized(RunSummary),
}

/// Runs the CLI application with parsed arguments.
///
/// `--print-default` short-circuits before any rules file is read or any
/// directory is walked. Otherwise the rules are resolved first, so a bad
/// `--config` fails before traversal begins.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use dirsort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["dirsort", "--dir", "/path/to/directory", "--dry-run"]);
/// match run_cli(&cli) {
///     Ok(_) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunOutcome, AppError> {
    if cli.print_default {
        let rendered = RulesConfig::render_default(cli.format)?;
        println!("{}", rendered);
        return Ok(RunOutcome::PrintedDefault);
    }

    let mapping = RulesConfig::load(cli.config.as_deref())?;
    tracing::debug!(
        dir = %cli.dir.display(),
        rules = mapping.len(),
        recursive = cli.recursive,
        dry_run = cli.dry_run,
        "starting run"
    );

    let summary = FileOrganizer::organize(&cli.dir, &mapping, cli.options())?;
    Ok(RunOutcome::Organized(summary))
}

/// Installs the stderr log subscriber.
///
/// Defaults to warnings only; `RUST_LOG` overrides the filter.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dirsort"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(!cli.recursive);
        assert!(!cli.dry_run);
        assert!(!cli.print_default);
        assert_eq!(cli.format, ConfigFormat::Json);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "dirsort",
            "--config",
            "rules.json",
            "--dir",
            "/tmp/inbox",
            "-r",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("rules.json")));
        assert_eq!(cli.dir, PathBuf::from("/tmp/inbox"));
        assert!(cli.recursive);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_short_v_is_version() {
        let err = Cli::try_parse_from(["dirsort", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["dirsort", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_missing_config_fails_before_traversal() {
        let cli = Cli::try_parse_from([
            "dirsort",
            "--config",
            "/non/existent/rules.json",
            "--dir",
            "/non/existent/dir",
        ])
        .unwrap();

        let result = run_cli(&cli);
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::ConfigNotFound { .. }))
        ));
    }

    #[test]
    fn test_print_default_skips_traversal() {
        let cli =
            Cli::try_parse_from(["dirsort", "--print-default", "--dir", "/non/existent/dir"])
                .unwrap();

        let result = run_cli(&cli);
        assert!(matches!(result, Ok(RunOutcome::PrintedDefault)));
    }
}
