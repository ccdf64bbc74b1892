//! dirsort - sort the files of a directory into subdirectories by extension
//!
//! This library resolves an extension-to-folder mapping (built in, or read from
//! a JSON or TOML rules file) and moves every matching file under a directory
//! into its mapped folder, optionally as a dry run.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use config::{ConfigError, ConfigFormat, RulesConfig};
pub use file_category::{Category, Mapping};
pub use file_organizer::{FileOrganizer, MoveAction, OrganizeError, OrganizeOptions, RunSummary};

pub use cli::{AppError, Cli, RunOutcome, run_cli};
