//! Output formatting and styling module.
//!
//! All user-facing lines go through [`OutputFormatter`]: one line per move on
//! stdout, the closing message on stdout, and fatal errors on stderr.

use colored::*;
use std::path::Path;

/// Formats CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an executed move.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// use std::path::Path;
    /// OutputFormatter::moved(Path::new("a.png"), Path::new("images/a.png"));
    /// ```
    pub fn moved(source: &Path, destination: &Path) {
        println!("{}", Self::moved_line(source, destination));
    }

    /// Prints a move that a dry run would perform.
    pub fn would_move(source: &Path, destination: &Path) {
        println!("{}", Self::would_move_line(source, destination).yellow());
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    fn moved_line(source: &Path, destination: &Path) -> String {
        format!(
            "{} {} to {}",
            "Moved".green(),
            source.display(),
            destination.display()
        )
    }

    fn would_move_line(source: &Path, destination: &Path) -> String {
        format!(
            "[DRY RUN] Would move {} to {}",
            source.display(),
            destination.display()
        )
    }
}
