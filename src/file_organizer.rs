//! File organization system for moving files into their mapped directories.
//!
//! A run first takes a snapshot of every file in scope, then walks that list
//! and moves (or, in a dry run, reports) each file whose extension is mapped.
//! Folders created by earlier moves are therefore never scanned as new input.

use crate::file_category::Mapping;
use crate::output::OutputFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single file relocation: where the file is and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAction {
    /// The current path of the file.
    pub source: PathBuf,
    /// The path the file is moved to.
    pub destination: PathBuf,
}

/// Options controlling one organization run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    /// Descend into subdirectories of the root.
    pub recursive: bool,
    /// Report moves without touching the filesystem.
    pub dry_run: bool,
}

/// Outcome of an organization run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Whether the run was a dry run.
    pub dry_run: bool,
    /// Every move that was executed, or would have been in a dry run.
    pub actions: Vec<MoveAction>,
}

impl RunSummary {
    /// Number of files moved, or that would be moved in a dry run.
    pub fn count(&self) -> usize {
        self.actions.len()
    }

    /// The closing line for a run that acted on nothing.
    pub fn empty_message(&self) -> &'static str {
        if self.dry_run {
            "No files to move"
        } else {
            "No files moved"
        }
    }
}

/// Errors that can occur during file organization operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// The directory walk could not continue.
    TraversalError { path: PathBuf, reason: String },
    /// Failed to create a destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    MoveError {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TraversalError { path, reason } => {
                write!(f, "Failed to read {}: {}", path.display(), reason)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::MoveError {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files under a root directory into their mapped subdirectories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Organizes every mapped file under `root`.
    ///
    /// Each executed move is printed as it happens, so a failure part-way
    /// leaves the earlier lines on screen. The first error aborts the run.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_category::Mapping;
    /// use dirsort::file_organizer::{FileOrganizer, OrganizeOptions};
    /// use std::path::Path;
    ///
    /// let options = OrganizeOptions { recursive: false, dry_run: true };
    /// let summary = FileOrganizer::organize(Path::new("."), &Mapping::default(), options)?;
    /// println!("{} file(s) would move", summary.count());
    /// # Ok::<(), dirsort::file_organizer::OrganizeError>(())
    /// ```
    pub fn organize(
        root: &Path,
        mapping: &Mapping,
        options: OrganizeOptions,
    ) -> OrganizeResult<RunSummary> {
        let plan = Self::plan(root, mapping, options.recursive)?;
        tracing::debug!(
            root = %root.display(),
            candidates = plan.len(),
            dry_run = options.dry_run,
            "planned moves"
        );

        let mut summary = RunSummary {
            dry_run: options.dry_run,
            actions: Vec::with_capacity(plan.len()),
        };

        for action in plan {
            if options.dry_run {
                OutputFormatter::would_move(&action.source, &action.destination);
            } else {
                Self::execute(&action)?;
                OutputFormatter::moved(&action.source, &action.destination);
            }
            summary.actions.push(action);
        }

        if summary.actions.is_empty() {
            OutputFormatter::plain(summary.empty_message());
        }

        Ok(summary)
    }

    /// Snapshots the files in scope and computes their moves.
    ///
    /// Nothing on disk is changed. Files with unmapped extensions and files
    /// already sitting at their destination are left out.
    pub fn plan(
        root: &Path,
        mapping: &Mapping,
        recursive: bool,
    ) -> OrganizeResult<Vec<MoveAction>> {
        // A file root would otherwise be filtered out by min_depth and look empty.
        if root.exists() && !root.is_dir() {
            return Err(OrganizeError::TraversalError {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| OrganizeError::TraversalError {
                path: e.path().unwrap_or(root).to_path_buf(),
                reason: e.to_string(),
            })?;
            let file_type = entry.file_type();
            if file_type.is_file() {
                files.push(entry.into_path());
            } else if file_type.is_symlink() {
                tracing::debug!(file = %entry.path().display(), "symlink, skipping");
            }
        }

        let mut plan = Vec::new();
        for source in files {
            let Some(dest_dir) = mapping.destination_for(&source) else {
                tracing::debug!(file = %source.display(), "no rule for extension, skipping");
                continue;
            };
            let Some(file_name) = source.file_name() else {
                continue;
            };

            let destination = root.join(dest_dir).join(file_name);
            if destination == source {
                tracing::debug!(file = %source.display(), "already in place, skipping");
                continue;
            }

            plan.push(MoveAction {
                source,
                destination,
            });
        }

        Ok(plan)
    }

    /// Creates the destination directory if needed and renames the file.
    pub fn execute(action: &MoveAction) -> OrganizeResult<()> {
        if let Some(dest_dir) = action.destination.parent() {
            fs::create_dir_all(dest_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: dest_dir.to_path_buf(),
                source: e,
            })?;
        }

        fs::rename(&action.source, &action.destination).map_err(|e| OrganizeError::MoveError {
            source: action.source.clone(),
            destination: action.destination.clone(),
            source_error: e,
        })?;

        tracing::info!(
            src = %action.source.display(),
            dest = %action.destination.display(),
            "moved file"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, "test content").expect("Failed to write test file");
    }

    #[test]
    fn test_execute_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("test.txt");
        touch(&file_path);

        let action = MoveAction {
            source: file_path.clone(),
            destination: base_path.join("documents").join("test.txt"),
        };
        FileOrganizer::execute(&action).expect("Failed to move file");

        let category_dir = base_path.join("documents");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert!(category_dir.join("test.txt").exists());
    }

    #[test]
    fn test_execute_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("images");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        let file_path = base_path.join("test.png");
        touch(&file_path);

        let action = MoveAction {
            source: file_path.clone(),
            destination: category_dir.join("test.png"),
        };
        FileOrganizer::execute(&action).expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("test.png").exists());
    }

    #[test]
    fn test_execute_missing_source_is_move_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let action = MoveAction {
            source: temp_dir.path().join("ghost.txt"),
            destination: temp_dir.path().join("documents").join("ghost.txt"),
        };

        let result = FileOrganizer::execute(&action);
        assert!(matches!(result, Err(OrganizeError::MoveError { .. })));
    }

    #[test]
    fn test_plan_non_recursive_ignores_subdirectories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        touch(&root.join("a.png"));
        touch(&root.join("nested").join("b.png"));

        let plan = FileOrganizer::plan(root, &Mapping::default(), false).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].source, root.join("a.png"));
        assert_eq!(plan[0].destination, root.join("images").join("a.png"));
    }

    #[test]
    fn test_plan_recursive_targets_root_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        touch(&root.join("nested").join("deeper").join("report.pdf"));

        let plan = FileOrganizer::plan(root, &Mapping::default(), true).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(
            plan[0].destination,
            root.join("documents").join("report.pdf")
        );
    }

    #[test]
    fn test_plan_skips_files_already_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        touch(&root.join("images").join("done.png"));

        let plan = FileOrganizer::plan(root, &Mapping::default(), true).unwrap();
        assert!(plan.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_skips_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let target = temp_dir.path().join("real.bin");
        touch(&target);
        std::os::unix::fs::symlink(&target, root.join("link.png"))
            .expect("Failed to create symlink");

        let plan = FileOrganizer::plan(root, &Mapping::default(), false).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_missing_root_is_traversal_error() {
        let result = FileOrganizer::plan(
            Path::new("/non/existent/path"),
            &Mapping::default(),
            false,
        );
        assert!(matches!(result, Err(OrganizeError::TraversalError { .. })));
    }

    #[test]
    fn test_organize_nested_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        touch(&root.join("clip.mp4"));

        let mut rules = BTreeMap::new();
        rules.insert(".mp4".to_string(), "media/video".to_string());
        let mapping = Mapping::from_rules(rules);

        let summary = FileOrganizer::organize(root, &mapping, OrganizeOptions::default()).unwrap();

        assert_eq!(summary.count(), 1);
        assert!(root.join("media").join("video").join("clip.mp4").exists());
    }

    #[test]
    fn test_empty_message_depends_on_mode() {
        let real = RunSummary {
            dry_run: false,
            actions: Vec::new(),
        };
        let dry = RunSummary {
            dry_run: true,
            actions: Vec::new(),
        };
        assert_eq!(real.empty_message(), "No files moved");
        assert_eq!(dry.empty_message(), "No files to move");
    }
}
