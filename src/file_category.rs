//! Extension-based file classification.
//!
//! This module holds the built-in extension table and the [`Mapping`] type that
//! every run classifies files against. Classification looks only at the file
//! name: the extension is the part of the name from its last `.` to the end.
//!
//! # Examples
//!
//! ```
//! use dirsort::file_category::Mapping;
//! use std::path::Path;
//!
//! let mapping = Mapping::default();
//! assert_eq!(mapping.destination_for(Path::new("song.mp3")), Some("audio"));
//! assert_eq!(mapping.destination_for(Path::new("notes.md")), None);
//! ```
use std::collections::BTreeMap;
use std::path::Path;

/// A destination category of the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (PNG, JPG, GIF)
    Image,
    /// Document files (TXT, PDF, DOC)
    Document,
    /// Spreadsheet files (XLSX, XLS, CSV)
    Spreadsheet,
    /// Audio files (MP3, WAV)
    Audio,
    /// Video files (MP4, MKV, AVI)
    Video,
}

impl Category {
    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "images");
    /// assert_eq!(Category::Audio.dir_name(), "audio");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "images",
            Category::Document => "documents",
            Category::Spreadsheet => "spreadsheets",
            Category::Audio => "audio",
            Category::Video => "videos",
        }
    }
}

/// The built-in extension table used when no rules file is given.
pub const DEFAULT_RULES: &[(&str, Category)] = &[
    (".png", Category::Image),
    (".jpg", Category::Image),
    (".jpeg", Category::Image),
    (".gif", Category::Image),
    (".txt", Category::Document),
    (".pdf", Category::Document),
    (".doc", Category::Document),
    (".docx", Category::Document),
    (".xlsx", Category::Spreadsheet),
    (".xls", Category::Spreadsheet),
    (".csv", Category::Spreadsheet),
    (".mp3", Category::Audio),
    (".wav", Category::Audio),
    (".mp4", Category::Video),
    (".mkv", Category::Video),
    (".avi", Category::Video),
];

/// Maps file extensions (with their leading dot) to destination folder names.
///
/// Lookups are exact and case-sensitive: `.PNG` and `.png` are different keys.
/// Entries are kept sorted so the mapping always renders the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    rules: BTreeMap<String, String>,
}

impl Mapping {
    /// Creates a mapping from an already-parsed rule set.
    pub fn from_rules(rules: BTreeMap<String, String>) -> Self {
        Self { rules }
    }

    /// Returns the destination folder for an extension, if one is mapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Mapping;
    ///
    /// let mapping = Mapping::default();
    /// assert_eq!(mapping.destination_for_extension(".png"), Some("images"));
    /// assert_eq!(mapping.destination_for_extension(".PNG"), None);
    /// ```
    pub fn destination_for_extension(&self, extension: &str) -> Option<&str> {
        self.rules.get(extension).map(String::as_str)
    }

    /// Returns the destination folder for a file, judged by its name only.
    ///
    /// Names that are not valid UTF-8 still classify by their extension text.
    pub fn destination_for(&self, file_path: &Path) -> Option<&str> {
        let file_name = file_path.file_name()?.to_string_lossy();
        let extension = extension_of(&file_name);
        if extension.is_empty() {
            return None;
        }
        self.destination_for_extension(extension)
    }

    /// Borrows the underlying rules.
    pub fn rules(&self) -> &BTreeMap<String, String> {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Mapping {
    /// Builds the mapping from [`DEFAULT_RULES`].
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(ext, category)| (ext.to_string(), category.dir_name().to_string()))
            .collect();
        Self { rules }
    }
}

/// Returns the extension of a file name, including the leading dot.
///
/// The extension runs from the last `.` to the end of the name; a name without
/// a dot has an empty extension. Unlike [`Path::extension`], a name such as
/// `.bashrc` keeps its whole text as the extension.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::extension_of;
///
/// assert_eq!(extension_of("photo.png"), ".png");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("Makefile"), "");
/// ```
pub fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[index..],
        None => "",
    }
}
