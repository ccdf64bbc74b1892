//! Rules file loading and rendering.
//!
//! A rules file maps extensions to destination folders. JSON is the canonical
//! format; files ending in `.toml` are read as TOML with the same shape.
//!
//! # Configuration File Format
//!
//! ```json
//! {
//!   "rules": {
//!     ".png": "images",
//!     ".pdf": "documents"
//!   }
//! }
//! ```
//!
//! or, in TOML:
//!
//! ```toml
//! [rules]
//! ".png" = "images"
//! ".pdf" = "documents"
//! ```

use crate::file_category::Mapping;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur while resolving the rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Rules file missing or could not be opened.
    ConfigNotFound { path: PathBuf, reason: String },
    /// The rules file does not have the expected shape.
    ConfigParseError { path: PathBuf, reason: String },
    /// The default rules could not be rendered.
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound { path, reason } => {
                write!(
                    f,
                    "Configuration file not found: {} ({})",
                    path.display(),
                    reason
                )
            }
            ConfigError::ConfigParseError { path, reason } => {
                write!(
                    f,
                    "Invalid configuration in {}: {}",
                    path.display(),
                    reason
                )
            }
            ConfigError::Serialize(reason) => {
                write!(f, "Could not render default configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serialization format of a rules file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file's extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// On-disk shape of a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Extension (with leading dot) to destination folder.
    pub rules: BTreeMap<String, String>,
}

impl RulesConfig {
    /// Resolves the mapping for a run.
    ///
    /// With no path (or an empty one) the built-in table is used. Otherwise the
    /// file is read and parsed; any failure is returned and there is no
    /// fallback to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist or
    /// cannot be opened.
    /// Returns `ConfigError::ConfigParseError` if the content is malformed or a
    /// destination is not a plain relative path.
    pub fn load(config_path: Option<&Path>) -> Result<Mapping, ConfigError> {
        match config_path {
            Some(path) if !path.as_os_str().is_empty() => {
                let config = Self::load_from_file(path)?;
                config.into_mapping(path)
            }
            _ => {
                tracing::debug!("no rules file given, using built-in rules");
                Ok(Mapping::default())
            }
        }
    }

    /// Reads and parses a rules file without validating its destinations.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            // Opened fine, but the bytes are not text.
            std::io::ErrorKind::InvalidData => ConfigError::ConfigParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
            _ => ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        Self::parse(&content, ConfigFormat::from_path(path)).map_err(|reason| {
            ConfigError::ConfigParseError {
                path: path.to_path_buf(),
                reason,
            }
        })
    }

    /// Parses rules text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, String> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Validates the destinations and turns the rules into a [`Mapping`].
    fn into_mapping(self, path: &Path) -> Result<Mapping, ConfigError> {
        for (extension, destination) in &self.rules {
            if let Err(reason) = validate_destination(destination) {
                return Err(ConfigError::ConfigParseError {
                    path: path.to_path_buf(),
                    reason: format!("rule for '{}': {}", extension, reason),
                });
            }
            if !extension.starts_with('.') {
                tracing::warn!(
                    extension = %extension,
                    "rule key has no leading dot and will never match a file"
                );
            }
        }

        tracing::debug!(path = %path.display(), rules = self.rules.len(), "loaded rules file");
        Ok(Mapping::from_rules(self.rules))
    }

    /// Renders the built-in rules as a pretty-printed rules file.
    ///
    /// The output parses back into exactly the built-in table.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::config::{ConfigFormat, RulesConfig};
    ///
    /// let json = RulesConfig::render_default(ConfigFormat::Json).unwrap();
    /// assert!(json.contains("\".png\": \"images\""));
    /// ```
    pub fn render_default(format: ConfigFormat) -> Result<String, ConfigError> {
        let config = RulesConfig::from(&Mapping::default());
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&config)
                .map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Toml => {
                toml::to_string_pretty(&config).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
        }
    }
}

impl From<&Mapping> for RulesConfig {
    fn from(mapping: &Mapping) -> Self {
        Self {
            rules: mapping.rules().clone(),
        }
    }
}

/// Checks that a destination stays inside the target root once joined to it.
fn validate_destination(destination: &str) -> Result<(), String> {
    if destination.trim().is_empty() {
        return Err("destination folder is empty".to_string());
    }

    for component in Path::new(destination).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(format!("destination '{}' contains '..'", destination));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("destination '{}' is not a relative path", destination));
            }
        }
    }

    Ok(())
}
