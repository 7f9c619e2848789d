//! Configuration file parser for ~/.config/arxfeed/config.toml.
//!
//! The file is optional. When it is missing, `Config::default()` is used.
//! Unknown keys are ignored by serde, though we log a warning for each one
//! since they are usually typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feed::{FailurePolicy, ParsedRecord};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// How selected records are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered titles followed by their authors.
    #[default]
    Text,
    /// A pretty-printed JSON array of records.
    Json,
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Subject code whose new submissions are listed.
    pub category: String,

    /// Feed document read when no `--feed` is given.
    pub feed: Option<PathBuf>,

    /// Also list entries that revise an earlier announcement.
    pub include_updated: bool,

    /// Also list entries filed under a subject other than `category`.
    pub include_cross_lists: bool,

    pub on_error: FailurePolicy,

    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category: "hep-th".to_string(),
            feed: None,
            include_updated: false,
            include_cross_lists: false,
            on_error: FailurePolicy::Skip,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "category",
        "feed",
        "include_updated",
        "include_cross_lists",
        "on_error",
        "output",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check size before reading so a huge file is never pulled into memory.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            category = %config.category,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Whether `record` should be listed under this configuration.
    ///
    /// With both `include_*` flags off this is [`ParsedRecord::is_new_in`].
    pub fn selects(&self, record: &ParsedRecord) -> bool {
        (self.include_updated || !record.updated)
            && (self.include_cross_lists || !record.is_cross_list(&self.category))
    }
}

/// Default config location: `$HOME/.config/arxfeed/config.toml`.
///
/// Returns `None` when `HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("arxfeed")
            .join("config.toml"),
    )
}

// ============================================================================
// Tests
// ============================================================================
