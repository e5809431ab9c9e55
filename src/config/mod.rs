//! Configuration management for tabmarks.
//!
//! Handles persistence and loading of user preferences: which bookmarks file
//! to edit, the preselected export format and status message timing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::export::{ExportFormat, MAX_PLAYLIST_SIZE};

/// Directory name under the platform config/data dirs
pub const APP_DIR: &str = "tabmarks";

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Bookmarks file to edit; defaults to `<config_dir>/tabmarks/Bookmarks`
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Format preselected in the export picker
    #[serde(default)]
    pub default_export_format: ExportFormat,

    /// Seconds a status toast stays on screen (1-30)
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,

    /// Videos per YouTube playlist URL (1-50)
    #[serde(default = "default_youtube_batch_size")]
    pub youtube_batch_size: usize,
}

fn default_status_timeout() -> u64 {
    3
}

fn default_youtube_batch_size() -> usize {
    MAX_PLAYLIST_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            default_export_format: ExportFormat::default(),
            status_timeout_secs: default_status_timeout(),
            youtube_batch_size: default_youtube_batch_size(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, or return default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate();

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Clamp numeric settings to their valid ranges
    pub fn validate(&mut self) {
        self.status_timeout_secs = self.status_timeout_secs.clamp(1, 30);
        self.youtube_batch_size = self.youtube_batch_size.clamp(1, MAX_PLAYLIST_SIZE);
    }

    /// Bookmarks file to open: the configured one, else the default location
    pub fn resolved_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::app_config_dir()?.join("Bookmarks")),
        }
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        Ok(Self::app_config_dir()?.join("config.json"))
    }

    fn app_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join(APP_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.status_timeout_secs, 3);
        assert_eq!(config.youtube_batch_size, 50);
        assert_eq!(config.default_export_format, ExportFormat::Urls);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = Config {
            status_timeout_secs: 0,
            youtube_batch_size: 500,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.status_timeout_secs, 1);
        assert_eq!(config.youtube_batch_size, 50);

        config.status_timeout_secs = 90;
        config.youtube_batch_size = 0;
        config.validate();
        assert_eq!(config.status_timeout_secs, 30);
        assert_eq!(config.youtube_batch_size, 1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_export_format": "markdown"}"#).unwrap();
        assert_eq!(config.default_export_format, ExportFormat::Markdown);
        assert_eq!(config.status_timeout_secs, 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let config = Config {
            store_path: Some(PathBuf::from("/tmp/Bookmarks")),
            default_export_format: ExportFormat::Youtube,
            status_timeout_secs: 5,
            youtube_batch_size: 20,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_configured_store_path_wins() {
        let config = Config {
            store_path: Some(PathBuf::from("/data/Bookmarks")),
            ..Default::default()
        };
        assert_eq!(config.resolved_store_path().unwrap(), PathBuf::from("/data/Bookmarks"));
    }
}
