//! Startup configuration for quillcraft.
//!
//! An optional `config.toml` in the XDG config directory may override the
//! built-in defaults. The file is only read: the editor never creates or
//! rewrites it, and appearance changes made at runtime are not persisted.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, LoggingSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const FONT_FAMILY: &str = "Courier New";
    pub const FONT_SIZE: u16 = 14;
    pub const MIN_FONT_SIZE: u16 = 8;
    pub const MAX_FONT_SIZE: u16 = 76;
    pub const TAB_WIDTH: usize = 4;
    pub const TAB_WIDTHS: [usize; 3] = [2, 4, 8];
    pub const WORD_WRAP: bool = true;
    pub const THEME: &str = "light";
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "quillcraft.log";

    /// Selectable font sizes: 8, 10, ..., 76
    pub fn font_sizes() -> impl Iterator<Item = u16> {
        (MIN_FONT_SIZE..=MAX_FONT_SIZE).step_by(2)
    }
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Resolve the log file location.
    ///
    /// Uses `logging.file_path` when set, otherwise the cache directory, and
    /// the system temp directory when no cache directory is known.
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(path) = &self.logging.file_path {
            return PathBuf::from(path);
        }
        get_cache_dir()
            .unwrap_or_else(|_| std::env::temp_dir().join("quillcraft"))
            .join(defaults::LOG_FILE_NAME)
    }
}
