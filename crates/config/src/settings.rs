//! Configuration structures for quillcraft startup defaults.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Startup configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Initial text area appearance. Runtime changes are never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in points (even, 8 to 76)
    #[serde(default = "default_font_size")]
    pub font_size: u16,

    /// Tab stop width in columns (2, 4 or 8)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    #[serde(default = "default_word_wrap")]
    pub word_wrap: bool,

    /// Initial theme preset ("light" or "dark")
    #[serde(default = "default_theme")]
    pub theme: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path; the cache directory is used when unset
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

fn default_font_family() -> String {
    defaults::FONT_FAMILY.to_string()
}

fn default_font_size() -> u16 {
    defaults::FONT_SIZE
}

fn default_tab_width() -> usize {
    defaults::TAB_WIDTH
}

fn default_word_wrap() -> bool {
    defaults::WORD_WRAP
}

fn default_theme() -> String {
    defaults::THEME.to_string()
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            tab_width: default_tab_width(),
            word_wrap: default_word_wrap(),
            theme: default_theme(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}

impl EditorSettings {
    /// Reset out-of-range values to their defaults.
    ///
    /// Returns one message per corrected key.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut corrections = Vec::new();

        if !defaults::TAB_WIDTHS.contains(&self.tab_width) {
            corrections.push(format!(
                "editor.tab_width = {} is not one of {:?}, using {}",
                self.tab_width,
                defaults::TAB_WIDTHS,
                defaults::TAB_WIDTH
            ));
            self.tab_width = defaults::TAB_WIDTH;
        }

        if !defaults::font_sizes().any(|size| size == self.font_size) {
            corrections.push(format!(
                "editor.font_size = {} is not an even size from {} to {}, using {}",
                self.font_size,
                defaults::MIN_FONT_SIZE,
                defaults::MAX_FONT_SIZE,
                defaults::FONT_SIZE
            ));
            self.font_size = defaults::FONT_SIZE;
        }

        if self.font_family.trim().is_empty() {
            corrections.push(format!(
                "editor.font_family is empty, using {}",
                defaults::FONT_FAMILY
            ));
            self.font_family = default_font_family();
        }

        corrections
    }
}
