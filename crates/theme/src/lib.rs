//! Color themes for quillcraft.
//!
//! Two kinds of palettes: the text area presets (Light, Dark) and the
//! chrome palette for menus, dialogs and the status bar. Both are embedded
//! as TOML at compile time and parsed once.

mod colors;
mod loader;

pub use colors::{format_color, parse_color, TextPalette, Theme, ThemeKind, NAMED_COLORS};
pub use loader::{load_text_palette_from_str, load_theme_from_str};

use quillcraft_logger as logger;
use ratatui::style::Color;
use std::sync::OnceLock;

const THEME_LIGHT_TOML: &str = include_str!("../themes/light.toml");
const THEME_DARK_TOML: &str = include_str!("../themes/dark.toml");
const THEME_CHROME_TOML: &str = include_str!("../themes/chrome.toml");

static THEME_LIGHT: OnceLock<TextPalette> = OnceLock::new();
static THEME_DARK: OnceLock<TextPalette> = OnceLock::new();
static THEME_CHROME: OnceLock<Theme> = OnceLock::new();

const DODGER_BLUE: Color = Color::Rgb(30, 144, 255);
const WHITE: Color = Color::Rgb(255, 255, 255);
const BLACK: Color = Color::Rgb(0, 0, 0);

/// Hardcoded presets in case the embedded TOML fails to parse
fn hardcoded_text_palette(kind: ThemeKind) -> TextPalette {
    match kind {
        ThemeKind::Light => TextPalette {
            bg: WHITE,
            fg: BLACK,
            cursor: BLACK,
            selection_bg: DODGER_BLUE,
            selection_fg: WHITE,
        },
        ThemeKind::Dark => TextPalette {
            bg: Color::Rgb(46, 46, 46),
            fg: WHITE,
            cursor: WHITE,
            selection_bg: DODGER_BLUE,
            selection_fg: BLACK,
        },
    }
}

fn hardcoded_chrome_theme() -> Theme {
    Theme {
        name: "chrome",
        bg: Color::Gray,
        fg: Color::Black,
        accented_bg: Color::DarkGray,
        accented_fg: Color::Blue,
        selected_bg: Color::Blue,
        selected_fg: Color::White,
        disabled: Color::DarkGray,
        error: Color::Red,
    }
}

fn load_text_palette(content: &str, kind: ThemeKind) -> TextPalette {
    match loader::load_text_palette_from_str(content) {
        Ok(palette) => palette,
        Err(e) => {
            logger::error(format!(
                "Failed to parse built-in theme '{}': {}. Using fallback colors.",
                kind, e
            ));
            hardcoded_text_palette(kind)
        }
    }
}

impl TextPalette {
    /// Colors of a built-in preset
    pub fn preset(kind: ThemeKind) -> TextPalette {
        match kind {
            ThemeKind::Light => *THEME_LIGHT
                .get_or_init(|| load_text_palette(THEME_LIGHT_TOML, ThemeKind::Light)),
            ThemeKind::Dark => {
                *THEME_DARK.get_or_init(|| load_text_palette(THEME_DARK_TOML, ThemeKind::Dark))
            }
        }
    }
}

impl Default for TextPalette {
    fn default() -> Self {
        Self::preset(ThemeKind::default())
    }
}

impl Theme {
    /// Palette for menus, dialogs and the status bar
    pub fn chrome() -> &'static Theme {
        THEME_CHROME.get_or_init(|| {
            match loader::load_theme_from_str(THEME_CHROME_TOML, "chrome") {
                Ok(theme) => theme,
                Err(e) => {
                    logger::error(format!(
                        "Failed to parse built-in chrome theme: {}. Using fallback theme.",
                        e
                    ));
                    hardcoded_chrome_theme()
                }
            }
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        *Self::chrome()
    }
}
