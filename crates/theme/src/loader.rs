//! Theme loading from TOML.

use anyhow::{anyhow, Result};
use ratatui::style::Color;
use serde::Deserialize;

use crate::{parse_color, TextPalette, Theme};

/// Color representation in TOML: a name / hex string, or an explicit triple.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    Named(String),
    Rgb { rgb: [u8; 3] },
}

impl TomlColor {
    fn to_color(&self) -> Result<Color> {
        match self {
            TomlColor::Named(name) => {
                parse_color(name).ok_or_else(|| anyhow!("Unknown color: {}", name))
            }
            TomlColor::Rgb { rgb } => Ok(Color::Rgb(rgb[0], rgb[1], rgb[2])),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TomlTextColors {
    bg: TomlColor,
    fg: TomlColor,
    cursor: TomlColor,
    selection_bg: TomlColor,
    selection_fg: TomlColor,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlTextTheme {
    text: TomlTextColors,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlChromeColors {
    bg: TomlColor,
    fg: TomlColor,
    accented_bg: TomlColor,
    accented_fg: TomlColor,
    selected_bg: TomlColor,
    selected_fg: TomlColor,
    disabled: TomlColor,
    error: TomlColor,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlChromeTheme {
    colors: TomlChromeColors,
}

/// Load a text area preset from TOML content with a `[text]` table.
pub fn load_text_palette_from_str(content: &str) -> Result<TextPalette> {
    let theme: TomlTextTheme = toml::from_str(content)?;
    let colors = theme.text;

    Ok(TextPalette {
        bg: colors.bg.to_color()?,
        fg: colors.fg.to_color()?,
        cursor: colors.cursor.to_color()?,
        selection_bg: colors.selection_bg.to_color()?,
        selection_fg: colors.selection_fg.to_color()?,
    })
}

/// Load the chrome palette from TOML content with a `[colors]` table.
pub fn load_theme_from_str(content: &str, name: &'static str) -> Result<Theme> {
    let theme: TomlChromeTheme = toml::from_str(content)?;
    let colors = theme.colors;

    Ok(Theme {
        name,
        bg: colors.bg.to_color()?,
        fg: colors.fg.to_color()?,
        accented_bg: colors.accented_bg.to_color()?,
        accented_fg: colors.accented_fg.to_color()?,
        selected_bg: colors.selected_bg.to_color()?,
        selected_fg: colors.selected_fg.to_color()?,
        disabled: colors.disabled.to_color()?,
        error: colors.error.to_color()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_palette_accepts_names_hex_and_triples() {
        let palette = load_text_palette_from_str(
            r##"
            [text]
            bg = "#000"
            fg = "white"
            cursor = { rgb = [1, 2, 3] }
            selection_bg = "navy"
            selection_fg = "#ABCDEF"
            "##,
        )
        .unwrap();

        assert_eq!(palette.bg, Color::Rgb(0, 0, 0));
        assert_eq!(palette.fg, Color::Rgb(255, 255, 255));
        assert_eq!(palette.cursor, Color::Rgb(1, 2, 3));
        assert_eq!(palette.selection_bg, Color::Rgb(0, 0, 128));
        assert_eq!(palette.selection_fg, Color::Rgb(0xab, 0xcd, 0xef));
    }

    #[test]
    fn test_unknown_color_is_an_error() {
        let result = load_text_palette_from_str(
            r#"
            [text]
            bg = "chartreuse-ish"
            fg = "white"
            cursor = "white"
            selection_bg = "white"
            selection_fg = "white"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        assert!(load_text_palette_from_str("[text]\nbg = \"white\"\n").is_err());
        assert!(load_theme_from_str("[colors]\nbg = \"white\"\n", "broken").is_err());
    }
}
