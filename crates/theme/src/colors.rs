//! Theme color definitions.

use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;

/// Palette for the window chrome: menu bar, dropdowns, dialogs, status bar.
///
/// The text area is colored separately by [`TextPalette`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,

    /// Menu bar, dialog and status bar background
    pub bg: Color,
    pub fg: Color,

    /// Dialog title bars and scrollbar tracks
    pub accented_bg: Color,
    /// Menu mnemonics, dialog borders
    pub accented_fg: Color,

    /// Highlighted menu entry or list row
    pub selected_bg: Color,
    pub selected_fg: Color,

    /// Separators, accelerator hints, secondary text
    pub disabled: Color,
    pub error: Color,
}

/// Built-in text area presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Light => "Light",
            ThemeKind::Dark => "Dark",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeKind::Light),
            "dark" => Ok(ThemeKind::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Colors of the text area. A theme preset sets all five at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPalette {
    pub bg: Color,
    pub fg: Color,
    /// Caret color
    pub cursor: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

/// Color names offered by the color chooser, with their RGB values.
///
/// Names follow the X11 color database so values typed in the chooser
/// behave like they would in a desktop color dialog.
pub const NAMED_COLORS: &[(&str, Color)] = &[
    ("white", Color::Rgb(255, 255, 255)),
    ("black", Color::Rgb(0, 0, 0)),
    ("gray", Color::Rgb(190, 190, 190)),
    ("darkgray", Color::Rgb(169, 169, 169)),
    ("dimgray", Color::Rgb(105, 105, 105)),
    ("red", Color::Rgb(255, 0, 0)),
    ("darkred", Color::Rgb(139, 0, 0)),
    ("orange", Color::Rgb(255, 165, 0)),
    ("yellow", Color::Rgb(255, 255, 0)),
    ("green", Color::Rgb(0, 255, 0)),
    ("darkgreen", Color::Rgb(0, 100, 0)),
    ("cyan", Color::Rgb(0, 255, 255)),
    ("blue", Color::Rgb(0, 0, 255)),
    ("navy", Color::Rgb(0, 0, 128)),
    ("dodgerblue", Color::Rgb(30, 144, 255)),
    ("magenta", Color::Rgb(255, 0, 255)),
    ("purple", Color::Rgb(160, 32, 240)),
    ("pink", Color::Rgb(255, 192, 203)),
    ("brown", Color::Rgb(165, 42, 42)),
    ("beige", Color::Rgb(245, 245, 220)),
    ("ivory", Color::Rgb(255, 255, 240)),
];

/// Parse a color as `#rgb`, `#rrggbb` or a name from [`NAMED_COLORS`]
/// (case-insensitive, spaces ignored, "grey" accepted for "gray").
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let key: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let key = key.replace("grey", "gray");
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color::Rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::Rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// Display form of a color: its X11 name if it has one, else `#rrggbb`
pub fn format_color(color: Color) -> String {
    if let Some((name, _)) = NAMED_COLORS.iter().find(|(_, c)| *c == color) {
        return (*name).to_string();
    }
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#1E90FF"), Some(Color::Rgb(30, 144, 255)));
        assert_eq!(parse_color("#2e2e2e"), Some(Color::Rgb(46, 46, 46)));
        assert_eq!(parse_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gggggg"), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_color("white"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("Dodger Blue"), Some(Color::Rgb(30, 144, 255)));
        assert_eq!(parse_color("dim grey"), Some(Color::Rgb(105, 105, 105)));
        assert_eq!(parse_color("DarkGray"), Some(Color::Rgb(169, 169, 169)));
        assert_eq!(parse_color("no such color"), None);
    }

    #[test]
    fn test_format_color() {
        assert_eq!(format_color(Color::Rgb(255, 255, 255)), "white");
        assert_eq!(format_color(Color::Rgb(46, 46, 46)), "#2e2e2e");
    }

    #[test]
    fn test_theme_kind_parsing() {
        assert_eq!("Dark".parse::<ThemeKind>(), Ok(ThemeKind::Dark));
        assert_eq!("light".parse::<ThemeKind>(), Ok(ThemeKind::Light));
        assert!("solarized".parse::<ThemeKind>().is_err());
        assert_eq!(ThemeKind::default(), ThemeKind::Light);
    }
}
