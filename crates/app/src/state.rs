use std::path::PathBuf;
use std::str::FromStr;

use ratatui::layout::Rect;

use quillcraft_buffer::TextBuffer;
use quillcraft_config::Config;
use quillcraft_core::{menu_bar, Menu, MenuState, TabWidth};
use quillcraft_logger as logger;
use quillcraft_theme::{TextPalette, ThemeKind};
use quillcraft_ui_render::{ScreenLayout, ScrollMetrics, TextLayout, Viewport};

/// Application name used in the title
pub const APP_NAME: &str = "QuillCraft";

/// The single open document
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub buffer: TextBuffer,
    /// None until the document is opened from or saved to a file
    pub file_path: Option<PathBuf>,
}

impl Document {
    /// `"{basename} - QuillCraft"`, or `"Untitled - QuillCraft"` without a path
    pub fn title(&self) -> String {
        let name = self
            .file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        format!("{} - {}", name, APP_NAME)
    }
}

/// Display font. Terminals cannot switch fonts, so this is shown, not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSetting {
    pub family: String,
    pub size: u16,
}

/// Colors and layout of the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub palette: TextPalette,
    pub theme: ThemeKind,
    pub tab_width: TabWidth,
    pub word_wrap: bool,
}

impl Appearance {
    /// Replace all five text colors with a preset
    pub fn apply_theme(&mut self, kind: ThemeKind) {
        self.theme = kind;
        self.palette = TextPalette::preset(kind);
    }

    pub fn text_layout(&self) -> TextLayout {
        TextLayout::new(self.tab_width.columns(), self.word_wrap)
    }
}

impl Default for Appearance {
    fn default() -> Self {
        let theme = ThemeKind::default();
        Self {
            palette: TextPalette::preset(theme),
            theme,
            tab_width: TabWidth::default(),
            word_wrap: true,
        }
    }
}

/// Editor state owned by [`crate::App`] and handed to command handlers
pub struct EditorState {
    pub document: Document,
    pub appearance: Appearance,
    pub font: FontSetting,
    pub viewport: Viewport,
    /// Menu tree shown in the menu bar
    pub menus: Vec<Menu>,
    /// Open dropdown, if any
    pub menu: Option<MenuState>,
    /// Status message (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// Whole terminal area
    pub screen: Rect,
    pub should_quit: bool,
}

impl EditorState {
    /// State with the startup defaults from the configuration
    pub fn new(config: &Config) -> Self {
        let settings = &config.editor;

        let tab_width = TabWidth::from_columns(settings.tab_width).unwrap_or_else(|| {
            logger::warn(format!(
                "Unsupported tab width {}, using default",
                settings.tab_width
            ));
            TabWidth::default()
        });
        let theme = ThemeKind::from_str(&settings.theme).unwrap_or_else(|e| {
            logger::warn(format!("{}, using Light theme", e));
            ThemeKind::default()
        });

        let mut appearance = Appearance {
            tab_width,
            word_wrap: settings.word_wrap,
            ..Appearance::default()
        };
        appearance.apply_theme(theme);

        Self {
            document: Document::default(),
            appearance,
            font: FontSetting {
                family: settings.font_family.clone(),
                size: settings.font_size,
            },
            viewport: Viewport::default(),
            menus: menu_bar(),
            menu: None,
            status_message: None,
            screen: Rect::new(0, 0, 80, 24),
            should_quit: false,
        }
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    pub fn text_layout(&self) -> TextLayout {
        self.appearance.text_layout()
    }

    pub fn screen_layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.screen)
    }

    /// Update terminal dimensions
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
    }

    /// Scroll so the caret is on screen
    pub fn ensure_caret_visible(&mut self) {
        let layout = self.text_layout();
        let area = self.screen_layout().text;
        self.viewport
            .ensure_caret_visible(&self.document.buffer, &layout, area);
    }

    /// Vertical and horizontal scroll extents of the text area.
    ///
    /// Horizontal scrolling stops half a screen past the widest line; with
    /// word wrap the horizontal thumb fills the track.
    pub fn scroll_metrics(&self) -> (ScrollMetrics, ScrollMetrics) {
        self.scroll_metrics_in(self.screen_layout().text)
    }

    /// Scroll extents for a text area of the given size
    pub fn scroll_metrics_in(&self, area: Rect) -> (ScrollMetrics, ScrollMetrics) {
        let layout = self.text_layout();
        let buffer = &self.document.buffer;
        let width = area.width as usize;

        let vertical = ScrollMetrics {
            content: layout.total_rows(buffer, width),
            viewport: area.height as usize,
            position: self.viewport.first_visible_row(buffer, &layout, width),
        };
        let horizontal = if layout.word_wrap {
            ScrollMetrics {
                content: width,
                viewport: width,
                position: 0,
            }
        } else {
            ScrollMetrics {
                content: (layout.content_width(buffer) + width).saturating_sub(width / 2),
                viewport: width,
                position: self.viewport.left_column,
            }
        };
        (vertical, horizontal)
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_error(&mut self, message: String) {
        self.status_message = Some((message, true));
    }

    pub fn set_info(&mut self, message: String) {
        self.status_message = Some((message, false));
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_defaults() {
        let state = EditorState::default();
        assert_eq!(state.title(), "Untitled - QuillCraft");
        assert_eq!(state.font.family, "Courier New");
        assert_eq!(state.font.size, 14);
        assert_eq!(state.appearance.tab_width, TabWidth::Four);
        assert!(state.appearance.word_wrap);
        assert_eq!(state.appearance.theme, ThemeKind::Light);
        assert_eq!(
            state.appearance.palette,
            TextPalette::preset(ThemeKind::Light)
        );
        assert!(state.document.buffer.is_empty());
        assert!(state.document.file_path.is_none());
    }

    #[test]
    fn test_title_uses_basename() {
        let document = Document {
            buffer: TextBuffer::new(),
            file_path: Some(PathBuf::from("/tmp/notes/todo.txt")),
        };
        assert_eq!(document.title(), "todo.txt - QuillCraft");
    }

    #[test]
    fn test_config_overrides_and_fallbacks() {
        let mut config = Config::default();
        config.editor.theme = "dark".to_string();
        config.editor.tab_width = 8;
        config.editor.word_wrap = false;
        let state = EditorState::new(&config);
        assert_eq!(state.appearance.theme, ThemeKind::Dark);
        assert_eq!(state.appearance.palette, TextPalette::preset(ThemeKind::Dark));
        assert_eq!(state.appearance.tab_width, TabWidth::Eight);
        assert!(!state.text_layout().word_wrap);

        config.editor.theme = "solarized".to_string();
        config.editor.tab_width = 3;
        let state = EditorState::new(&config);
        assert_eq!(state.appearance.theme, ThemeKind::Light);
        assert_eq!(state.appearance.tab_width, TabWidth::Four);
    }

    #[test]
    fn test_scroll_metrics() {
        let mut state = EditorState::default();
        state.update_terminal_size(20, 8);
        let text: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        state.document.buffer = TextBuffer::from_text(&text);

        let (vertical, horizontal) = state.scroll_metrics();
        assert_eq!(vertical.content, 31);
        assert_eq!(vertical.viewport, 5);
        assert_eq!(vertical.position, 0);
        assert_eq!(horizontal.max_position(), 0);

        state.appearance.word_wrap = false;
        state.document.buffer = TextBuffer::from_text(&"x".repeat(100));
        let (_, horizontal) = state.scroll_metrics();
        assert_eq!(horizontal.viewport, 19);
        assert_eq!(horizontal.max_position(), 100 - 19 / 2);
    }

    #[test]
    fn test_status_messages() {
        let mut state = EditorState::default();
        state.set_error("boom".to_string());
        assert_eq!(state.status_message, Some(("boom".to_string(), true)));
        state.set_info("ok".to_string());
        assert_eq!(state.status_message, Some(("ok".to_string(), false)));
        state.clear_status();
        assert!(state.status_message.is_none());
    }
}
