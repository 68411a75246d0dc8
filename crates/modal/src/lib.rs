//! Modal dialog system for quillcraft.
//!
//! Every dialog implements [`Modal`]: it draws itself over the editor and
//! consumes key and mouse events until it resolves to a [`ModalResult`].
//! The application drives modals from a nested event loop, so a dialog
//! call reads like a blocking function from the command handler's side.

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
};
use unicode_width::UnicodeWidthStr;

use quillcraft_theme::Theme;

pub mod base;
pub mod color;
pub mod file_dialog;
pub mod info;
pub mod input;
pub mod select;
pub mod text_input;

pub use color::ColorModal;
pub use file_dialog::{FileDialog, FileDialogMode, FileFilter, FILE_FILTERS};
pub use info::{InfoKind, InfoModal};
pub use input::InputModal;
pub use select::SelectModal;
pub use text_input::TextInput;

/// Modal window result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResult<T> {
    /// User confirmed the action with a result.
    Confirmed(T),
    /// User cancelled the action.
    Cancelled,
}

/// Trait for all modal windows.
pub trait Modal {
    /// Modal window result type.
    type Result;

    /// Render the modal window centered in `area`.
    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme);

    /// Handle keyboard event.
    /// Returns Some(result) if the modal window should close.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>>;

    /// Handle mouse event.
    /// Returns Some(result) if the modal window should close.
    fn handle_mouse(
        &mut self,
        _mouse: MouseEvent,
        _modal_area: Rect,
    ) -> Result<Option<ModalResult<Self::Result>>> {
        Ok(None)
    }

    /// Handle bracketed paste. Modals with a text field insert it.
    fn handle_paste(&mut self, _text: &str) {}
}

/// Default modal size constants.
pub mod modal_constants {
    /// Minimum modal width (default).
    pub const MIN_WIDTH_DEFAULT: u16 = 30;
    /// Minimum modal width (wide).
    pub const MIN_WIDTH_WIDE: u16 = 50;
    /// Maximum width as fraction of screen (default).
    pub const MAX_WIDTH_PERCENTAGE_DEFAULT: f32 = 0.75;
    /// Maximum width as fraction of screen (wide).
    pub const MAX_WIDTH_PERCENTAGE_WIDE: f32 = 0.90;
    /// Padding with single border.
    pub const PADDING_WITH_BORDER: u16 = 6;
    /// Padding with double border.
    pub const PADDING_WITH_DOUBLE_BORDER: u16 = 8;
    /// Gap between dialog buttons.
    pub const BUTTON_SPACING: u16 = 4;
    /// Maximum number of list rows shown at once.
    pub const MAX_LIST_ROWS: usize = 10;
}

/// Configuration for modal width calculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalWidthConfig {
    /// Use wide modal constraints.
    pub wide: bool,
    /// Use double border padding.
    pub double_border: bool,
}

impl ModalWidthConfig {
    pub fn wide() -> Self {
        Self {
            wide: true,
            double_border: true,
        }
    }
}

/// Calculate modal width from content widths and the screen width.
///
/// Takes the widest content, adds padding, then clamps to the minimum width
/// and to a share of the screen.
pub fn calculate_modal_width(
    content_widths: impl Iterator<Item = u16>,
    screen_width: u16,
    config: ModalWidthConfig,
) -> u16 {
    let content_width = content_widths.max().unwrap_or(0);

    let padding = if config.double_border {
        modal_constants::PADDING_WITH_DOUBLE_BORDER
    } else {
        modal_constants::PADDING_WITH_BORDER
    };

    let (max_percentage, min_width) = if config.wide {
        (
            modal_constants::MAX_WIDTH_PERCENTAGE_WIDE,
            modal_constants::MIN_WIDTH_WIDE,
        )
    } else {
        (
            modal_constants::MAX_WIDTH_PERCENTAGE_DEFAULT,
            modal_constants::MIN_WIDTH_DEFAULT,
        )
    };

    let max_width = (screen_width as f32 * max_percentage) as u16;

    (content_width + padding)
        .max(min_width)
        .min(max_width)
        .min(screen_width)
}

/// Display width of the widest line of `text`.
pub fn max_line_width(text: &str) -> u16 {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0) as u16
}

/// Display width of the widest item plus a fixed prefix.
pub fn max_item_width<S: AsRef<str>>(items: &[S], prefix_len: usize) -> u16 {
    items
        .iter()
        .map(|item| prefix_len + item.as_ref().width())
        .max()
        .unwrap_or(0) as u16
}

/// Create a rectangle of the given size centered within `r`.
pub fn centered_rect_with_size(width: u16, height: u16, r: Rect) -> Rect {
    let horizontal_margin = r.width.saturating_sub(width) / 2;
    let vertical_margin = r.height.saturating_sub(height) / 2;

    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_margin),
            Constraint::Length(height),
            Constraint::Length(vertical_margin),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(horizontal_margin),
            Constraint::Length(width),
            Constraint::Length(horizontal_margin),
        ])
        .split(vertical_layout[1])[1]
}

/// Whether a screen cell lies inside `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_width_clamps() {
        let config = ModalWidthConfig::default();
        assert_eq!(calculate_modal_width([4u16].into_iter(), 100, config), 30);
        assert_eq!(calculate_modal_width([40u16].into_iter(), 100, config), 46);
        assert_eq!(calculate_modal_width([200u16].into_iter(), 100, config), 75);
        assert_eq!(calculate_modal_width([4u16].into_iter(), 20, config), 15);
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect_with_size(40, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(rect, Rect::new(30, 20, 40, 10));
    }

    #[test]
    fn test_max_line_width_uses_display_width() {
        assert_eq!(max_line_width("ab\nabcd\n"), 4);
        assert_eq!(max_line_width("日本"), 4);
        assert_eq!(max_item_width(&["a", "abc"], 2), 5);
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(5, 5, 3, 2);
        assert!(contains(area, 5, 5));
        assert!(contains(area, 7, 6));
        assert!(!contains(area, 8, 5));
        assert!(!contains(area, 5, 7));
    }
}
