//! Screen regions.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ menu bar                     │
//! ├────────────────────────────┬─┤
//! │ text area                  │▲│
//! │                            │█│
//! │                            │▼│
//! ├────────────────────────────┼─┤
//! │ ◄ horizontal scrollbar ►   │ │
//! ├────────────────────────────┴─┤
//! │ status bar                   │
//! └──────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub text: Rect,
    pub vertical_scrollbar: Rect,
    pub horizontal_scrollbar: Rect,
    pub status_bar: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Menu
                Constraint::Min(0),    // Text + vertical scrollbar
                Constraint::Length(1), // Horizontal scrollbar
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(rows[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(rows[2]);

        Self {
            menu_bar: rows[0],
            text: main[0],
            vertical_scrollbar: main[1],
            horizontal_scrollbar: bottom[0],
            status_bar: rows[3],
        }
    }
}
