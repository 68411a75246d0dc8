//! Mouse handling: menu bar, text area and scrollbars.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use quillcraft_core::Command;
use quillcraft_logger as logger;
use quillcraft_ui_render::{hit_test, MenuHit, ScreenLayout};

use super::App;

/// Rows or columns moved per wheel notch
const WHEEL_STEP: isize = 3;

impl App {
    /// Handle mouse event. Returns the command of a clicked menu item.
    pub(super) fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<Command> {
        let layout = self.state.screen_layout();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_click(mouse, &layout),
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.selecting {
                    self.place_caret(&layout, mouse.column, mouse.row, true);
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.selecting = false;
                None
            }
            MouseEventKind::ScrollUp => {
                self.scroll_rows(&layout, -WHEEL_STEP);
                None
            }
            MouseEventKind::ScrollDown => {
                self.scroll_rows(&layout, WHEEL_STEP);
                None
            }
            MouseEventKind::ScrollLeft => {
                self.scroll_columns(&layout, -WHEEL_STEP);
                None
            }
            MouseEventKind::ScrollRight => {
                self.scroll_columns(&layout, WHEEL_STEP);
                None
            }
            _ => None,
        }
    }

    fn handle_left_click(&mut self, mouse: MouseEvent, layout: &ScreenLayout) -> Option<Command> {
        let (column, row) = (mouse.column, mouse.row);
        let hit = hit_test(
            &self.state.menus,
            self.state.menu.as_ref(),
            layout.menu_bar,
            self.state.screen,
            column,
            row,
        );

        match hit {
            Some(MenuHit::Title(index)) => {
                if self.state.menu.map(|m| m.menu) == Some(index) {
                    self.close_menu();
                } else {
                    self.open_menu(index);
                }
                return None;
            }
            Some(MenuHit::Item(index)) => {
                let mut menu = self.state.menu?;
                menu.item = index;
                menu.submenu_item = None;
                return self.activate_menu(menu);
            }
            Some(MenuHit::SubmenuItem(index)) => {
                let mut menu = self.state.menu?;
                menu.submenu_item = Some(index);
                return self.activate_menu(menu);
            }
            Some(MenuHit::Inert) => return None,
            None => {}
        }

        // A click outside an open menu only closes it
        if self.state.menu.is_some() {
            self.close_menu();
            return None;
        }

        let position = Position::new(column, row);
        if layout.text.contains(position) {
            let extend = mouse.modifiers.contains(KeyModifiers::SHIFT);
            self.place_caret(layout, column, row, extend);
            self.selecting = true;
        } else if layout.vertical_scrollbar.contains(position) {
            self.click_vertical_scrollbar(layout, row);
        } else if layout.horizontal_scrollbar.contains(position) {
            self.click_horizontal_scrollbar(layout, column);
        }
        None
    }

    fn activate_menu(&mut self, mut menu: quillcraft_core::MenuState) -> Option<Command> {
        let command = menu.activate(&self.state.menus);
        self.state.menu = if command.is_some() { None } else { Some(menu) };
        command
    }

    fn place_caret(&mut self, layout: &ScreenLayout, column: u16, row: u16, extend: bool) {
        let text_layout = self.state.text_layout();
        let buffer = &mut self.state.document.buffer;
        let index = self
            .state
            .viewport
            .char_at(buffer, &text_layout, layout.text, column, row);
        buffer.set_caret(index, extend);
        self.state.ensure_caret_visible();
    }

    fn scroll_rows(&mut self, layout: &ScreenLayout, delta: isize) {
        let text_layout = self.state.text_layout();
        self.state
            .viewport
            .scroll_rows(&self.state.document.buffer, &text_layout, layout.text, delta);
    }

    fn scroll_columns(&mut self, layout: &ScreenLayout, delta: isize) {
        let text_layout = self.state.text_layout();
        self.state
            .viewport
            .scroll_columns(&self.state.document.buffer, &text_layout, layout.text, delta);
    }

    /// Arrows step one row; the track jumps proportionally
    fn click_vertical_scrollbar(&mut self, layout: &ScreenLayout, row: u16) {
        let bar = layout.vertical_scrollbar;
        let Some(offset) = track_offset(bar.y, bar.height, row) else {
            let delta = if row == bar.y { -1 } else { 1 };
            self.scroll_rows(layout, delta);
            return;
        };

        let (vertical, _) = self.state.scroll_metrics();
        let target = vertical.position_at(offset, bar.height - 2);
        logger::debug(format!("Scrollbar jump to row {}", target));
        let text_layout = self.state.text_layout();
        self.state
            .viewport
            .scroll_to_row(&self.state.document.buffer, &text_layout, layout.text, target);
    }

    fn click_horizontal_scrollbar(&mut self, layout: &ScreenLayout, column: u16) {
        let bar: Rect = layout.horizontal_scrollbar;
        let Some(offset) = track_offset(bar.x, bar.width, column) else {
            let delta = if column == bar.x { -1 } else { 1 };
            self.scroll_columns(layout, delta);
            return;
        };

        let (_, horizontal) = self.state.scroll_metrics();
        let target = horizontal.position_at(offset, bar.width - 2);
        let delta = target as isize - self.state.viewport.left_column as isize;
        self.scroll_columns(layout, delta);
    }
}

/// Offset inside the track between the two arrow cells, or None on an arrow
fn track_offset(start: u16, len: u16, at: u16) -> Option<u16> {
    if len < 3 || at <= start || at >= start + len - 1 {
        return None;
    }
    Some(at - start - 1)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    use quillcraft_core::Command;

    use super::super::tests::app_with_text;
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn long_text(lines: usize) -> String {
        (0..lines).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_click_title_toggles_menu() {
        let mut app = app_with_text("");
        // "File" at 1..5, "Edit" at 7..11
        app.handle_mouse_event(click(8, 0));
        assert_eq!(app.state.menu.map(|m| m.menu), Some(1));
        app.handle_mouse_event(click(8, 0));
        assert!(app.state.menu.is_none());
    }

    #[test]
    fn test_click_menu_item_runs_command() {
        let mut app = app_with_text("");
        app.handle_mouse_event(click(2, 0));
        // Dropdown border at row 1, first entry at row 2
        assert_eq!(app.handle_mouse_event(click(3, 2)), Some(Command::New));
        assert!(app.state.menu.is_none());
    }

    #[test]
    fn test_click_outside_menu_closes_it() {
        let mut app = app_with_text("hello");
        app.open_menu(0);
        assert_eq!(app.handle_mouse_event(click(60, 15)), None);
        assert!(app.state.menu.is_none());
        assert_eq!(app.state.document.buffer.caret(), 0);
    }

    #[test]
    fn test_click_and_drag_select_text() {
        let mut app = app_with_text("hello world");
        app.handle_mouse_event(click(3, 1));
        assert_eq!(app.state.document.buffer.caret(), 3);

        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 8, 1));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 8, 1));
        assert_eq!(
            app.state.document.buffer.selected_text().as_deref(),
            Some("lo wo")
        );

        // Drags after release do nothing
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1));
        assert_eq!(app.state.document.buffer.caret(), 8);
    }

    #[test]
    fn test_click_below_text_goes_to_end() {
        let mut app = app_with_text("ab\ncd");
        app.handle_mouse_event(click(0, 20));
        assert_eq!(app.state.document.buffer.caret(), 5);
    }

    #[test]
    fn test_wheel_scrolls_viewport() {
        let mut app = app_with_text(&long_text(100));
        app.handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 10));
        assert_eq!(app.state.viewport.top_line, 3);
        app.handle_mouse_event(mouse(MouseEventKind::ScrollUp, 10, 10));
        app.handle_mouse_event(mouse(MouseEventKind::ScrollUp, 10, 10));
        assert_eq!(app.state.viewport.top_line, 0);
        assert_eq!(app.state.document.buffer.caret(), 0);
    }

    #[test]
    fn test_vertical_scrollbar_arrows_and_track() {
        let mut app = app_with_text(&long_text(100));
        let bar = app.state.screen_layout().vertical_scrollbar;

        app.handle_mouse_event(click(bar.x, bar.y + bar.height - 1));
        assert_eq!(app.state.viewport.top_line, 1);
        app.handle_mouse_event(click(bar.x, bar.y));
        assert_eq!(app.state.viewport.top_line, 0);

        // Bottom of the track shows the last page
        app.handle_mouse_event(click(bar.x, bar.y + bar.height - 2));
        let (vertical, _) = app.state.scroll_metrics();
        assert_eq!(vertical.position, vertical.max_position());
    }

    #[test]
    fn test_track_offset() {
        assert_eq!(track_offset(1, 10, 1), None);
        assert_eq!(track_offset(1, 10, 10), None);
        assert_eq!(track_offset(1, 10, 2), Some(0));
        assert_eq!(track_offset(1, 10, 9), Some(7));
        assert_eq!(track_offset(0, 2, 1), None);
    }
}
