//! Menu bar navigation.

use crossterm::event::{KeyCode, KeyEvent};

use quillcraft_core::{Command, MenuState};
use quillcraft_logger as logger;

use super::App;

impl App {
    pub(super) fn open_menu(&mut self, index: usize) {
        logger::debug(format!("Open menu {}", index));
        self.state.menu = Some(MenuState::open(&self.state.menus, index));
    }

    pub(super) fn close_menu(&mut self) {
        self.state.menu = None;
    }

    /// Handle keyboard event in menu
    pub(super) fn handle_menu_key(&mut self, key: KeyEvent) -> Option<Command> {
        let mut menu = self.state.menu?;
        let menus = &self.state.menus;

        match key.code {
            KeyCode::Esc => {
                if !menu.close_submenu() {
                    self.state.menu = None;
                    return None;
                }
            }
            KeyCode::F(10) => {
                self.state.menu = None;
                return None;
            }
            KeyCode::Left => {
                if !menu.close_submenu() {
                    menu.prev_menu(menus);
                }
            }
            KeyCode::Right => {
                if menu.submenu_item.is_some() || !menu.open_submenu(menus) {
                    menu.next_menu(menus);
                }
            }
            KeyCode::Up => menu.prev_item(menus),
            KeyCode::Down => menu.next_item(menus),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(command) = menu.activate(menus) {
                    self.state.menu = None;
                    return Some(command);
                }
            }
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                if let Some(index) = menus.iter().position(|m| m.mnemonic == c) {
                    menu = MenuState::open(menus, index);
                }
            }
            _ => {}
        }

        self.state.menu = Some(menu);
        None
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use quillcraft_core::{Command, TabWidth, ThemeKind};

    use super::super::tests::app_with_text;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_f10_opens_and_enter_runs_first_item() {
        let mut app = app_with_text("");
        assert_eq!(app.handle_key_event(key(KeyCode::F(10))), None);
        assert_eq!(app.state.menu.map(|m| (m.menu, m.item)), Some((0, 0)));

        assert_eq!(app.handle_key_event(key(KeyCode::Enter)), Some(Command::New));
        assert!(app.state.menu.is_none());
    }

    #[test]
    fn test_left_right_wrap_between_menus() {
        let mut app = app_with_text("");
        app.open_menu(0);
        app.handle_key_event(key(KeyCode::Left));
        assert_eq!(app.state.menu.map(|m| m.menu), Some(3));
        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.state.menu.map(|m| m.menu), Some(0));
    }

    #[test]
    fn test_up_skips_separators_and_wraps() {
        let mut app = app_with_text("");
        app.open_menu(2);
        // Format: Background Color, Text Color, ---, Font Style
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.state.menu.map(|m| m.item), Some(3));
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.state.menu.is_none());
    }

    #[test]
    fn test_submenu_navigation() {
        let mut app = app_with_text("");
        app.open_menu(2);
        // Up from Background Color wraps to Themes
        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.state.menu.map(|m| m.item), Some(9));
        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.state.menu.and_then(|m| m.submenu_item), Some(0));
        assert_eq!(
            app.handle_key_event(key(KeyCode::Enter)),
            Some(Command::SetTheme(ThemeKind::Dark))
        );

        app.open_menu(2);
        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.state.menu.and_then(|m| m.submenu_item), Some(1));
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.state.menu.and_then(|m| m.submenu_item), None);
        assert!(app.state.menu.is_some());
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(
            app.handle_key_event(key(KeyCode::Enter)),
            Some(Command::SetTabWidth(TabWidth::Four))
        );
    }

    #[test]
    fn test_mnemonic_switches_menu_and_esc_closes() {
        let mut app = app_with_text("");
        app.open_menu(0);
        app.handle_key_event(key(KeyCode::Char('h')));
        assert_eq!(app.state.menu.map(|m| m.menu), Some(3));
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.state.menu.is_none());
    }
}
