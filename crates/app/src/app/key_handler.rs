//! Keyboard handling: menu navigation, shortcuts, then text editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use quillcraft_core::Command;
use quillcraft_keyboard::KeyAction;
use quillcraft_logger as logger;

use super::App;

impl App {
    /// Handle keyboard event. Returns the command a shortcut asked for.
    pub(super) fn handle_key_event(&mut self, key: KeyEvent) -> Option<Command> {
        logger::debug(format!(
            "Key event: code={:?}, modifiers={:?}",
            key.code, key.modifiers
        ));

        // Clear status message on any key press
        if self.state.status_message.is_some() {
            self.state.clear_status();
        }

        if self.state.menu.is_some() {
            return self.handle_menu_key(key);
        }

        match self.keymap.lookup(&key) {
            Some(KeyAction::Run(command)) => return Some(command),
            Some(KeyAction::OpenMenu(index)) => {
                self.open_menu(index);
                return None;
            }
            None => {}
        }

        self.handle_editing_key(key);
        None
    }

    /// Keys that edit the text or move the caret
    fn handle_editing_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let page = (self.state.screen_layout().text.height as usize).max(1);
        let buffer = &mut self.state.document.buffer;

        match key.code {
            KeyCode::Char('a') if ctrl && !alt => buffer.select_all(),
            KeyCode::Char(c) if !ctrl && !alt => {
                let mut text = [0u8; 4];
                buffer.insert_text(c.encode_utf8(&mut text));
            }
            KeyCode::Enter => buffer.insert_text("\n"),
            KeyCode::Tab => buffer.insert_text("\t"),
            KeyCode::Backspace => {
                buffer.backspace();
            }
            KeyCode::Delete => {
                buffer.delete_forward();
            }
            KeyCode::Left => buffer.move_left(shift),
            KeyCode::Right => buffer.move_right(shift),
            KeyCode::Up => buffer.move_up(1, shift),
            KeyCode::Down => buffer.move_down(1, shift),
            KeyCode::Home if ctrl => buffer.move_doc_start(shift),
            KeyCode::End if ctrl => buffer.move_doc_end(shift),
            KeyCode::Home => buffer.move_line_start(shift),
            KeyCode::End => buffer.move_line_end(shift),
            KeyCode::PageUp => buffer.move_up(page, shift),
            KeyCode::PageDown => buffer.move_down(page, shift),
            KeyCode::Esc => buffer.clear_selection(),
            _ => return,
        }

        self.state.ensure_caret_visible();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use quillcraft_core::Command;

    use super::super::tests::app_with_text;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_inserts_text() {
        let mut app = app_with_text("");
        for c in "hi".chars() {
            assert_eq!(app.handle_key_event(key(KeyCode::Char(c))), None);
        }
        app.handle_key_event(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::SHIFT));
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.state.document.buffer.text(), "hi!\n\t");
    }

    #[test]
    fn test_shortcuts_resolve_to_commands() {
        let mut app = app_with_text("");
        assert_eq!(app.handle_key_event(ctrl('n')), Some(Command::New));
        assert_eq!(app.handle_key_event(ctrl('o')), Some(Command::Open));
        assert_eq!(app.handle_key_event(ctrl('s')), Some(Command::Save));
        assert_eq!(
            app.handle_key_event(KeyEvent::new(
                KeyCode::Char('S'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            )),
            Some(Command::SaveAs)
        );
        assert_eq!(app.handle_key_event(ctrl('q')), Some(Command::Quit));
        assert_eq!(app.handle_key_event(ctrl('z')), Some(Command::Undo));
        assert_eq!(app.handle_key_event(ctrl('h')), Some(Command::Redo));
        assert_eq!(app.handle_key_event(ctrl('x')), Some(Command::Cut));
        assert_eq!(app.handle_key_event(ctrl('c')), Some(Command::Copy));
        assert_eq!(app.handle_key_event(ctrl('v')), Some(Command::Paste));
        assert_eq!(app.handle_key_event(ctrl('f')), Some(Command::Find));
        assert_eq!(app.handle_key_event(ctrl('r')), Some(Command::Replace));
        assert_eq!(app.state.document.buffer.text(), "");
    }

    #[test]
    fn test_shift_arrows_extend_selection() {
        let mut app = app_with_text("hello");
        app.handle_key_event(KeyEvent::new(KeyCode::End, KeyModifiers::SHIFT));
        assert_eq!(
            app.state.document.buffer.selected_text().as_deref(),
            Some("hello")
        );
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(app.state.document.buffer.text(), "");
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app_with_text("one\ntwo\nthree");
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::End));
        assert_eq!(app.state.document.buffer.caret(), 7);
        app.handle_key_event(KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL));
        assert_eq!(app.state.document.buffer.caret(), 13);
        app.handle_key_event(key(KeyCode::PageUp));
        assert_eq!(app.state.document.buffer.cursor().line, 0);
        assert_eq!(app.state.document.buffer.caret(), 3);
        app.handle_key_event(key(KeyCode::Delete));
        assert_eq!(app.state.document.buffer.text(), "onetwo\nthree");
    }

    #[test]
    fn test_alt_mnemonic_opens_menu() {
        let mut app = app_with_text("");
        app.handle_key_event(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::ALT));
        assert_eq!(app.state.menu.map(|m| m.menu), Some(1));

        // Keys now drive the menu instead of the text
        app.handle_key_event(key(KeyCode::Char('x')));
        assert_eq!(app.state.document.buffer.text(), "");
    }

    #[test]
    fn test_key_press_clears_status() {
        let mut app = app_with_text("");
        app.state.set_info("Saved".to_string());
        app.handle_key_event(key(KeyCode::Left));
        assert!(app.state.status_message.is_none());
    }
}
