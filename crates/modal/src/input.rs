//! Text input modal dialog.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

use quillcraft_theme::Theme;

use crate::base::{button_at, render_buttons, render_input_field, render_modal_frame};
use crate::{
    calculate_modal_width, centered_rect_with_size, max_line_width, Modal, ModalResult,
    ModalWidthConfig, TextInput,
};

/// Focus area in the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusArea {
    Input,
    Buttons,
}

/// Text prompt with OK and Cancel buttons.
///
/// Confirming an empty field cancels, so callers only ever receive
/// non-empty text.
#[derive(Debug)]
pub struct InputModal {
    title: String,
    prompt: String,
    input: TextInput,
    focus: FocusArea,
    selected_button: usize, // 0 = OK, 1 = Cancel
    last_buttons: Vec<Rect>,
}

impl InputModal {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::with_default(title, prompt, "")
    }

    /// Create with a prefilled value
    pub fn with_default(
        title: impl Into<String>,
        prompt: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            input: TextInput::with_text(default),
            focus: FocusArea::Input,
            selected_button: 0,
            last_buttons: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    fn prompt_lines(&self) -> u16 {
        self.prompt.lines().count() as u16
    }

    fn calculate_modal_size(&self, screen_width: u16, screen_height: u16) -> (u16, u16) {
        let title_width = self.title.len() as u16 + 2;
        let prompt_width = max_line_width(&self.prompt);
        let buttons_width = 20u16; // "[ OK ]    [ Cancel ]"
        let input_width = self.input.text().chars().count() as u16 + 20;

        let width = calculate_modal_width(
            [title_width, prompt_width, buttons_width, input_width].into_iter(),
            screen_width,
            ModalWidthConfig {
                wide: false,
                double_border: true,
            },
        );

        // border + prompt + input(3) + buttons + border
        let height = (1 + self.prompt_lines() + 3 + 1 + 1).min(screen_height);

        (width, height)
    }

    fn confirm(&self) -> Option<ModalResult<String>> {
        if self.input.is_empty() {
            Some(ModalResult::Cancelled)
        } else {
            Some(ModalResult::Confirmed(self.input.text().to_string()))
        }
    }

    fn edit(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
            }
            KeyCode::Backspace => {
                self.input.backspace();
            }
            KeyCode::Delete => {
                self.input.delete();
            }
            KeyCode::Left => {
                self.input.move_left();
            }
            KeyCode::Right => {
                self.input.move_right();
            }
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }
}

impl Modal for InputModal {
    type Result = String;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let (modal_width, modal_height) = self.calculate_modal_size(area.width, area.height);
        let modal_area = centered_rect_with_size(modal_width, modal_height, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.prompt_lines()),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(self.prompt.as_str())
            .style(Style::default().fg(theme.bg))
            .render(chunks[0], buf);

        let field_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accented_fg));
        let field_area = field_block.inner(chunks[1]);
        field_block.render(chunks[1], buf);
        render_input_field(
            buf,
            field_area,
            &self.input,
            self.focus == FocusArea::Input,
            theme,
        );

        let selected = (self.focus == FocusArea::Buttons).then_some(self.selected_button);
        self.last_buttons = render_buttons(buf, chunks[2], &["OK", "Cancel"], selected, theme);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        if key.code == KeyCode::Esc {
            return Ok(Some(ModalResult::Cancelled));
        }

        match self.focus {
            FocusArea::Input => match key.code {
                KeyCode::Enter => Ok(self.confirm()),
                KeyCode::Down | KeyCode::Tab => {
                    self.focus = FocusArea::Buttons;
                    Ok(None)
                }
                _ => {
                    self.edit(key);
                    Ok(None)
                }
            },
            FocusArea::Buttons => match key.code {
                KeyCode::Left | KeyCode::Right => {
                    self.selected_button = 1 - self.selected_button;
                    Ok(None)
                }
                KeyCode::Up | KeyCode::Tab | KeyCode::BackTab => {
                    self.focus = FocusArea::Input;
                    Ok(None)
                }
                KeyCode::Enter if self.selected_button == 0 => Ok(self.confirm()),
                KeyCode::Enter => Ok(Some(ModalResult::Cancelled)),
                KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete => {
                    // Typing goes back to the field
                    self.focus = FocusArea::Input;
                    self.edit(key);
                    Ok(None)
                }
                _ => Ok(None),
            },
        }
    }

    fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        _modal_area: Rect,
    ) -> Result<Option<ModalResult<Self::Result>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }

        match button_at(&self.last_buttons, mouse.column, mouse.row) {
            Some(0) => Ok(self.confirm()),
            Some(_) => Ok(Some(ModalResult::Cancelled)),
            None => Ok(None),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        self.focus = FocusArea::Input;
        self.input.insert_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(modal: &mut InputModal, text: &str) {
        for c in text.chars() {
            assert!(modal.handle_key(key(KeyCode::Char(c))).unwrap().is_none());
        }
    }

    #[test]
    fn test_enter_confirms_text() {
        let mut modal = InputModal::new("Find", "Enter text to find:");
        type_text(&mut modal, "foo");
        assert_eq!(
            modal.handle_key(key(KeyCode::Enter)).unwrap(),
            Some(ModalResult::Confirmed("foo".to_string()))
        );
    }

    #[test]
    fn test_empty_input_cancels() {
        let mut modal = InputModal::new("Find", "Enter text to find:");
        assert_eq!(
            modal.handle_key(key(KeyCode::Enter)).unwrap(),
            Some(ModalResult::Cancelled)
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut modal = InputModal::with_default("Replace", "Replace 'a' with:", "b");
        assert_eq!(
            modal.handle_key(key(KeyCode::Esc)).unwrap(),
            Some(ModalResult::Cancelled)
        );
    }

    #[test]
    fn test_cancel_button() {
        let mut modal = InputModal::with_default("Replace", "", "text");
        modal.handle_key(key(KeyCode::Tab)).unwrap();
        modal.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(
            modal.handle_key(key(KeyCode::Enter)).unwrap(),
            Some(ModalResult::Cancelled)
        );
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut modal = InputModal::new("Find", "");
        let ctrl_a = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        modal.handle_key(ctrl_a).unwrap();
        assert_eq!(modal.text(), "");
    }

    #[test]
    fn test_render_then_click_ok() {
        let theme = Theme::default();
        let mut modal = InputModal::with_default("Find", "Enter text to find:", "x");
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf, &theme);

        let ok = modal.last_buttons[0];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: ok.x + 1,
            row: ok.y,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            modal.handle_mouse(click, area).unwrap(),
            Some(ModalResult::Confirmed("x".to_string()))
        );
    }

    #[test]
    fn test_paste_inserts_into_field() {
        let mut modal = InputModal::new("Find", "");
        modal.handle_paste("pasted\n");
        assert_eq!(modal.text(), "pasted ");
    }
}
