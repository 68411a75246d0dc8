//! Color chooser: named colors with swatches plus a custom hex entry.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

use quillcraft_theme::{format_color, parse_color, Theme, NAMED_COLORS};

use crate::base::{render_input_field, render_list, render_modal_frame, scroll_to_cursor};
use crate::modal_constants::MAX_LIST_ROWS;
use crate::{
    calculate_modal_width, centered_rect_with_size, contains, Modal, ModalResult,
    ModalWidthConfig, TextInput,
};

const CUSTOM_LABEL: &str = "Custom...";
const SWATCH_WIDTH: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Custom,
}

#[derive(Debug)]
pub struct ColorModal {
    title: String,
    labels: Vec<String>,
    cursor: usize,
    scroll: usize,
    mode: Mode,
    custom: TextInput,
    error: Option<String>,
    last_list_area: Option<Rect>,
}

impl ColorModal {
    /// Create a chooser with the cursor on `current` when it has a name
    pub fn new(title: impl Into<String>, current: Color) -> Self {
        let mut labels: Vec<String> = NAMED_COLORS
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        labels.push(CUSTOM_LABEL.to_string());

        let cursor = NAMED_COLORS
            .iter()
            .position(|(_, color)| *color == current)
            .unwrap_or(0);

        Self {
            title: title.into(),
            labels,
            cursor,
            scroll: scroll_to_cursor(cursor, 0, MAX_LIST_ROWS),
            mode: Mode::List,
            custom: TextInput::with_text(format_color(current)),
            error: None,
            last_list_area: None,
        }
    }

    fn is_custom_row(&self, index: usize) -> bool {
        index == NAMED_COLORS.len()
    }

    fn move_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.labels.len() - 1);
        self.scroll = scroll_to_cursor(self.cursor, self.scroll, MAX_LIST_ROWS);
    }

    fn activate(&mut self, index: usize) -> Option<ModalResult<Color>> {
        if self.is_custom_row(index) {
            self.mode = Mode::Custom;
            self.error = None;
            return None;
        }
        NAMED_COLORS
            .get(index)
            .map(|(_, color)| ModalResult::Confirmed(*color))
    }

    fn confirm_custom(&mut self) -> Option<ModalResult<Color>> {
        match parse_color(self.custom.text()) {
            Some(color) => Some(ModalResult::Confirmed(color)),
            None => {
                self.error = Some(format!("Unknown color: {}", self.custom.text()));
                None
            }
        }
    }

    fn handle_custom_key(&mut self, key: KeyEvent) -> Option<ModalResult<Color>> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::List;
                self.error = None;
                None
            }
            KeyCode::Enter => self.confirm_custom(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.custom.insert_char(c);
                None
            }
            KeyCode::Backspace => {
                self.custom.backspace();
                None
            }
            KeyCode::Delete => {
                self.custom.delete();
                None
            }
            KeyCode::Left => {
                self.custom.move_left();
                None
            }
            KeyCode::Right => {
                self.custom.move_right();
                None
            }
            KeyCode::Home => {
                self.custom.move_home();
                None
            }
            KeyCode::End => {
                self.custom.move_end();
                None
            }
            _ => None,
        }
    }

    fn render_swatches(&self, buf: &mut Buffer, area: Rect) {
        if area.width <= SWATCH_WIDTH {
            return;
        }
        let x = area.x + area.width - SWATCH_WIDTH;
        for (row, (_, (_, color))) in NAMED_COLORS
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_string(
                x,
                area.y + row as u16,
                " ".repeat(SWATCH_WIDTH as usize - 1),
                Style::default().bg(*color),
            );
        }
    }
}

impl Modal for ColorModal {
    type Result = Color;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let modal_width = calculate_modal_width(
            [self.title.len() as u16 + 2, 32].into_iter(),
            area.width,
            ModalWidthConfig::default(),
        );
        // borders + list + separator + custom field + message
        let modal_height = (MAX_LIST_ROWS as u16 + 5).min(area.height);
        let modal_area = centered_rect_with_size(modal_width, modal_height, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MAX_LIST_ROWS as u16),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        render_list(buf, chunks[0], &self.labels, self.cursor, self.scroll, theme);
        self.render_swatches(buf, chunks[0]);
        self.last_list_area = Some(chunks[0]);

        if self.mode == Mode::Custom {
            let label = "Color: ";
            buf.set_string(chunks[2].x, chunks[2].y, label, Style::default().fg(theme.bg));
            let field = Rect {
                x: chunks[2].x + label.len() as u16,
                width: chunks[2].width.saturating_sub(label.len() as u16),
                ..chunks[2]
            };
            render_input_field(buf, field, &self.custom, true, theme);
        }

        let (message, style) = match &self.error {
            Some(error) => (error.as_str(), Style::default().fg(theme.error)),
            None if self.mode == Mode::Custom => (
                "#rrggbb or a color name, Enter to apply",
                Style::default().fg(theme.disabled),
            ),
            None => ("", Style::default()),
        };
        Paragraph::new(message).style(style).render(chunks[3], buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        if self.mode == Mode::Custom {
            return Ok(self.handle_custom_key(key));
        }

        match key.code {
            KeyCode::Esc => return Ok(Some(ModalResult::Cancelled)),
            KeyCode::Enter => return Ok(self.activate(self.cursor)),
            KeyCode::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Down => self.move_cursor(self.cursor + 1),
            KeyCode::PageUp => self.move_cursor(self.cursor.saturating_sub(MAX_LIST_ROWS)),
            KeyCode::PageDown => self.move_cursor(self.cursor + MAX_LIST_ROWS),
            KeyCode::Home => self.move_cursor(0),
            KeyCode::End => self.move_cursor(usize::MAX),
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        _modal_area: Rect,
    ) -> Result<Option<ModalResult<Self::Result>>> {
        let Some(list_area) = self.last_list_area else {
            return Ok(None);
        };
        if !contains(list_area, mouse.column, mouse.row) {
            return Ok(None);
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => self.move_cursor(self.cursor.saturating_sub(1)),
            MouseEventKind::ScrollDown => self.move_cursor(self.cursor + 1),
            MouseEventKind::Down(MouseButton::Left) => {
                let clicked = self.scroll + (mouse.row - list_area.y) as usize;
                if clicked < self.labels.len() {
                    self.cursor = clicked;
                    return Ok(self.activate(clicked));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_paste(&mut self, text: &str) {
        if self.mode == Mode::Custom {
            self.custom.insert_str(text.trim());
        }
    }
}
