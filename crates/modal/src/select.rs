//! Selection modal dialog (single selection).

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use quillcraft_theme::Theme;

use crate::base::{render_list, render_modal_frame, scroll_to_cursor};
use crate::modal_constants::MAX_LIST_ROWS;
use crate::{
    calculate_modal_width, centered_rect_with_size, contains, max_item_width, max_line_width,
    Modal, ModalResult, ModalWidthConfig,
};

/// Scrolling list picker. Confirms with the index of the chosen item.
#[derive(Debug)]
pub struct SelectModal {
    title: String,
    prompt: String,
    items: Vec<String>,
    cursor: usize,
    scroll: usize,
    last_list_area: Option<Rect>,
}

impl SelectModal {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            items,
            cursor: 0,
            scroll: 0,
            last_list_area: None,
        }
    }

    /// Start with the cursor on `index` (ignored when out of range)
    pub fn with_selected(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.cursor = index;
            self.scroll = scroll_to_cursor(index, 0, self.visible_rows());
        }
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn visible_rows(&self) -> usize {
        self.items.len().clamp(1, MAX_LIST_ROWS)
    }

    fn move_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.items.len().saturating_sub(1));
        self.scroll = scroll_to_cursor(self.cursor, self.scroll, self.visible_rows());
    }

    fn confirm(&self) -> Option<ModalResult<usize>> {
        if self.items.is_empty() {
            Some(ModalResult::Cancelled)
        } else {
            Some(ModalResult::Confirmed(self.cursor))
        }
    }

    fn calculate_modal_width(&self, screen_width: u16) -> u16 {
        let title_width = self.title.len() as u16 + 2;
        let prompt_width = max_line_width(&self.prompt);
        let items_width = max_item_width(&self.items, 2); // "▶ " prefix

        calculate_modal_width(
            [title_width, prompt_width, items_width].into_iter(),
            screen_width,
            ModalWidthConfig::default(),
        )
    }
}

impl Modal for SelectModal {
    type Result = usize;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let modal_width = self.calculate_modal_width(area.width);
        let prompt_lines = self.prompt.lines().count().max(1) as u16;
        let list_height = self.visible_rows() as u16;
        // borders + prompt + list
        let modal_height = (1 + prompt_lines + list_height + 1).min(area.height);

        let modal_area = centered_rect_with_size(modal_width, modal_height, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(prompt_lines),
                Constraint::Length(list_height),
            ])
            .split(inner);

        Paragraph::new(self.prompt.as_str())
            .style(Style::default().fg(theme.bg))
            .render(chunks[0], buf);

        render_list(buf, chunks[1], &self.items, self.cursor, self.scroll, theme);
        self.last_list_area = Some(chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        let page = self.visible_rows();
        match key.code {
            KeyCode::Esc => return Ok(Some(ModalResult::Cancelled)),
            KeyCode::Enter => return Ok(self.confirm()),
            KeyCode::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Down => self.move_cursor(self.cursor + 1),
            KeyCode::PageUp => self.move_cursor(self.cursor.saturating_sub(page)),
            KeyCode::PageDown => self.move_cursor(self.cursor + page),
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
            MouseEventKind::ScrollUp => {
                self.move_cursor(self.cursor.saturating_sub(1));
                Ok(None)
            }
            MouseEventKind::ScrollDown => {
                self.move_cursor(self.cursor + 1);
                Ok(None)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let clicked = self.scroll + (mouse.row - list_area.y) as usize;
                if clicked < self.items.len() {
                    self.cursor = clicked;
                    Ok(self.confirm())
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }
}
