//! Message box with a single OK button.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use quillcraft_theme::Theme;

use crate::base::{button_at, render_buttons, render_modal_frame};
use crate::{
    calculate_modal_width, centered_rect_with_size, max_line_width, Modal, ModalResult,
    ModalWidthConfig,
};

/// Visual flavor of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoKind {
    #[default]
    Info,
    Error,
}

#[derive(Debug)]
pub struct InfoModal {
    title: String,
    message: String,
    kind: InfoKind,
    last_buttons: Vec<Rect>,
}

impl InfoModal {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: InfoKind::Info,
            last_buttons: Vec::new(),
        }
    }

    /// Message box drawn in the error color
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: InfoKind::Error,
            ..Self::new(title, message)
        }
    }

    pub fn kind(&self) -> InfoKind {
        self.kind
    }

    fn calculate_modal_width(&self, screen_width: u16) -> u16 {
        let title_width = self.title.len() as u16 + 2;
        let message_width = max_line_width(&self.message);

        calculate_modal_width(
            [title_width, message_width].into_iter(),
            screen_width,
            ModalWidthConfig::wide(),
        )
    }
}

impl Modal for InfoModal {
    type Result = ();

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let modal_width = self.calculate_modal_width(area.width);

        // Long help text may still wrap; leave room for borders and buttons
        let text_width = modal_width.saturating_sub(2).max(1) as usize;
        let message_lines: usize = self
            .message
            .lines()
            .map(|line| line.chars().count().max(1).div_ceil(text_width))
            .sum::<usize>()
            .max(1);
        let modal_height = (message_lines as u16 + 4).min(area.height);

        let modal_area = centered_rect_with_size(modal_width, modal_height, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Gap
                Constraint::Length(1), // Button
            ])
            .split(inner);

        let message_style = match self.kind {
            InfoKind::Info => Style::default().fg(theme.bg),
            InfoKind::Error => Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        };
        Paragraph::new(self.message.as_str())
            .style(message_style)
            .wrap(Wrap { trim: false })
            .render(chunks[0], buf);

        self.last_buttons = render_buttons(buf, chunks[2], &["OK"], Some(0), theme);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Ok(Some(ModalResult::Confirmed(()))),
            KeyCode::Esc => Ok(Some(ModalResult::Cancelled)),
            _ => Ok(None),
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
        Ok(button_at(&self.last_buttons, mouse.column, mouse.row)
            .map(|_| ModalResult::Confirmed(())))
    }
}
