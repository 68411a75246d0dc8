//! Common modal rendering utilities.
//!
//! - Frame rendering with inverted chrome colors
//! - Input field rendering with cursor
//! - Button rows and scrolling lists shared by the dialogs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use quillcraft_theme::Theme;

use crate::modal_constants::BUTTON_SPACING;
use crate::TextInput;

/// Clear `area` and draw the dialog frame. Returns the inner area.
pub fn render_modal_frame(area: Rect, buf: &mut Buffer, theme: &Theme, title: &str) -> Rect {
    Clear.render(area, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.bg).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.bg))
        .style(Style::default().bg(theme.fg));

    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Render a text input field with cursor.
///
/// The text scrolls horizontally so the cursor always stays inside `area`.
pub fn render_input_field(
    buf: &mut Buffer,
    area: Rect,
    input: &TextInput,
    is_focused: bool,
    theme: &Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let field_style = Style::default().fg(theme.fg).bg(theme.bg);
    buf.set_style(Rect::new(area.x, area.y, area.width, 1), field_style);

    let mut before = input.text_before_cursor();
    let room = area.width.saturating_sub(1) as usize;
    while before.width() > room {
        let mut chars = before.chars();
        chars.next();
        before = chars.as_str();
    }

    let (x, _) = buf.set_stringn(area.x, area.y, before, room, field_style);

    let mut after = input.text_after_cursor().chars();
    let under_cursor = after.next().unwrap_or(' ');
    let cursor_style = if is_focused {
        field_style.add_modifier(Modifier::REVERSED)
    } else {
        field_style
    };
    let end = area.x + area.width;
    if x < end {
        buf.set_stringn(x, area.y, under_cursor.to_string(), 1, cursor_style);
        let rest_x = x + under_cursor.to_string().width().max(1) as u16;
        if rest_x < end {
            buf.set_stringn(
                rest_x,
                area.y,
                after.as_str(),
                (end - rest_x) as usize,
                field_style,
            );
        }
    }
}

/// Render a centered row of `[ label ]` buttons.
///
/// Returns the screen area of every button, in order, for mouse hit tests.
pub fn render_buttons(
    buf: &mut Buffer,
    area: Rect,
    labels: &[&str],
    selected: Option<usize>,
    theme: &Theme,
) -> Vec<Rect> {
    let texts: Vec<String> = labels.iter().map(|label| format!("[ {} ]", label)).collect();
    let total: u16 = texts.iter().map(|t| t.width() as u16).sum::<u16>()
        + BUTTON_SPACING * texts.len().saturating_sub(1) as u16;

    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let mut rects = Vec::with_capacity(texts.len());

    for (idx, text) in texts.iter().enumerate() {
        let style = if selected == Some(idx) {
            Style::default()
                .fg(theme.fg)
                .bg(theme.accented_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accented_fg)
        };
        let width = text.width() as u16;
        buf.set_stringn(x, area.y, text, area.width as usize, style);
        rects.push(Rect::new(x, area.y, width, 1));
        x += width + BUTTON_SPACING;
    }

    rects
}

/// Index of the button under a screen cell.
pub fn button_at(buttons: &[Rect], column: u16, row: u16) -> Option<usize> {
    buttons
        .iter()
        .position(|rect| crate::contains(*rect, column, row))
}

/// Render list rows with a `▶` marker on the cursor row.
pub fn render_list<S: AsRef<str>>(
    buf: &mut Buffer,
    area: Rect,
    items: &[S],
    cursor: usize,
    scroll: usize,
    theme: &Theme,
) {
    for (row, (idx, label)) in items
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height as usize)
        .enumerate()
    {
        let selected = idx == cursor;
        let style = if selected {
            Style::default()
                .fg(theme.fg)
                .bg(theme.accented_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.bg)
        };
        let y = area.y + row as u16;
        if selected {
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
        }
        let prefix = if selected { "▶ " } else { "  " };
        let (x, _) = buf.set_stringn(area.x, y, prefix, area.width as usize, style);
        let room = (area.x + area.width).saturating_sub(x) as usize;
        buf.set_stringn(x, y, label.as_ref(), room, style);
    }
}

/// Adjust a scroll offset so that `cursor` is inside a window of `height` rows.
pub fn scroll_to_cursor(cursor: usize, scroll: usize, height: usize) -> usize {
    if height == 0 {
        return cursor;
    }
    if cursor < scroll {
        cursor
    } else if cursor >= scroll + height {
        cursor + 1 - height
    } else {
        scroll
    }
}
