use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
};
use unicode_width::UnicodeWidthStr;

use quillcraft_theme::Theme;

/// What the status bar shows
pub struct StatusBarParams<'a> {
    pub theme: &'a Theme,
    /// Window title, e.g. "notes.txt - QuillCraft"
    pub title: &'a str,
    /// 1-based caret line and column
    pub line: usize,
    pub column: usize,
    pub font_family: &'a str,
    pub font_size: u16,
    pub tab_width: usize,
    pub word_wrap: bool,
    pub theme_label: &'a str,
    /// Status message (message, is_error)
    pub status_message: Option<&'a (String, bool)>,
}

/// Status bar at the bottom of screen
pub struct StatusBar;

impl StatusBar {
    pub fn render(buf: &mut Buffer, area: Rect, params: &StatusBarParams<'_>) {
        if area.height == 0 {
            return;
        }
        let theme = params.theme;
        buf.set_style(area, Style::default().fg(theme.fg).bg(theme.accented_bg));

        let mut x = area.x;
        let right = area.x + area.width;
        for span in Self::left_spans(params) {
            if x >= right {
                break;
            }
            let (next, _) = buf.set_span(x, area.y, &span, right - x);
            x = next;
        }

        let info = Self::right_text(params);
        let info_width = info.width() as u16;
        if x + info_width < right {
            buf.set_string(
                right - info_width,
                area.y,
                info,
                Style::default().fg(theme.disabled).bg(theme.accented_bg),
            );
        }
    }

    /// Title, caret position and the status message
    fn left_spans<'a>(params: &'a StatusBarParams<'a>) -> Vec<Span<'a>> {
        let theme = params.theme;
        let base_style = Style::default().fg(theme.disabled).bg(theme.accented_bg);
        let highlight_style = Style::default()
            .fg(theme.accented_fg)
            .bg(theme.accented_bg)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled(" ", base_style),
            Span::styled(params.title, highlight_style),
            Span::styled(" | ", base_style),
            Span::styled(
                format!("Ln {}, Col {}", params.line, params.column),
                base_style,
            ),
        ];

        if let Some((message, is_error)) = params.status_message {
            let style = if *is_error {
                Style::default()
                    .fg(theme.error)
                    .bg(theme.accented_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg).bg(theme.accented_bg)
            };
            spans.push(Span::styled(" | ", base_style));
            spans.push(Span::styled(message.as_str(), style));
        }
        spans
    }

    /// Font and layout settings, right-aligned
    fn right_text(params: &StatusBarParams<'_>) -> String {
        format!(
            " {} {}pt | Tab {} | {} | {} ",
            params.font_family,
            params.font_size,
            params.tab_width,
            if params.word_wrap { "Wrap" } else { "No Wrap" },
            params.theme_label,
        )
    }
}
