//! Vertical and horizontal scrollbars of the text area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget},
};

use quillcraft_theme::Theme;

/// Scroll extent along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Rows (or columns) of content
    pub content: usize,
    /// Rows (or columns) visible at once
    pub viewport: usize,
    /// First visible row (or column)
    pub position: usize,
}

impl ScrollMetrics {
    /// Largest meaningful position
    pub fn max_position(&self) -> usize {
        self.content.saturating_sub(self.viewport)
    }

    /// Position for a click at `offset` cells along a track `track_len`
    /// cells long, placing the thumb proportionally
    pub fn position_at(&self, offset: u16, track_len: u16) -> usize {
        if track_len <= 1 {
            return 0;
        }
        let ratio = offset.min(track_len - 1) as f64 / (track_len - 1) as f64;
        (ratio * self.max_position() as f64).round() as usize
    }
}

pub fn render_vertical(area: Rect, buf: &mut Buffer, metrics: ScrollMetrics, theme: &Theme) {
    render(area, buf, metrics, theme, ScrollbarOrientation::VerticalRight);
}

/// The horizontal bar is always drawn; with word wrap its thumb spans the track
pub fn render_horizontal(area: Rect, buf: &mut Buffer, metrics: ScrollMetrics, theme: &Theme) {
    render(area, buf, metrics, theme, ScrollbarOrientation::HorizontalBottom);
}

fn render(
    area: Rect,
    buf: &mut Buffer,
    metrics: ScrollMetrics,
    theme: &Theme,
    orientation: ScrollbarOrientation,
) {
    buf.set_style(area, Style::default().bg(theme.accented_bg));
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut state = ScrollbarState::new(metrics.max_position() + 1)
        .position(metrics.position.min(metrics.max_position()))
        .viewport_content_length(metrics.viewport);

    let (begin, end) = match orientation {
        ScrollbarOrientation::VerticalRight | ScrollbarOrientation::VerticalLeft => ("▲", "▼"),
        _ => ("◄", "►"),
    };

    Scrollbar::new(orientation)
        .begin_symbol(Some(begin))
        .end_symbol(Some(end))
        .track_style(Style::default().fg(theme.disabled).bg(theme.accented_bg))
        .thumb_style(Style::default().fg(theme.accented_fg))
        .begin_style(Style::default().fg(theme.fg))
        .end_style(Style::default().fg(theme.fg))
        .render(area, buf, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_track_ends() {
        let metrics = ScrollMetrics {
            content: 120,
            viewport: 20,
            position: 0,
        };
        assert_eq!(metrics.max_position(), 100);
        assert_eq!(metrics.position_at(0, 11), 0);
        assert_eq!(metrics.position_at(10, 11), 100);
        assert_eq!(metrics.position_at(5, 11), 50);
        assert_eq!(metrics.position_at(50, 11), 100);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let metrics = ScrollMetrics {
            content: 5,
            viewport: 20,
            position: 0,
        };
        assert_eq!(metrics.max_position(), 0);
        assert_eq!(metrics.position_at(7, 10), 0);
    }

    #[test]
    fn test_renders_into_area() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 1, 10);
        let mut buf = Buffer::empty(area);
        render_vertical(
            area,
            &mut buf,
            ScrollMetrics {
                content: 100,
                viewport: 10,
                position: 0,
            },
            &theme,
        );
        assert_eq!(buf[(0, 0)].symbol(), "▲");
        assert_eq!(buf[(0, 9)].symbol(), "▼");
    }
}
