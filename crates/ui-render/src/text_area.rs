//! Text area: visual layout, scrolling and rendering of the buffer.
//!
//! The scroll position is kept in visual rows, `(top_line, top_row)`, so a
//! logical line longer than the screen can still be scrolled through when
//! word wrap is on. Without wrap every line is a single row and the view
//! also scrolls horizontally by display columns.

use quillcraft_buffer::{
    char_display_width, display_column, row_of_column, visual_rows, TextBuffer, VisualRow,
};
use quillcraft_theme::TextPalette;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Layout options that decide how logical lines become visual rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub tab_width: usize,
    pub word_wrap: bool,
}

impl TextLayout {
    pub fn new(tab_width: usize, word_wrap: bool) -> Self {
        Self {
            tab_width,
            word_wrap,
        }
    }

    fn wrap_width(&self, width: usize) -> Option<usize> {
        self.word_wrap.then_some(width)
    }

    /// Chars and visual rows of `line` for a text area `width` columns wide
    pub fn line_rows(
        &self,
        buffer: &TextBuffer,
        line: usize,
        width: usize,
    ) -> (Vec<char>, Vec<VisualRow>) {
        let chars = buffer.line_chars(line);
        let rows = visual_rows(&chars, self.wrap_width(width), self.tab_width);
        (chars, rows)
    }

    fn row_count(&self, buffer: &TextBuffer, line: usize, width: usize) -> usize {
        if self.word_wrap {
            self.line_rows(buffer, line, width).1.len()
        } else {
            1
        }
    }

    /// Number of visual rows in the whole document
    pub fn total_rows(&self, buffer: &TextBuffer, width: usize) -> usize {
        (0..buffer.line_count())
            .map(|line| self.row_count(buffer, line, width))
            .sum()
    }

    /// Display width of the widest line
    pub fn content_width(&self, buffer: &TextBuffer) -> usize {
        (0..buffer.line_count())
            .map(|line| {
                let chars = buffer.line_chars(line);
                display_column(&chars, chars.len(), self.tab_width)
            })
            .max()
            .unwrap_or(0)
    }

    /// Display column of char column `col` within its visual row
    fn column_x(&self, chars: &[char], row: VisualRow, col: usize) -> usize {
        display_column(&chars[row.start..], col - row.start, self.tab_width)
    }
}

/// One visual row on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRow {
    pub line: usize,
    pub row: VisualRow,
}

/// Scroll position of the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First logical line on screen
    pub top_line: usize,
    /// First visual row of `top_line` on screen
    pub top_row: usize,
    /// Horizontal offset in display columns (no-wrap mode only)
    pub left_column: usize,
}

impl Viewport {
    /// Keep the scroll position inside the document, e.g. after the text
    /// was replaced or the wrap width changed
    pub fn clamp(&mut self, buffer: &TextBuffer, layout: &TextLayout, width: usize) {
        self.top_line = self.top_line.min(buffer.line_count().saturating_sub(1));
        let rows = layout.row_count(buffer, self.top_line, width);
        self.top_row = self.top_row.min(rows.saturating_sub(1));
        if layout.word_wrap {
            self.left_column = 0;
        }
    }

    /// Visual rows visible in `area`, top to bottom
    pub fn screen_rows(&self, buffer: &TextBuffer, layout: &TextLayout, area: Rect) -> Vec<ScreenRow> {
        let width = area.width as usize;
        let mut out = Vec::with_capacity(area.height as usize);
        let mut line = self.top_line;
        let mut skip = self.top_row;

        while out.len() < area.height as usize && line < buffer.line_count() {
            let (_, rows) = layout.line_rows(buffer, line, width);
            for row in rows.into_iter().skip(skip) {
                if out.len() == area.height as usize {
                    break;
                }
                out.push(ScreenRow { line, row });
            }
            skip = 0;
            line += 1;
        }
        out
    }

    /// Scroll so that the caret is inside `area`
    pub fn ensure_caret_visible(&mut self, buffer: &TextBuffer, layout: &TextLayout, area: Rect) {
        let width = area.width as usize;
        let height = area.height as usize;
        if width == 0 || height == 0 {
            return;
        }
        self.clamp(buffer, layout, width);

        let cursor = buffer.cursor();
        let (chars, rows) = layout.line_rows(buffer, cursor.line, width);
        let row = row_of_column(&rows, cursor.column);

        if (cursor.line, row) < (self.top_line, self.top_row) {
            self.top_line = cursor.line;
            self.top_row = row;
        } else if self.rows_between(buffer, layout, width, cursor.line, row, height) >= height {
            let (line, row) = retreat(buffer, layout, width, (cursor.line, row), height - 1);
            self.top_line = line;
            self.top_row = row;
        }

        if !layout.word_wrap {
            let x = layout.column_x(&chars, rows[0], cursor.column);
            if x < self.left_column {
                self.left_column = x;
            } else if x >= self.left_column + width {
                self.left_column = x + 1 - width;
            }
        }
    }

    /// Visual rows from the top of the view down to `(line, row)`,
    /// counting stops once `limit` is reached
    fn rows_between(
        &self,
        buffer: &TextBuffer,
        layout: &TextLayout,
        width: usize,
        line: usize,
        row: usize,
        limit: usize,
    ) -> usize {
        if line == self.top_line {
            return row.saturating_sub(self.top_row);
        }
        let mut count = layout
            .row_count(buffer, self.top_line, width)
            .saturating_sub(self.top_row);
        for l in self.top_line + 1..line {
            if count >= limit {
                return count;
            }
            count += layout.row_count(buffer, l, width);
        }
        count + row
    }

    /// Scroll by `delta` visual rows, never past the first or last row
    pub fn scroll_rows(&mut self, buffer: &TextBuffer, layout: &TextLayout, area: Rect, delta: isize) {
        let width = area.width as usize;
        let start = (self.top_line, self.top_row);
        let (line, row) = if delta < 0 {
            retreat(buffer, layout, width, start, delta.unsigned_abs())
        } else {
            advance(buffer, layout, width, start, delta as usize)
        };
        self.top_line = line;
        self.top_row = row;
    }

    /// Scroll horizontally by `delta` columns (no-wrap mode)
    pub fn scroll_columns(&mut self, buffer: &TextBuffer, layout: &TextLayout, area: Rect, delta: isize) {
        if layout.word_wrap {
            self.left_column = 0;
            return;
        }
        let max = layout
            .content_width(buffer)
            .saturating_sub(area.width as usize / 2);
        self.left_column = self.left_column.saturating_add_signed(delta).min(max);
    }

    /// Jump so that visual row `target` of the document is at the top
    pub fn scroll_to_row(&mut self, buffer: &TextBuffer, layout: &TextLayout, area: Rect, target: usize) {
        *self = Viewport {
            left_column: self.left_column,
            ..Viewport::default()
        };
        self.scroll_rows(buffer, layout, area, target as isize);
    }

    /// Index of the first visual row on screen, counted from the document start
    pub fn first_visible_row(&self, buffer: &TextBuffer, layout: &TextLayout, width: usize) -> usize {
        (0..self.top_line)
            .map(|line| layout.row_count(buffer, line, width))
            .sum::<usize>()
            + self.top_row
    }

    /// Char offset under a screen cell inside `area`.
    ///
    /// Clicks right of a row's text land at the row end; clicks below the
    /// text land at the end of the document.
    pub fn char_at(
        &self,
        buffer: &TextBuffer,
        layout: &TextLayout,
        area: Rect,
        column: u16,
        row: u16,
    ) -> usize {
        let rows = self.screen_rows(buffer, layout, area);
        let index = row.saturating_sub(area.y) as usize;
        let Some(screen_row) = rows.get(index) else {
            return buffer.len_chars();
        };

        let chars = buffer.line_chars(screen_row.line);
        let visual = screen_row.row;
        let target_x = column.saturating_sub(area.x) as usize
            + if layout.word_wrap { 0 } else { self.left_column };

        let mut x = 0;
        let mut col = visual.start;
        while col < visual.end {
            let w = char_display_width(chars[col], x, layout.tab_width);
            if target_x < x + w.max(1) {
                // Right half of a wide cell goes after the char
                if target_x >= x + w.div_ceil(2) && w > 1 {
                    col += 1;
                }
                break;
            }
            x += w;
            col += 1;
        }
        // The end of a wrapped row belongs to the next row
        if col == visual.end && visual.end < chars.len() && col > visual.start {
            col -= 1;
        }
        buffer.line_start(screen_row.line) + col
    }
}

fn advance(
    buffer: &TextBuffer,
    layout: &TextLayout,
    width: usize,
    (mut line, mut row): (usize, usize),
    mut n: usize,
) -> (usize, usize) {
    let last_line = buffer.line_count().saturating_sub(1);
    while n > 0 {
        let rows = layout.row_count(buffer, line, width);
        if row + 1 < rows {
            let step = n.min(rows - 1 - row);
            row += step;
            n -= step;
        } else if line < last_line {
            line += 1;
            row = 0;
            n -= 1;
        } else {
            break;
        }
    }
    (line, row)
}

fn retreat(
    buffer: &TextBuffer,
    layout: &TextLayout,
    width: usize,
    (mut line, mut row): (usize, usize),
    mut n: usize,
) -> (usize, usize) {
    while n > 0 {
        if row > 0 {
            let step = n.min(row);
            row -= step;
            n -= step;
        } else if line > 0 {
            line -= 1;
            row = layout.row_count(buffer, line, width).saturating_sub(1);
            n -= 1;
        } else {
            break;
        }
    }
    (line, row)
}

/// Everything needed to draw the text area
pub struct TextArea<'a> {
    pub buffer: &'a TextBuffer,
    pub layout: TextLayout,
    pub palette: TextPalette,
    pub viewport: Viewport,
    /// Draw the caret (hidden while a menu or dialog has focus)
    pub show_caret: bool,
}

impl TextArea<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().fg(self.palette.fg).bg(self.palette.bg);
        buf.set_style(area, base);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let selected = Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.selection_bg);
        let caret_style = Style::default().fg(self.palette.bg).bg(self.palette.cursor);

        let selection = self.buffer.selection();
        let caret = self.buffer.caret();
        let left = if self.layout.word_wrap {
            0
        } else {
            self.viewport.left_column
        };
        let right = area.x + area.width;

        let rows = self.viewport.screen_rows(self.buffer, &self.layout, area);
        let mut cached: Option<(usize, Vec<char>, usize)> = None;

        for (i, screen_row) in rows.iter().enumerate() {
            let y = area.y + i as u16;
            if cached.as_ref().map(|(line, _, _)| *line) != Some(screen_row.line) {
                cached = Some((
                    screen_row.line,
                    self.buffer.line_chars(screen_row.line),
                    self.buffer.line_start(screen_row.line),
                ));
            }
            let Some((_, chars, line_start)) = cached.as_ref() else {
                continue;
            };

            let mut x = 0usize;
            for col in screen_row.row.start..screen_row.row.end {
                let c = chars[col];
                let w = char_display_width(c, x, self.layout.tab_width);
                let offset = line_start + col;

                let style = if self.show_caret && offset == caret {
                    caret_style
                } else if selection.is_some_and(|sel| sel.contains(offset)) {
                    selected
                } else {
                    base
                };

                if x >= left && w > 0 {
                    let screen_x = area.x + (x - left) as u16;
                    if screen_x >= right {
                        break;
                    }
                    if c == '\t' || c.is_control() {
                        let cells = (w as u16).min(right - screen_x);
                        buf.set_string(screen_x, y, " ".repeat(cells as usize), style);
                    } else if screen_x + w as u16 <= right {
                        buf.set_string(screen_x, y, c.to_string(), style);
                    }
                }
                x += w;
            }

            // Selected line breaks are drawn as one selected cell
            let line_end = line_start + chars.len();
            let at_row_end = screen_row.row.end == chars.len();
            if at_row_end && x >= left {
                let screen_x = area.x + (x - left) as u16;
                if screen_x < right {
                    let style = if self.show_caret && caret == line_end {
                        Some(caret_style)
                    } else if selection.is_some_and(|sel| sel.contains(line_end))
                        && line_end < self.buffer.len_chars()
                    {
                        Some(selected)
                    } else {
                        None
                    };
                    if let Some(style) = style {
                        buf.set_string(screen_x, y, " ", style);
                    }
                }
            }
        }
    }
}
