//! Visual line layout: word wrapping and tab expansion
//!
//! A logical line is split into visual rows. With wrapping enabled, rows break
//! after the last whitespace that still fits; a word wider than the whole
//! row is force-broken at the row width. Tabs advance to the next multiple
//! of the tab width, measured from the start of the visual row.

use unicode_width::UnicodeWidthChar;

/// One visual row of a logical line, as a char column range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    pub start: usize,
    pub end: usize,
}

impl VisualRow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Check if a character is a word boundary for wrapping
pub fn is_word_boundary(c: char) -> bool {
    c.is_whitespace()
}

/// Display width of `c` when drawn at display column `column`
pub fn char_display_width(c: char, column: usize, tab_width: usize) -> usize {
    if c == '\t' {
        let tab_width = tab_width.max(1);
        return tab_width - column % tab_width;
    }
    c.width().unwrap_or(0)
}

/// Display column of char column `col` within `chars`
pub fn display_column(chars: &[char], col: usize, tab_width: usize) -> usize {
    chars
        .iter()
        .take(col)
        .fold(0, |x, &c| x + char_display_width(c, x, tab_width))
}

/// Split a logical line into visual rows.
///
/// `max_width` of `None` disables wrapping and yields one row. The result is
/// never empty: an empty line is one empty row.
pub fn visual_rows(chars: &[char], max_width: Option<usize>, tab_width: usize) -> Vec<VisualRow> {
    let line_len = chars.len();
    let max_width = match max_width {
        Some(width) if width > 0 => width,
        _ => {
            return vec![VisualRow {
                start: 0,
                end: line_len,
            }]
        }
    };

    let mut rows = Vec::new();
    let mut start = 0;
    loop {
        let end = wrap_point(chars, start, max_width, tab_width);
        rows.push(VisualRow { start, end });
        if end >= line_len {
            break;
        }
        start = end;
    }
    rows
}

/// Index of the visual row holding char column `col`
pub fn row_of_column(rows: &[VisualRow], col: usize) -> usize {
    rows.iter()
        .position(|row| col < row.end)
        .unwrap_or(rows.len().saturating_sub(1))
}

fn wrap_point(chars: &[char], start: usize, max_width: usize, tab_width: usize) -> usize {
    let line_len = chars.len();
    let mut width = 0;
    let mut ideal_end = line_len;

    for (i, &c) in chars.iter().enumerate().skip(start) {
        let w = char_display_width(c, width, tab_width);
        if width + w > max_width {
            ideal_end = i;
            break;
        }
        width += w;
    }

    if ideal_end >= line_len {
        return line_len;
    }

    // Whitespace at the overflow point hangs at the end of the row
    if is_word_boundary(chars[ideal_end]) {
        return ideal_end + 1;
    }

    if let Some(i) = (start + 1..ideal_end)
        .rev()
        .find(|&i| is_word_boundary(chars[i]))
    {
        return i + 1;
    }

    ideal_end.max(start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn spans(s: &str, width: usize) -> Vec<String> {
        let line = chars(s);
        visual_rows(&line, Some(width), 4)
            .iter()
            .map(|row| line[row.start..row.end].iter().collect())
            .collect()
    }

    #[test]
    fn test_no_wrap_needed() {
        let rows = visual_rows(&chars("Short line"), Some(80), 4);
        assert_eq!(rows, vec![VisualRow { start: 0, end: 10 }]);
    }

    #[test]
    fn test_wrap_disabled_keeps_single_row() {
        let line = chars(&"word ".repeat(40));
        let rows = visual_rows(&line, None, 4);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].end, line.len());
    }

    #[test]
    fn test_empty_line_is_one_row() {
        assert_eq!(
            visual_rows(&[], Some(10), 4),
            vec![VisualRow { start: 0, end: 0 }]
        );
    }

    #[test]
    fn test_wrap_at_space() {
        assert_eq!(spans("hello world test", 10), vec!["hello ", "world test"]);
    }

    #[test]
    fn test_long_word_force_break() {
        assert_eq!(
            spans("verylongwordthatcannotbebroken", 10),
            vec!["verylongwo", "rdthatcann", "otbebroken"]
        );
    }

    #[test]
    fn test_punctuation_is_not_a_break() {
        assert_eq!(spans("ab,cd ef", 4), vec!["ab,c", "d ef"]);
    }

    #[test]
    fn test_unicode_words() {
        let rows = spans("Привет мир как дела", 11);
        assert_eq!(rows, vec!["Привет мир ", "как дела"]);
    }

    #[test]
    fn test_wide_chars_count_double() {
        assert_eq!(spans("中文字符", 4), vec!["中文", "字符"]);
    }

    #[test]
    fn test_tab_expands_to_next_stop() {
        assert_eq!(char_display_width('\t', 0, 4), 4);
        assert_eq!(char_display_width('\t', 3, 4), 1);
        assert_eq!(char_display_width('\t', 3, 8), 5);
        assert_eq!(display_column(&chars("a\tb"), 2, 4), 4);
        assert_eq!(display_column(&chars("a\tb"), 2, 2), 2);
    }

    #[test]
    fn test_row_of_column() {
        let rows = visual_rows(&chars("hello world test"), Some(10), 4);
        assert_eq!(row_of_column(&rows, 0), 0);
        assert_eq!(row_of_column(&rows, 5), 0);
        assert_eq!(row_of_column(&rows, 6), 1);
        assert_eq!(row_of_column(&rows, 16), 1);
    }

    #[test]
    fn test_is_word_boundary() {
        assert!(is_word_boundary(' '));
        assert!(is_word_boundary('\t'));
        assert!(!is_word_boundary('.'));
        assert!(!is_word_boundary('a'));
        assert!(!is_word_boundary('ж'));
    }
}
