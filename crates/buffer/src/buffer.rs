use anyhow::{bail, Context, Result};
use ropey::{Rope, RopeSlice};
use std::ops::Range;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

use crate::{find_first, Action, Cursor, History, Selection};

/// Editable document text: rope storage plus caret, selection and history.
///
/// All positions are char offsets into the rope. The caret lies in
/// `0..=len_chars()`; a selection, when present, is never empty and its
/// active end is the caret.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    history: History,
    caret: usize,
    selection: Option<Selection>,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            history: History::new(),
            caret: 0,
            selection: None,
        }
    }

    /// Create buffer holding `text` with an empty history
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::new()
        }
    }

    /// Replace the contents with the file at `path`, read as UTF-8.
    ///
    /// On a read or decode error the buffer is left untouched.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        self.set_text(&contents);
        Ok(())
    }

    /// Write the exact buffer contents to `path`, truncating it
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.rope.to_string())
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get line count (an empty buffer has one line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Length of a line in chars, excluding its line break
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line);
        slice.len_chars() - line_break_len(slice)
    }

    /// Chars of a line, excluding its line break
    pub fn line_chars(&self, line: usize) -> Vec<char> {
        if line >= self.line_count() {
            return Vec::new();
        }
        let len = self.line_len(line);
        self.rope.line(line).chars().take(len).collect()
    }

    /// Char offset where `line` starts
    pub fn line_start(&self, line: usize) -> usize {
        self.rope
            .line_to_char(line.min(self.line_count().saturating_sub(1)))
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Caret as line/column
    pub fn cursor(&self) -> Cursor {
        self.char_to_cursor(self.caret)
    }

    pub fn char_to_cursor(&self, idx: usize) -> Cursor {
        let idx = idx.min(self.len_chars());
        let line = self.rope.char_to_line(idx);
        Cursor::at(line, idx - self.rope.line_to_char(line))
    }

    /// Char offset for a line/column, clamped into the buffer
    pub fn cursor_to_char(&self, cursor: Cursor) -> usize {
        let line = cursor.line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line) + cursor.column.min(self.line_len(line))
    }

    /// Current non-empty selection
    pub fn selection(&self) -> Option<Selection> {
        self.selection.filter(|sel| !sel.is_empty())
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection()
            .map(|sel| self.rope.slice(sel.range()).to_string())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Select `range` and put the caret at its end
    pub fn select_range(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        self.history.commit_pending();
        self.selection = Some(Selection::new(start, end));
        self.caret = end;
    }

    pub fn select_all(&mut self) {
        self.select_range(0..self.len_chars());
    }

    /// Move the caret to `idx`; with `extend` the selection grows from its
    /// anchor (or from the old caret), otherwise it is cleared
    pub fn set_caret(&mut self, idx: usize, extend: bool) {
        let idx = idx.min(self.len_chars());
        self.history.commit_pending();
        self.selection = if extend {
            let anchor = self.selection.map_or(self.caret, |sel| sel.anchor);
            Some(Selection::new(anchor, idx))
        } else {
            None
        };
        self.caret = idx;
    }

    pub fn move_left(&mut self, extend: bool) {
        let target = self.prev_grapheme_boundary(self.caret);
        self.set_caret(target, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        let target = self.next_grapheme_boundary(self.caret);
        self.set_caret(target, extend);
    }

    pub fn move_up(&mut self, lines: usize, extend: bool) {
        let cursor = self.cursor();
        let target = if cursor.line == 0 {
            0
        } else {
            self.cursor_to_char(Cursor::at(cursor.line.saturating_sub(lines), cursor.column))
        };
        self.set_caret(target, extend);
    }

    pub fn move_down(&mut self, lines: usize, extend: bool) {
        let cursor = self.cursor();
        let last_line = self.line_count().saturating_sub(1);
        let target = if cursor.line >= last_line {
            self.len_chars()
        } else {
            self.cursor_to_char(Cursor::at(cursor.line + lines, cursor.column))
        };
        self.set_caret(target, extend);
    }

    pub fn move_line_start(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.set_caret(self.line_start(line), extend);
    }

    pub fn move_line_end(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.set_caret(self.line_start(line) + self.line_len(line), extend);
    }

    pub fn move_doc_start(&mut self, extend: bool) {
        self.set_caret(0, extend);
    }

    pub fn move_doc_end(&mut self, extend: bool) {
        self.set_caret(self.len_chars(), extend);
    }

    /// Insert `text` at the caret, replacing the selection if there is one
    pub fn insert_text(&mut self, text: &str) {
        let removed = self.remove_selection();
        let inserted = if text.is_empty() {
            None
        } else {
            let at = self.caret;
            self.rope.insert(at, text);
            self.caret = at + text.chars().count();
            Some(Action::Insert {
                at,
                text: text.to_string(),
            })
        };

        match (removed, inserted) {
            (Some(removed), Some(inserted)) => self.record_group(vec![removed, inserted]),
            (Some(removed), None) => self.record_group(vec![removed]),
            (None, Some(inserted)) => self.history.push(inserted),
            (None, None) => {}
        }
    }

    /// Delete the selection, or the grapheme before the caret
    pub fn backspace(&mut self) -> bool {
        if let Some(removed) = self.remove_selection() {
            self.record_group(vec![removed]);
            return true;
        }
        if self.caret == 0 {
            return false;
        }
        let start = self.prev_grapheme_boundary(self.caret);
        self.remove_range(start..self.caret);
        true
    }

    /// Delete the selection, or the grapheme after the caret
    pub fn delete_forward(&mut self) -> bool {
        if let Some(removed) = self.remove_selection() {
            self.record_group(vec![removed]);
            return true;
        }
        if self.caret >= self.len_chars() {
            return false;
        }
        let end = self.next_grapheme_boundary(self.caret);
        self.remove_range(self.caret..end);
        true
    }

    /// Remove the selection and return its text
    pub fn delete_selection(&mut self) -> Option<String> {
        let removed = self.remove_selection()?;
        let text = match &removed {
            Action::Delete { text, .. } => text.clone(),
            _ => String::new(),
        };
        self.record_group(vec![removed]);
        Some(text)
    }

    /// Replace the whole contents as one undoable step.
    ///
    /// Clears the selection and puts the caret at the start.
    pub fn set_text(&mut self, text: &str) {
        let old = self.rope.to_string();
        self.selection = None;
        self.caret = 0;
        if old == text {
            return;
        }

        let mut actions = Vec::new();
        if !old.is_empty() {
            actions.push(Action::Delete { at: 0, text: old });
        }
        if !text.is_empty() {
            actions.push(Action::Insert {
                at: 0,
                text: text.to_string(),
            });
        }
        self.rope = Rope::from_str(text);
        self.record_group(actions);
    }

    /// First literal occurrence of `query`, searching from the buffer start
    pub fn find(&self, query: &str) -> Option<Range<usize>> {
        find_first(&self.text(), query)
    }

    /// Revert the last edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(action) = self.history.undo() else {
            return Ok(false);
        };
        self.caret = self.apply_action(&action)?;
        self.selection = None;
        Ok(true)
    }

    /// Replay the last undone edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(action) = self.history.redo() else {
            return Ok(false);
        };
        self.caret = self.apply_action(&action)?;
        self.selection = None;
        Ok(true)
    }

    fn remove_selection(&mut self) -> Option<Action> {
        let range = self.selection.take().filter(|sel| !sel.is_empty())?.range();
        let text = self.rope.slice(range.clone()).to_string();
        self.rope.remove(range.clone());
        self.caret = range.start;
        Some(Action::Delete {
            at: range.start,
            text,
        })
    }

    fn remove_range(&mut self, range: Range<usize>) {
        let text = self.rope.slice(range.clone()).to_string();
        self.rope.remove(range.clone());
        self.caret = range.start;
        self.history.push(Action::Delete {
            at: range.start,
            text,
        });
    }

    fn record_group(&mut self, actions: Vec<Action>) {
        if actions.is_empty() {
            return;
        }
        self.history.commit_pending();
        self.history.push(Action::Group { actions });
        self.history.commit_pending();
    }

    /// Apply action to rope (for undo/redo), returning the caret after it
    fn apply_action(&mut self, action: &Action) -> Result<usize> {
        match action {
            Action::Insert { at, text } => {
                if *at > self.rope.len_chars() {
                    bail!("Insert position {} out of range", at);
                }
                self.rope.insert(*at, text);
                Ok(at + text.chars().count())
            }
            Action::Delete { at, text } => {
                let end = at + text.chars().count();
                if end > self.rope.len_chars() {
                    bail!("Delete range {}..{} out of range", at, end);
                }
                self.rope.remove(*at..end);
                Ok(*at)
            }
            Action::Group { actions } => {
                let mut caret = self.caret;
                for action in actions {
                    caret = self.apply_action(action)?;
                }
                Ok(caret)
            }
        }
    }

    fn prev_grapheme_boundary(&self, idx: usize) -> usize {
        if idx == 0 {
            return 0;
        }
        let line = self.rope.char_to_line(idx - 1);
        let mut offset = self.rope.line_to_char(line);
        let mut prev = offset;
        for grapheme in self.rope.line(line).to_string().graphemes(true) {
            if offset >= idx {
                break;
            }
            prev = offset;
            offset += grapheme.chars().count();
        }
        prev
    }

    fn next_grapheme_boundary(&self, idx: usize) -> usize {
        let len = self.len_chars();
        if idx >= len {
            return len;
        }
        let line = self.rope.char_to_line(idx);
        let mut offset = self.rope.line_to_char(line);
        for grapheme in self.rope.line(line).to_string().graphemes(true) {
            offset += grapheme.chars().count();
            if offset > idx {
                return offset;
            }
        }
        idx + 1
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of trailing chars forming the line break of a rope line
fn line_break_len(line: RopeSlice) -> usize {
    let n = line.len_chars();
    if n == 0 {
        return 0;
    }
    match line.char(n - 1) {
        '\n' if n >= 2 && line.char(n - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(!buf.clone().undo().unwrap());
    }

    #[test]
    fn test_typing_advances_caret() {
        let mut buf = TextBuffer::new();
        buf.insert_text("a");
        buf.insert_text("b");
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.caret(), 2);
    }

    #[test]
    fn test_insert_newline() {
        let mut buf = TextBuffer::new();
        buf.insert_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
        assert_eq!(buf.line_chars(0), "hello".chars().collect::<Vec<_>>());
        assert_eq!(buf.line_len(1), 5);
    }

    #[test]
    fn test_crlf_lines_exclude_break() {
        let buf = TextBuffer::from_text("ab\r\ncd\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_len(0), 2);
        assert_eq!(buf.line_len(1), 2);
        assert_eq!(buf.line_len(2), 0);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_doc_end(false);
        assert!(buf.backspace());
        assert_eq!(buf.text(), "hell");

        buf.move_doc_start(false);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "ell");

        buf.move_doc_start(false);
        assert!(!buf.backspace());
    }

    #[test]
    fn test_moves_step_over_crlf() {
        let mut buf = TextBuffer::from_text("a\r\nb");
        buf.set_caret(1, false);
        buf.move_right(false);
        assert_eq!(buf.caret(), 3);
        buf.move_left(false);
        assert_eq!(buf.caret(), 1);
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut buf = TextBuffer::from_text("long line\nab\nlonger line");
        buf.set_caret(7, false);
        buf.move_down(1, false);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
        buf.move_down(1, false);
        assert_eq!(buf.cursor(), Cursor::at(2, 2));
        buf.move_down(1, false);
        assert_eq!(buf.caret(), buf.len_chars());
        buf.move_up(5, false);
        assert_eq!(buf.cursor().line, 0);
    }

    #[test]
    fn test_shift_moves_extend_selection() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_right(true);
        buf.move_right(true);
        assert_eq!(buf.selected_text().as_deref(), Some("he"));
        buf.move_left(false);
        assert!(buf.selection().is_none());
    }

    #[test]
    fn test_insert_replaces_selection_as_one_undo_step() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.select_range(0..5);
        buf.insert_text("bye");
        assert_eq!(buf.text(), "bye world");
        assert_eq!(buf.caret(), 3);

        assert!(buf.undo().unwrap());
        assert_eq!(buf.text(), "hello world");
        assert!(!buf.undo().unwrap());
    }

    #[test]
    fn test_typing_run_undoes_together() {
        let mut buf = TextBuffer::new();
        for c in ["a", "b", "c"] {
            buf.insert_text(c);
        }
        assert!(buf.undo().unwrap());
        assert_eq!(buf.text(), "");
        assert!(buf.redo().unwrap());
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.caret(), 3);
    }

    #[test]
    fn test_undo_redo_on_empty_history() {
        let mut buf = TextBuffer::from_text("text");
        assert!(!buf.undo().unwrap());
        assert!(!buf.redo().unwrap());
        assert_eq!(buf.text(), "text");
    }

    #[test]
    fn test_delete_selection_returns_text() {
        let mut buf = TextBuffer::from_text("cut me");
        buf.select_range(0..4);
        assert_eq!(buf.delete_selection().as_deref(), Some("cut "));
        assert_eq!(buf.text(), "me");
        assert!(buf.delete_selection().is_none());
    }

    #[test]
    fn test_set_text_is_undoable() {
        let mut buf = TextBuffer::from_text("old");
        buf.set_text("new text");
        assert_eq!(buf.text(), "new text");
        assert_eq!(buf.caret(), 0);

        assert!(buf.undo().unwrap());
        assert_eq!(buf.text(), "old");
        assert!(buf.redo().unwrap());
        assert_eq!(buf.text(), "new text");
    }

    #[test]
    fn test_find_selects_nothing_by_itself() {
        let buf = TextBuffer::from_text("xxfooyy");
        assert_eq!(buf.find("foo"), Some(2..5));
        assert_eq!(buf.text(), "xxfooyy");
        assert!(buf.selection().is_none());
    }

    #[test]
    fn test_select_range_puts_caret_at_end() {
        let mut buf = TextBuffer::from_text("xxfooyy");
        buf.select_range(2..5);
        assert_eq!(buf.selection().map(|s| s.range()), Some(2..5));
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn test_cursor_conversions_clamp() {
        let buf = TextBuffer::from_text("ab\ncdef");
        assert_eq!(buf.cursor_to_char(Cursor::at(0, 10)), 2);
        assert_eq!(buf.cursor_to_char(Cursor::at(9, 1)), 4);
        assert_eq!(buf.char_to_cursor(5), Cursor::at(1, 2));
        assert_eq!(buf.char_to_cursor(99), Cursor::at(1, 4));
    }

    #[test]
    fn test_save_load_cycle_is_exact() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let text = "line 1\r\nline 2\n\n  trailing  ";

        let buf = TextBuffer::from_text(text);
        buf.save_to(temp_file.path()).unwrap();
        assert_eq!(std::fs::read_to_string(temp_file.path()).unwrap(), text);

        let mut loaded = TextBuffer::new();
        loaded.load_file(temp_file.path()).unwrap();
        assert_eq!(loaded.text(), text);
    }

    #[test]
    fn test_load_missing_file_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = TextBuffer::from_text("keep");
        assert!(buf.load_file(dir.path().join("missing.txt")).is_err());
        assert_eq!(buf.text(), "keep");
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let mut buf = TextBuffer::new();
        assert!(buf.load_file(&path).is_err());
        assert!(buf.is_empty());
    }
}
