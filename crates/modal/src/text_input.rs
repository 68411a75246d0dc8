//! Single-line text field used by dialog prompts.

/// Text input handler with cursor management.
///
/// The cursor is tracked in characters, not bytes, so multi-byte input is
/// edited correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    input: String,
    cursor_pos: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field holding `text` with the cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let input = text.into();
        let cursor_pos = input.chars().count();
        Self { input, cursor_pos }
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_pos = self.input.chars().count();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor_pos += 1;
    }

    /// Insert a string at the cursor; line breaks become spaces
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' => self.insert_char(' '),
                c => self.insert_char(c),
            }
        }
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        self.cursor_pos -= 1;
        let byte_idx = self.byte_index();
        self.input.remove(byte_idx);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.input.chars().count() {
            return false;
        }
        let byte_idx = self.byte_index();
        self.input.remove(byte_idx);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        self.cursor_pos -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor_pos >= self.input.chars().count() {
            return false;
        }
        self.cursor_pos += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.input.chars().count();
    }

    pub fn text_before_cursor(&self) -> &str {
        &self.input[..self.byte_index()]
    }

    pub fn text_after_cursor(&self) -> &str {
        &self.input[self.byte_index()..]
    }
}
