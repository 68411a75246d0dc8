use std::cmp::{max, min};
use std::ops::Range;

/// Caret position expressed as line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Line number (0-based)
    pub line: usize,
    /// Position in line in chars (0-based)
    pub column: usize,
}

impl Cursor {
    /// Create cursor at specified position
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

/// Text selection over char offsets.
///
/// The anchor stays where the selection started; the active end follows
/// the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub active: usize,
}

impl Selection {
    pub fn new(anchor: usize, active: usize) -> Self {
        Self { anchor, active }
    }

    /// Start of selection (minimum offset)
    pub fn start(&self) -> usize {
        min(self.anchor, self.active)
    }

    /// End of selection (maximum offset, exclusive)
    pub fn end(&self) -> usize {
        max(self.anchor, self.active)
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Check whether the char at `offset` is covered by the selection
    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }
}
