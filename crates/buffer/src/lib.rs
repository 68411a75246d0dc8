//! Text buffer with rope data structure for quillcraft.
//!
//! Provides the editable text model behind the text area: rope storage,
//! caret and selection, undo/redo history, literal search and the
//! word-wrap layout used by rendering.

mod buffer;
mod cursor;
mod history;
mod search;
mod wrap;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Selection};
pub use history::{Action, History};
pub use search::{find_first, replace_all_trimmed};
pub use wrap::{
    char_display_width, display_column, is_word_boundary, row_of_column, visual_rows, VisualRow,
};
