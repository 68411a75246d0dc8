//! Open / Save As file chooser.
//!
//! Lists one directory at a time (subdirectories first), with a file name
//! field and a file type filter. The filter only narrows which files are
//! listed; a typed name is accepted whatever its extension.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use quillcraft_theme::Theme;

use crate::base::{render_input_field, render_list, render_modal_frame, scroll_to_cursor};
use crate::modal_constants::MAX_LIST_ROWS;
use crate::{
    calculate_modal_width, centered_rect_with_size, contains, Modal, ModalResult,
    ModalWidthConfig, TextInput,
};

const PARENT_ENTRY: &str = "..";

/// Named extension group offered by the chooser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    /// `*.*` or `*.ext`
    pub pattern: &'static str,
}

impl FileFilter {
    pub fn matches(&self, file_name: &str) -> bool {
        match self.pattern.strip_prefix("*.") {
            Some("*") | None => true,
            Some(ext) => Path::new(file_name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == ext),
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.pattern)
    }
}

/// Filters in the order the chooser cycles through them
pub const FILE_FILTERS: [FileFilter; 10] = [
    FileFilter { name: "All files", pattern: "*.*" },
    FileFilter { name: "Text files", pattern: "*.txt" },
    FileFilter { name: "Python files", pattern: "*.py" },
    FileFilter { name: "Java files", pattern: "*.java" },
    FileFilter { name: "HTML files", pattern: "*.html" },
    FileFilter { name: "CSS files", pattern: "*.css" },
    FileFilter { name: "JavaScript files", pattern: "*.js" },
    FileFilter { name: "JSON files", pattern: "*.json" },
    FileFilter { name: "SQL files", pattern: "*.db" },
    FileFilter { name: "Bash Script files", pattern: "*.sh" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogMode {
    Open,
    Save,
}

impl FileDialogMode {
    fn title(self) -> &'static str {
        match self {
            FileDialogMode::Open => "Open",
            FileDialogMode::Save => "Save As",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    FileName,
    Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    is_dir: bool,
}

impl Entry {
    fn label(&self) -> String {
        if self.is_dir && self.name != PARENT_ENTRY {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug)]
pub struct FileDialog {
    mode: FileDialogMode,
    dir: PathBuf,
    entries: Vec<Entry>,
    cursor: usize,
    scroll: usize,
    file_name: TextInput,
    focus: Focus,
    filter: usize,
    error: Option<String>,
    last_list_area: Option<Rect>,
}

impl FileDialog {
    /// Create a chooser listing `dir`
    pub fn new(mode: FileDialogMode, dir: impl Into<PathBuf>) -> Self {
        let mut dialog = Self {
            mode,
            dir: dir.into(),
            entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            file_name: TextInput::new(),
            focus: match mode {
                FileDialogMode::Open => Focus::List,
                FileDialogMode::Save => Focus::FileName,
            },
            filter: 0,
            error: None,
            last_list_area: None,
        };
        dialog.refresh();
        dialog
    }

    /// Prefill the file name field
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name.set_text(name);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filter(&self) -> FileFilter {
        FILE_FILTERS[self.filter]
    }

    /// Reload the listing of the current directory
    fn refresh(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
        match read_entries(&self.dir, self.filter()) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                self.entries = Vec::new();
                self.error = Some(format!("{:#}", e));
            }
        }
        if self.dir.parent().is_some() {
            self.entries.insert(
                0,
                Entry {
                    name: PARENT_ENTRY.to_string(),
                    is_dir: true,
                },
            );
        }
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }

    fn go_parent(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.change_dir(parent);
        }
    }

    fn cycle_filter(&mut self, forward: bool) {
        let len = FILE_FILTERS.len();
        self.filter = if forward {
            (self.filter + 1) % len
        } else {
            (self.filter + len - 1) % len
        };
        self.refresh();
    }

    fn move_cursor(&mut self, cursor: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = cursor.min(self.entries.len() - 1);
        self.scroll = scroll_to_cursor(self.cursor, self.scroll, MAX_LIST_ROWS);
        let entry = &self.entries[self.cursor];
        if !entry.is_dir {
            self.file_name.set_text(entry.name.clone());
        }
    }

    /// Open the highlighted directory or choose the highlighted file
    fn activate(&mut self) -> Option<ModalResult<PathBuf>> {
        let entry = self.entries.get(self.cursor)?.clone();
        if entry.name == PARENT_ENTRY {
            self.go_parent();
            None
        } else if entry.is_dir {
            self.change_dir(self.dir.join(&entry.name));
            None
        } else {
            Some(ModalResult::Confirmed(self.dir.join(&entry.name)))
        }
    }

    /// Resolve the typed name against the current directory
    fn submit_file_name(&mut self) -> Option<ModalResult<PathBuf>> {
        let name = self.file_name.text().trim();
        if name.is_empty() {
            return None;
        }
        let path = self.dir.join(name);

        if path.is_dir() {
            self.file_name.clear();
            self.change_dir(path);
            return None;
        }

        match self.mode {
            FileDialogMode::Open if !path.is_file() => {
                self.error = Some(format!("File not found: {}", path.display()));
                None
            }
            FileDialogMode::Save if !path.parent().is_some_and(Path::is_dir) => {
                self.error = Some(format!("Directory not found: {}", path.display()));
                None
            }
            _ => Some(ModalResult::Confirmed(path)),
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (Focus::List, true) | (Focus::Filter, false) => Focus::FileName,
            (Focus::FileName, true) | (Focus::List, false) => Focus::Filter,
            (Focus::Filter, true) | (Focus::FileName, false) => Focus::List,
        };
    }

    fn edit_file_name(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.file_name.insert_char(c);
            }
            KeyCode::Backspace => {
                self.file_name.backspace();
            }
            KeyCode::Delete => {
                self.file_name.delete();
            }
            KeyCode::Left => {
                self.file_name.move_left();
            }
            KeyCode::Right => {
                self.file_name.move_right();
            }
            KeyCode::Home => self.file_name.move_home(),
            KeyCode::End => self.file_name.move_end(),
            _ => {}
        }
    }

    fn label_style(&self, theme: &Theme, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default()
                .fg(theme.accented_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.bg)
        }
    }
}

/// Subdirectories then files accepted by `filter`, each sorted by name.
/// Dot-files are skipped.
fn read_entries(dir: &Path, filter: FileFilter) -> Result<Vec<Entry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let read_dir =
        fs::read_dir(dir).with_context(|| format!("Cannot list {}", dir.display()))?;
    for item in read_dir.flatten() {
        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        // Follows symlinks so linked directories can be entered
        let is_dir = item.path().is_dir();
        if is_dir {
            dirs.push(Entry { name, is_dir });
        } else if filter.matches(&name) {
            files.push(Entry { name, is_dir });
        }
    }

    dirs.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());
    dirs.extend(files);
    Ok(dirs)
}

impl Modal for FileDialog {
    type Result = PathBuf;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let modal_width = calculate_modal_width(
            [self.dir.display().to_string().len() as u16 + 12, 60].into_iter(),
            area.width,
            ModalWidthConfig::wide(),
        );
        // borders + directory + list + name + type + message
        let modal_height = (MAX_LIST_ROWS as u16 + 6).min(area.height);
        let modal_area = centered_rect_with_size(modal_width, modal_height, area);
        let inner = render_modal_frame(modal_area, buf, theme, self.mode.title());
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(MAX_LIST_ROWS as u16),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(format!("Directory: {}", self.dir.display()))
            .style(Style::default().fg(theme.bg))
            .render(chunks[0], buf);

        let labels: Vec<String> = self.entries.iter().map(Entry::label).collect();
        let cursor = if self.focus == Focus::List {
            self.cursor
        } else {
            usize::MAX
        };
        render_list(buf, chunks[1], &labels, cursor, self.scroll, theme);
        self.last_list_area = Some(chunks[1]);

        let label_width = 11u16;
        let name_label = self.label_style(theme, Focus::FileName);
        if chunks[2].height > 0 {
            buf.set_string(chunks[2].x, chunks[2].y, "File name: ", name_label);
        }
        let field = Rect {
            x: chunks[2].x + label_width,
            width: chunks[2].width.saturating_sub(label_width),
            ..chunks[2]
        };
        render_input_field(
            buf,
            field,
            &self.file_name,
            self.focus == Focus::FileName,
            theme,
        );

        let type_label = self.label_style(theme, Focus::Filter);
        if chunks[3].height > 0 {
            buf.set_string(chunks[3].x, chunks[3].y, "Type:      ", type_label);
            buf.set_stringn(
                chunks[3].x + label_width,
                chunks[3].y,
                format!("< {} >", self.filter().label()),
                chunks[3].width.saturating_sub(label_width) as usize,
                type_label,
            );
        }

        let (message, style) = match &self.error {
            Some(error) => (error.clone(), Style::default().fg(theme.error)),
            None => (
                "Tab: next field  Enter: choose  Esc: cancel".to_string(),
                Style::default().fg(theme.disabled),
            ),
        };
        Paragraph::new(message).style(style).render(chunks[4], buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(ModalResult::Cancelled)),
            KeyCode::Tab => {
                self.cycle_focus(true);
                return Ok(None);
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return Ok(None);
            }
            _ => {}
        }

        let result = match self.focus {
            Focus::List => match key.code {
                KeyCode::Enter => self.activate(),
                KeyCode::Up => {
                    self.move_cursor(self.cursor.saturating_sub(1));
                    None
                }
                KeyCode::Down => {
                    self.move_cursor(self.cursor + 1);
                    None
                }
                KeyCode::PageUp => {
                    self.move_cursor(self.cursor.saturating_sub(MAX_LIST_ROWS));
                    None
                }
                KeyCode::PageDown => {
                    self.move_cursor(self.cursor + MAX_LIST_ROWS);
                    None
                }
                KeyCode::Home => {
                    self.move_cursor(0);
                    None
                }
                KeyCode::End => {
                    self.move_cursor(usize::MAX);
                    None
                }
                KeyCode::Backspace => {
                    self.go_parent();
                    None
                }
                KeyCode::Char(_) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    // Typing jumps to the name field
                    self.focus = Focus::FileName;
                    self.file_name.clear();
                    self.edit_file_name(key);
                    None
                }
                _ => None,
            },
            Focus::FileName => match key.code {
                KeyCode::Enter => self.submit_file_name(),
                KeyCode::Up | KeyCode::Down => {
                    self.focus = Focus::List;
                    None
                }
                _ => {
                    self.edit_file_name(key);
                    None
                }
            },
            Focus::Filter => match key.code {
                KeyCode::Left | KeyCode::Up => {
                    self.cycle_filter(false);
                    None
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                    self.cycle_filter(true);
                    None
                }
                KeyCode::Enter => self.submit_file_name(),
                _ => None,
            },
        };
        Ok(result)
    }

    fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        _modal_area: Rect,
    ) -> Result<Option<ModalResult<Self::Result>>> {
        let Some(list_area) = self.last_list_area else {
            return Ok(None);
        };
        if !contains(list_area, mouse.column, mouse.row) {
            return Ok(None);
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => self.move_cursor(self.cursor.saturating_sub(1)),
            MouseEventKind::ScrollDown => self.move_cursor(self.cursor + 1),
            MouseEventKind::Down(MouseButton::Left) => {
                let clicked = self.scroll + (mouse.row - list_area.y) as usize;
                if clicked < self.entries.len() {
                    // A second click on the highlighted row opens it
                    let again = self.focus == Focus::List && clicked == self.cursor;
                    self.focus = Focus::List;
                    self.move_cursor(clicked);
                    if again {
                        return Ok(self.activate());
                    }
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_paste(&mut self, text: &str) {
        self.focus = Focus::FileName;
        self.file_name.insert_str(text.trim());
    }
}
