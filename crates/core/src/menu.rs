//! Menu bar structure: File, Edit, Format, Help.

use crate::{Command, TabWidth, ThemeKind};

/// Executable menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: Command,
    /// Shortcut hint shown next to the label
    pub accelerator: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
    Submenu {
        label: &'static str,
        entries: Vec<MenuEntry>,
    },
}

impl MenuEntry {
    /// Whether the entry can be highlighted (separators cannot)
    pub fn is_selectable(&self) -> bool {
        !matches!(self, MenuEntry::Separator)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Item(item) => item.label,
            MenuEntry::Submenu { label, .. } => *label,
            MenuEntry::Separator => "",
        }
    }
}

/// Top-level menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    /// Lowercase letter opening the menu together with Alt
    pub mnemonic: char,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    /// Indices of entries that can be highlighted
    pub fn selectable_indices(&self) -> Vec<usize> {
        selectable_indices(&self.entries)
    }
}

pub fn selectable_indices(entries: &[MenuEntry]) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_selectable())
        .map(|(i, _)| i)
        .collect()
}

/// Position of the highlight while the menu bar is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    /// Index of the open top-level menu
    pub menu: usize,
    /// Highlighted entry of the dropdown
    pub item: usize,
    /// Highlighted entry of the open submenu, if any
    pub submenu_item: Option<usize>,
}

impl MenuState {
    /// Open `menu` with its first selectable entry highlighted
    pub fn open(menus: &[Menu], menu: usize) -> Self {
        let menu = menu.min(menus.len().saturating_sub(1));
        let item = menus
            .get(menu)
            .and_then(|m| m.selectable_indices().first().copied())
            .unwrap_or(0);
        Self {
            menu,
            item,
            submenu_item: None,
        }
    }

    pub fn next_menu(&mut self, menus: &[Menu]) {
        if !menus.is_empty() {
            *self = Self::open(menus, (self.menu + 1) % menus.len());
        }
    }

    pub fn prev_menu(&mut self, menus: &[Menu]) {
        if !menus.is_empty() {
            *self = Self::open(menus, (self.menu + menus.len() - 1) % menus.len());
        }
    }

    /// Move the highlight down, wrapping, inside the submenu when one is open
    pub fn next_item(&mut self, menus: &[Menu]) {
        self.step_item(menus, true);
    }

    pub fn prev_item(&mut self, menus: &[Menu]) {
        self.step_item(menus, false);
    }

    fn step_item(&mut self, menus: &[Menu], forward: bool) {
        if let (Some(current), Some(entries)) = (self.submenu_item, self.submenu_entries(menus)) {
            self.submenu_item = Some(step(&selectable_indices(entries), current, forward));
        } else if let Some(menu) = menus.get(self.menu) {
            self.item = step(&menu.selectable_indices(), self.item, forward);
        }
    }

    /// Highlighted entry of the dropdown
    pub fn entry<'a>(&self, menus: &'a [Menu]) -> Option<&'a MenuEntry> {
        menus.get(self.menu)?.entries.get(self.item)
    }

    /// Entries of the submenu under the highlight
    pub fn submenu_entries<'a>(&self, menus: &'a [Menu]) -> Option<&'a [MenuEntry]> {
        match self.entry(menus)? {
            MenuEntry::Submenu { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Open the submenu under the highlight. Returns false if there is none.
    pub fn open_submenu(&mut self, menus: &[Menu]) -> bool {
        if self.submenu_item.is_some() {
            return false;
        }
        match self.submenu_entries(menus) {
            Some(entries) => {
                self.submenu_item = selectable_indices(entries).first().copied();
                self.submenu_item.is_some()
            }
            None => false,
        }
    }

    /// Close the open submenu. Returns false if none was open.
    pub fn close_submenu(&mut self) -> bool {
        self.submenu_item.take().is_some()
    }

    /// Command of the highlighted item.
    ///
    /// On a submenu entry this opens the submenu instead and returns `None`.
    pub fn activate(&mut self, menus: &[Menu]) -> Option<Command> {
        if let Some(index) = self.submenu_item {
            return match self.submenu_entries(menus)?.get(index)? {
                MenuEntry::Item(item) => Some(item.command),
                _ => None,
            };
        }
        match self.entry(menus)? {
            MenuEntry::Item(item) => Some(item.command),
            MenuEntry::Submenu { .. } => {
                self.open_submenu(menus);
                None
            }
            MenuEntry::Separator => None,
        }
    }
}

fn step(indices: &[usize], current: usize, forward: bool) -> usize {
    let Some(pos) = indices.iter().position(|&i| i == current) else {
        return indices.first().copied().unwrap_or(current);
    };
    let len = indices.len();
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    indices[next]
}

fn item(label: &'static str, command: Command, accelerator: Option<&'static str>) -> MenuEntry {
    MenuEntry::Item(MenuItem {
        label,
        command,
        accelerator,
    })
}

/// The full menu bar, left to right
pub fn menu_bar() -> Vec<Menu> {
    vec![
        Menu {
            title: "File",
            mnemonic: 'f',
            entries: vec![
                item("New", Command::New, Some("Ctrl+N")),
                item("Open...", Command::Open, Some("Ctrl+O")),
                item("Save", Command::Save, Some("Ctrl+S")),
                item("Save As...", Command::SaveAs, Some("Ctrl+Shift+S")),
                MenuEntry::Separator,
                item("Quit", Command::Quit, Some("Ctrl+Q")),
            ],
        },
        Menu {
            title: "Edit",
            mnemonic: 'e',
            entries: vec![
                item("Undo", Command::Undo, Some("Ctrl+Z")),
                item("Redo", Command::Redo, Some("Ctrl+H")),
                MenuEntry::Separator,
                item("Cut", Command::Cut, Some("Ctrl+X")),
                item("Copy", Command::Copy, Some("Ctrl+C")),
                item("Paste", Command::Paste, Some("Ctrl+V")),
                MenuEntry::Separator,
                item("Find...", Command::Find, Some("Ctrl+F")),
                item("Replace...", Command::Replace, Some("Ctrl+R")),
            ],
        },
        Menu {
            title: "Format",
            mnemonic: 'o',
            entries: vec![
                item("Background Color", Command::BackgroundColor, None),
                item("Text Color", Command::TextColor, None),
                MenuEntry::Separator,
                item("Font Style", Command::FontStyle, None),
                item("Font Size", Command::FontSize, None),
                MenuEntry::Separator,
                item("Word Wrap", Command::ToggleWordWrap, None),
                MenuEntry::Separator,
                MenuEntry::Submenu {
                    label: "Tabs",
                    entries: vec![
                        item("2 Spaces", Command::SetTabWidth(TabWidth::Two), None),
                        item("4 Spaces", Command::SetTabWidth(TabWidth::Four), None),
                        item("8 Spaces", Command::SetTabWidth(TabWidth::Eight), None),
                    ],
                },
                MenuEntry::Submenu {
                    label: "Themes",
                    entries: vec![
                        item("Dark", Command::SetTheme(ThemeKind::Dark), None),
                        item("Light", Command::SetTheme(ThemeKind::Light), None),
                    ],
                },
            ],
        },
        Menu {
            title: "Help",
            mnemonic: 'h',
            entries: vec![
                item("View Help", Command::ViewHelp, None),
                MenuEntry::Separator,
                item("About", Command::About, None),
            ],
        },
    ]
}
