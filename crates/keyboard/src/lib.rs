//! Keyboard shortcut table.
//!
//! Shortcuts are derived from the accelerator hints of the menu tree, so
//! what a menu advertises is exactly what the keyboard does. Alt plus a
//! menu's mnemonic, and F10, open the menu bar.
//!
//! ```text
//! KeyEvent → normalize → Keymap → Option<KeyAction> → App
//! ```

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quillcraft_core::{Command, Menu, MenuEntry};

/// A key binding specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    /// Parse an accelerator hint such as `Ctrl+Shift+S`.
    ///
    /// Letters are stored lowercase with an explicit SHIFT modifier, the
    /// same shape [`KeyBinding::from_event`] produces.
    pub fn parse(accelerator: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut parts = accelerator.split('+').peekable();
        let mut key = None;

        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                key = Some(part);
                break;
            }
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return None,
            }
        }

        let key = key?;
        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
            _ => match key {
                "F10" => KeyCode::F(10),
                "Enter" => KeyCode::Enter,
                "Esc" => KeyCode::Esc,
                _ => return None,
            },
        };
        Some(Self::new(code, modifiers))
    }

    /// Normalize a key event for lookup.
    ///
    /// Terminals disagree on how they report shifted letters with Ctrl
    /// (`Char('S')` with or without SHIFT); both become `Char('s')` + SHIFT.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers =
            key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);
        let code = match key.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::Char(c.to_ascii_lowercase())
            }
            other => other,
        };
        Self::new(code, modifiers)
    }
}

/// What a recognized shortcut asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Run(Command),
    /// Open the menu at this index of the menu bar
    OpenMenu(usize),
}

/// Shortcut lookup table
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, KeyAction>,
}

impl Keymap {
    /// Build the keymap from menu accelerators and mnemonics
    pub fn from_menus(menus: &[Menu]) -> Self {
        let mut bindings = HashMap::new();

        for (index, menu) in menus.iter().enumerate() {
            bindings.insert(KeyBinding::alt(menu.mnemonic), KeyAction::OpenMenu(index));
            collect_accelerators(&menu.entries, &mut bindings);
        }
        if !menus.is_empty() {
            bindings.insert(
                KeyBinding::new(KeyCode::F(10), KeyModifiers::NONE),
                KeyAction::OpenMenu(0),
            );
        }

        Self { bindings }
    }

    pub fn lookup(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&KeyBinding::from_event(key)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn collect_accelerators(entries: &[MenuEntry], bindings: &mut HashMap<KeyBinding, KeyAction>) {
    for entry in entries {
        match entry {
            MenuEntry::Item(item) => {
                if let Some(binding) = item.accelerator.and_then(KeyBinding::parse) {
                    bindings.insert(binding, KeyAction::Run(item.command));
                }
            }
            MenuEntry::Submenu { entries, .. } => collect_accelerators(entries, bindings),
            MenuEntry::Separator => {}
        }
    }
}
