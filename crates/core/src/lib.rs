//! Core types for quillcraft.
//!
//! This crate provides the vocabulary shared by the input layer, the
//! renderer and the command handlers: editor commands, the menu tree and
//! terminal events.

pub mod command;
pub mod event;
pub mod menu;

pub use command::{Command, TabWidth};
pub use event::{Event, EventHandler};
pub use menu::{menu_bar, selectable_indices, Menu, MenuEntry, MenuItem, MenuState};

pub use quillcraft_theme::ThemeKind;
