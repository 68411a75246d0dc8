//! Application orchestrator for quillcraft.
//!
//! This crate ties the editor together:
//! - `App` - event loop, keyboard and mouse handling
//! - `EditorState` - the document, appearance and font settings
//! - `commands` - File, Edit, Format and Help handlers
//! - `Dialogs` - blocking dialogs, drawn in the terminal or scripted in tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      quillcraft (bin)                        │
//! │  main.rs - terminal setup, screen rendering                  │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  quillcraft-app (this crate)                 │
//! │  App ──▶ Command ──▶ commands::execute(state, dialogs)       │
//! └─────────────────────────────────────────────────────────────┘
//!        │            │            │            │
//!        ▼            ▼            ▼            ▼
//!    ┌────────┐  ┌─────────┐  ┌────────┐  ┌──────────┐
//!    │ buffer │  │keyboard │  │ modal  │  │ui-render │
//!    └────────┘  └─────────┘  └────────┘  └──────────┘
//! ```

pub mod app;
pub mod commands;
pub mod dialogs;
pub mod fonts;
pub mod state;

pub use app::App;
pub use commands::{execute, execute_reporting, CommandContext};
pub use dialogs::{Dialogs, RenderFn, TerminalDialogs};
pub use state::{Appearance, Document, EditorState, FontSetting, APP_NAME};
