//! Main application module.
//!
//! Contains the App struct, the event loop and the input handlers. Key and
//! mouse handlers resolve events to a `Command`; commands run with
//! terminal dialogs from the loop.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::terminal::SetTitle;
use ratatui::{backend::Backend, Frame, Terminal};

use quillcraft_clipboard::Clipboard;
use quillcraft_config::Config;
use quillcraft_core::{Event, EventHandler};
use quillcraft_keyboard::Keymap;
use quillcraft_logger as logger;

use crate::commands::{self, CommandContext};
use crate::dialogs::TerminalDialogs;
use crate::state::EditorState;

mod key_handler;
mod menu_actions;
mod mouse_handler;

/// Poll interval of the event loop
const TICK_RATE_MS: u64 = 250;

/// Main application
pub struct App {
    state: EditorState,
    keymap: Keymap,
    clipboard: Clipboard,
    event_handler: EventHandler,
    /// Title last sent to the terminal window
    window_title: Option<String>,
    /// Left button held inside the text area
    selecting: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_clipboard(config, Clipboard::new())
    }

    pub fn with_clipboard(config: &Config, clipboard: Clipboard) -> Self {
        let state = EditorState::new(config);
        let keymap = Keymap::from_menus(&state.menus);
        logger::debug(format!("Keymap: {} bindings", keymap.len()));

        Self {
            state,
            keymap,
            clipboard,
            event_handler: EventHandler::new(Duration::from_millis(TICK_RATE_MS)),
            window_title: None,
            selecting: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Run the main application loop
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        render_fn: impl Fn(&mut Frame<'_>, &EditorState),
    ) -> Result<()> {
        let size = terminal.size()?;
        self.state.update_terminal_size(size.width, size.height);
        logger::info(format!("Terminal size {}x{}", size.width, size.height));

        while !self.state.should_quit {
            self.sync_window_title();
            terminal.draw(|frame| render_fn(frame, &self.state))?;

            let command = match self.event_handler.next()? {
                Event::Key(key) => self.handle_key_event(key),
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                Event::Paste(text) => {
                    self.handle_paste(&text);
                    None
                }
                Event::Resize(width, height) => {
                    self.state.update_terminal_size(width, height);
                    self.state.ensure_caret_visible();
                    None
                }
                Event::Tick => None,
            };

            if let Some(command) = command {
                self.state.menu = None;
                let mut dialogs = TerminalDialogs::new(terminal, &self.event_handler, &render_fn);
                let mut ctx = CommandContext {
                    state: &mut self.state,
                    dialogs: &mut dialogs,
                    clipboard: &mut self.clipboard,
                };
                commands::execute_reporting(&mut ctx, command)?;

                // Resize events during the dialog went to the modal loop
                let size = terminal.size()?;
                if (size.width, size.height) != (self.state.screen.width, self.state.screen.height) {
                    self.state.update_terminal_size(size.width, size.height);
                    self.state.ensure_caret_visible();
                }
            }
        }

        logger::info("Event loop finished");
        Ok(())
    }

    /// Bracketed paste goes straight into the buffer
    fn handle_paste(&mut self, text: &str) {
        if self.state.menu.is_some() {
            return;
        }
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.state.document.buffer.insert_text(&text);
        self.state.ensure_caret_visible();
    }

    /// Push the title to the terminal window when it changed
    fn sync_window_title(&mut self) {
        let title = self.state.title();
        if self.window_title.as_deref() == Some(title.as_str()) {
            return;
        }
        if let Err(e) = crossterm::execute!(io::stdout(), SetTitle(&title)) {
            logger::warn(format!("Failed to set window title: {}", e));
        }
        logger::debug(format!("Title: {}", title));
        self.window_title = Some(title);
    }
}
