//! Blocking dialogs used by command handlers.
//!
//! Handlers ask questions through the [`Dialogs`] trait and get the answer
//! back as a return value. [`TerminalDialogs`] runs a nested event loop that
//! keeps redrawing the editor underneath the modal until it resolves.

use std::path::{Path, PathBuf};

use anyhow::Result;
use ratatui::{backend::Backend, style::Color, Frame, Terminal};

use quillcraft_core::{Event, EventHandler};
use quillcraft_modal::{
    ColorModal, FileDialog, FileDialogMode, InfoModal, InputModal, Modal, ModalResult, SelectModal,
};
use quillcraft_theme::Theme;

use crate::state::EditorState;

/// Request/response dialogs. `None` means the user cancelled.
///
/// Every call receives the editor state so an implementation can keep the
/// editor visible behind the dialog.
pub trait Dialogs {
    fn ask_string(&mut self, state: &EditorState, title: &str, prompt: &str)
        -> Result<Option<String>>;

    fn show_info(&mut self, state: &EditorState, title: &str, message: &str) -> Result<()>;

    fn show_error(&mut self, state: &EditorState, title: &str, message: &str) -> Result<()>;

    fn choose_open_path(&mut self, state: &EditorState, start_dir: &Path)
        -> Result<Option<PathBuf>>;

    fn choose_save_path(
        &mut self,
        state: &EditorState,
        start_dir: &Path,
        file_name: &str,
    ) -> Result<Option<PathBuf>>;

    fn choose_from_list(
        &mut self,
        state: &EditorState,
        title: &str,
        prompt: &str,
        items: &[String],
        selected: usize,
    ) -> Result<Option<usize>>;

    fn choose_color(
        &mut self,
        state: &EditorState,
        title: &str,
        current: Color,
    ) -> Result<Option<Color>>;
}

/// Renders the editor screen from state
pub type RenderFn<'r> = &'r dyn Fn(&mut Frame<'_>, &EditorState);

/// Dialogs drawn on the terminal over the editor
pub struct TerminalDialogs<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    events: &'a EventHandler,
    render: RenderFn<'a>,
}

impl<'a, B: Backend> TerminalDialogs<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, events: &'a EventHandler, render: RenderFn<'a>) -> Self {
        Self {
            terminal,
            events,
            render,
        }
    }

    /// Drive a modal until it resolves
    fn run_modal<M: Modal>(&mut self, state: &EditorState, mut modal: M) -> Result<Option<M::Result>> {
        let theme = Theme::chrome();
        loop {
            let render = self.render;
            let mut modal_area = state.screen;
            self.terminal.draw(|frame| {
                render(frame, state);
                modal_area = frame.area();
                modal.render(modal_area, frame.buffer_mut(), theme);
            })?;

            let outcome = match self.events.next()? {
                Event::Key(key) => modal.handle_key(key)?,
                Event::Mouse(mouse) => modal.handle_mouse(mouse, modal_area)?,
                Event::Paste(text) => {
                    modal.handle_paste(&text);
                    None
                }
                Event::Resize(_, _) | Event::Tick => None,
            };

            match outcome {
                Some(ModalResult::Confirmed(value)) => return Ok(Some(value)),
                Some(ModalResult::Cancelled) => return Ok(None),
                None => {}
            }
        }
    }
}

impl<B: Backend> Dialogs for TerminalDialogs<'_, B> {
    fn ask_string(
        &mut self,
        state: &EditorState,
        title: &str,
        prompt: &str,
    ) -> Result<Option<String>> {
        self.run_modal(state, InputModal::new(title, prompt))
    }

    fn show_info(&mut self, state: &EditorState, title: &str, message: &str) -> Result<()> {
        self.run_modal(state, InfoModal::new(title, message))?;
        Ok(())
    }

    fn show_error(&mut self, state: &EditorState, title: &str, message: &str) -> Result<()> {
        self.run_modal(state, InfoModal::error(title, message))?;
        Ok(())
    }

    fn choose_open_path(
        &mut self,
        state: &EditorState,
        start_dir: &Path,
    ) -> Result<Option<PathBuf>> {
        self.run_modal(state, FileDialog::new(FileDialogMode::Open, start_dir))
    }

    fn choose_save_path(
        &mut self,
        state: &EditorState,
        start_dir: &Path,
        file_name: &str,
    ) -> Result<Option<PathBuf>> {
        let dialog = FileDialog::new(FileDialogMode::Save, start_dir).with_file_name(file_name);
        self.run_modal(state, dialog)
    }

    fn choose_from_list(
        &mut self,
        state: &EditorState,
        title: &str,
        prompt: &str,
        items: &[String],
        selected: usize,
    ) -> Result<Option<usize>> {
        let modal = SelectModal::new(title, prompt, items.to_vec()).with_selected(selected);
        self.run_modal(state, modal)
    }

    fn choose_color(
        &mut self,
        state: &EditorState,
        title: &str,
        current: Color,
    ) -> Result<Option<Color>> {
        self.run_modal(state, ColorModal::new(title, current))
    }
}
