//! Command handlers.
//!
//! Each menu item and shortcut resolves to a [`Command`] that runs here to
//! completion. Handlers take the editor state by `&mut` and ask the user
//! questions through [`Dialogs`]; I/O failures are returned to the caller.

use anyhow::Result;

use quillcraft_clipboard::Clipboard;
use quillcraft_core::Command;
use quillcraft_logger as logger;

use crate::dialogs::Dialogs;
use crate::state::EditorState;

mod edit_ops;
mod file_ops;
mod format_ops;
mod help;

pub use help::{ABOUT_TEXT, HELP_TEXT};

/// What a handler works with
pub struct CommandContext<'a> {
    pub state: &'a mut EditorState,
    pub dialogs: &'a mut dyn Dialogs,
    pub clipboard: &'a mut Clipboard,
}

/// Run a command to completion
pub fn execute(ctx: &mut CommandContext<'_>, command: Command) -> Result<()> {
    logger::info(format!("Command: {:?}", command));

    match command {
        Command::New => file_ops::new_document(ctx.state),
        Command::Open => file_ops::open(ctx),
        Command::Save => file_ops::save(ctx),
        Command::SaveAs => file_ops::save_as(ctx),
        Command::Quit => {
            ctx.state.quit();
            Ok(())
        }

        Command::Undo => edit_ops::undo(ctx.state),
        Command::Redo => edit_ops::redo(ctx.state),
        Command::Cut => edit_ops::cut(ctx),
        Command::Copy => edit_ops::copy(ctx),
        Command::Paste => edit_ops::paste(ctx),
        Command::Find => edit_ops::find(ctx),
        Command::Replace => edit_ops::replace(ctx),

        Command::BackgroundColor => format_ops::background_color(ctx),
        Command::TextColor => format_ops::text_color(ctx),
        Command::FontStyle => format_ops::font_style(ctx),
        Command::FontSize => format_ops::font_size(ctx),
        Command::ToggleWordWrap => format_ops::toggle_word_wrap(ctx.state),
        Command::SetTabWidth(width) => format_ops::set_tab_width(ctx.state, width),
        Command::SetTheme(kind) => format_ops::set_theme(ctx.state, kind),

        Command::ViewHelp => help::view_help(ctx),
        Command::About => help::about(ctx),
    }
}

/// Run a command; a failure is logged and shown in an "Error" dialog.
///
/// State is left as the failed handler left it. Only a failure of the
/// error dialog itself is returned.
pub fn execute_reporting(ctx: &mut CommandContext<'_>, command: Command) -> Result<()> {
    if let Err(e) = execute(ctx, command) {
        logger::error(format!("{:?} failed: {:#}", command, e));
        ctx.dialogs.show_error(ctx.state, "Error", &format!("{:#}", e))?;
    }
    ctx.state.ensure_caret_visible();
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::dialogs::scripted::Reply;

    #[test]
    fn test_quit_sets_flag() {
        let mut harness = Harness::new();
        harness.run(Command::Quit).unwrap();
        assert!(harness.state.should_quit);
    }

    #[test]
    fn test_failures_are_reported_in_error_dialog() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut harness = Harness::with_text("text");
        harness.script([Reply::Path(Some(dir.path().join("nope.txt")))]);

        execute_reporting(&mut harness.context(), Command::Open).unwrap();

        let shown = &harness.dialogs.shown;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Error");
        assert!(shown[0].is_error);
        assert!(shown[0].message.contains("nope.txt"));
        assert_eq!(harness.text(), "text");
    }
}
