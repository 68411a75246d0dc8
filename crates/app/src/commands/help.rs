//! Help menu.

use anyhow::Result;

use super::CommandContext;

pub const HELP_TEXT: &str = "Open a file or simply start typing to create a new file. \
Save as any extension you like. \
Plenty of customization options to suit your needs in the Format tab. \
All your favorite action shortcuts in the Edit tab like undo and redo. \
Happy typing.";

pub const ABOUT_TEXT: &str = "QuillCraft - A Simple Text Editor";

pub(super) fn view_help(ctx: &mut CommandContext<'_>) -> Result<()> {
    ctx.dialogs.show_info(ctx.state, "Help", HELP_TEXT)
}

pub(super) fn about(ctx: &mut CommandContext<'_>) -> Result<()> {
    let message = format!("{}\nVersion {}", ABOUT_TEXT, env!("CARGO_PKG_VERSION"));
    ctx.dialogs.show_info(ctx.state, "About", &message)
}
