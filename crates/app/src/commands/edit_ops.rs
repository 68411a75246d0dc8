//! Edit menu: clipboard, history, find and replace.

use anyhow::Result;

use quillcraft_buffer::replace_all_trimmed;
use quillcraft_logger as logger;

use super::CommandContext;
use crate::state::EditorState;

/// Nothing to undo is not an error
pub(super) fn undo(state: &mut EditorState) -> Result<()> {
    if !state.document.buffer.undo()? {
        logger::debug("Undo: history empty");
    }
    Ok(())
}

pub(super) fn redo(state: &mut EditorState) -> Result<()> {
    if !state.document.buffer.redo()? {
        logger::debug("Redo: nothing to redo");
    }
    Ok(())
}

pub(super) fn cut(ctx: &mut CommandContext<'_>) -> Result<()> {
    let Some(text) = ctx.state.document.buffer.selected_text() else {
        return Ok(());
    };
    put_on_clipboard(ctx, &text);
    ctx.state.document.buffer.delete_selection();
    Ok(())
}

pub(super) fn copy(ctx: &mut CommandContext<'_>) -> Result<()> {
    if let Some(text) = ctx.state.document.buffer.selected_text() {
        put_on_clipboard(ctx, &text);
    }
    Ok(())
}

pub(super) fn paste(ctx: &mut CommandContext<'_>) -> Result<()> {
    match ctx.clipboard.paste() {
        Some(text) => ctx.state.document.buffer.insert_text(&text),
        None => logger::debug("Paste: clipboard empty"),
    }
    Ok(())
}

/// The in-process copy always succeeds, so a system clipboard failure only
/// reaches the status bar
fn put_on_clipboard(ctx: &mut CommandContext<'_>, text: &str) {
    if let Err(e) = ctx.clipboard.copy(text) {
        logger::warn(format!("Clipboard: {:#}", e));
        ctx.state.set_error(format!("System clipboard unavailable: {}", e));
    }
}

/// Select the first occurrence from the start of the buffer
pub(super) fn find(ctx: &mut CommandContext<'_>) -> Result<()> {
    let Some(query) = ctx
        .dialogs
        .ask_string(ctx.state, "Find", "Enter text to find:")?
    else {
        return Ok(());
    };

    match ctx.state.document.buffer.find(&query) {
        Some(range) => {
            logger::debug(format!("Find '{}': {:?}", query, range));
            ctx.state.document.buffer.select_range(range);
            ctx.state.ensure_caret_visible();
        }
        None => {
            ctx.dialogs
                .show_info(ctx.state, "Not Found", &format!("Cannot find '{}'", query))?;
        }
    }
    Ok(())
}

/// Replace every occurrence, then trim the whole text, as one undoable edit
pub(super) fn replace(ctx: &mut CommandContext<'_>) -> Result<()> {
    let Some(target) = ctx
        .dialogs
        .ask_string(ctx.state, "Replace", "Enter text to replace:")?
    else {
        return Ok(());
    };
    let prompt = format!("Replace '{}' with:", target);
    let Some(replacement) = ctx.dialogs.ask_string(ctx.state, "Replace", &prompt)? else {
        return Ok(());
    };

    let buffer = &mut ctx.state.document.buffer;
    let text = buffer.text();
    let count = text.matches(target.as_str()).count();
    buffer.set_text(&replace_all_trimmed(&text, &target, &replacement));
    logger::info(format!(
        "Replaced {} occurrence(s) of '{}' with '{}'",
        count, target, replacement
    ));
    ctx.state.viewport = Default::default();
    Ok(())
}

#[cfg(test)]
mod tests {
    use quillcraft_core::Command;

    use crate::commands::test_support::Harness;
    use crate::dialogs::scripted::{Reply, Shown};

    fn text(s: &str) -> Reply {
        Reply::Text(Some(s.to_string()))
    }

    #[test]
    fn test_find_selects_first_match() {
        let mut harness = Harness::with_text("xxfooyyfoo");
        harness.script([text("foo")]);
        harness.run(Command::Find).unwrap();

        let buffer = &harness.state.document.buffer;
        assert_eq!(buffer.selection().map(|s| s.range()), Some(2..5));
        assert_eq!(buffer.caret(), 5);
        assert_eq!(harness.text(), "xxfooyyfoo");
        assert_eq!(
            harness.dialogs.prompts,
            vec![("Find".to_string(), "Enter text to find:".to_string())]
        );
    }

    #[test]
    fn test_find_scrolls_match_into_view() {
        let mut content: String = (0..200).map(|i| format!("line {}\n", i)).collect();
        content.push_str("needle");
        let mut harness = Harness::with_text(&content);
        harness.state.update_terminal_size(40, 10);
        harness.script([text("needle")]);
        harness.run(Command::Find).unwrap();

        let rows = harness.state.screen_layout().text.height as usize;
        let top = harness.state.viewport.top_line;
        assert_eq!(rows, 7);
        assert!(top <= 200 && 200 < top + rows, "top_line {}", top);
        assert_eq!(top, 194);
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let mut harness = Harness::with_text("Foo foo");
        harness.script([text("foo")]);
        harness.run(Command::Find).unwrap();
        assert_eq!(
            harness.state.document.buffer.selection().map(|s| s.range()),
            Some(4..7)
        );
    }

    #[test]
    fn test_find_miss_reports_and_keeps_caret() {
        let mut harness = Harness::with_text("hello world");
        harness.state.document.buffer.select_range(0..5);
        harness.script([text("zzz")]);
        harness.run(Command::Find).unwrap();

        assert_eq!(
            harness.dialogs.shown,
            vec![Shown {
                title: "Not Found".to_string(),
                message: "Cannot find 'zzz'".to_string(),
                is_error: false,
            }]
        );
        let buffer = &harness.state.document.buffer;
        assert_eq!(buffer.selection().map(|s| s.range()), Some(0..5));
        assert_eq!(buffer.caret(), 5);
    }

    #[test]
    fn test_find_cancel_or_empty_does_nothing() {
        let mut harness = Harness::with_text("abc");
        harness.script([Reply::Text(None), text("")]);
        harness.run(Command::Find).unwrap();
        harness.run(Command::Find).unwrap();
        assert!(harness.dialogs.shown.is_empty());
        assert!(harness.state.document.buffer.selection().is_none());
    }

    #[test]
    fn test_replace_all_and_trim() {
        let mut harness = Harness::with_text("  a a a  ");
        harness.script([text("a"), text("b")]);
        harness.run(Command::Replace).unwrap();

        assert_eq!(harness.text(), "b b b");
        assert_eq!(harness.dialogs.prompts[1].1, "Replace 'a' with:");
    }

    #[test]
    fn test_replace_is_one_undo_step() {
        let mut harness = Harness::with_text("cat cat\n");
        harness.script([text("cat"), text("dog")]);
        harness.run(Command::Replace).unwrap();
        assert_eq!(harness.text(), "dog dog");

        harness.run(Command::Undo).unwrap();
        assert_eq!(harness.text(), "cat cat\n");
    }

    #[test]
    fn test_replace_aborts_on_empty_replacement() {
        let mut harness = Harness::with_text(" keep ");
        harness.script([text("keep"), text("")]);
        harness.run(Command::Replace).unwrap();
        assert_eq!(harness.text(), " keep ");
    }

    #[test]
    fn test_cut_copy_paste() {
        let mut harness = Harness::with_text("hello world");
        harness.state.document.buffer.select_range(0..5);
        harness.run(Command::Copy).unwrap();
        assert_eq!(harness.text(), "hello world");

        harness.run(Command::Cut).unwrap();
        assert_eq!(harness.text(), " world");

        harness.state.document.buffer.move_doc_end(false);
        harness.run(Command::Paste).unwrap();
        assert_eq!(harness.text(), " worldhello");
    }

    #[test]
    fn test_copy_without_selection_keeps_clipboard() {
        let mut harness = Harness::with_text("abc");
        harness.clipboard.copy("earlier").unwrap();
        harness.run(Command::Copy).unwrap();
        harness.run(Command::Cut).unwrap();
        assert_eq!(harness.clipboard.paste().as_deref(), Some("earlier"));
        assert_eq!(harness.text(), "abc");
    }

    #[test]
    fn test_paste_replaces_selection() {
        let mut harness = Harness::with_text("one two");
        harness.clipboard.copy("2").unwrap();
        harness.state.document.buffer.select_range(4..7);
        harness.run(Command::Paste).unwrap();
        assert_eq!(harness.text(), "one 2");
    }

    #[test]
    fn test_empty_history_is_ignored() {
        let mut harness = Harness::with_text("abc");
        harness.run(Command::Undo).unwrap();
        harness.run(Command::Redo).unwrap();
        assert_eq!(harness.text(), "abc");
        assert!(harness.dialogs.shown.is_empty());
    }
}
