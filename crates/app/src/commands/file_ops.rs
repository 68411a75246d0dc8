//! File menu: New, Open, Save, Save As.

use std::path::{Path, PathBuf};

use anyhow::Result;

use quillcraft_logger as logger;
use quillcraft_ui_render::Viewport;

use super::CommandContext;
use crate::state::{Document, EditorState};

/// Empty document without a path. Unsaved text is discarded.
pub(super) fn new_document(state: &mut EditorState) -> Result<()> {
    state.document.buffer.set_text("");
    state.document.file_path = None;
    state.viewport = Viewport::default();
    logger::info("New document");
    Ok(())
}

pub(super) fn open(ctx: &mut CommandContext<'_>) -> Result<()> {
    let start_dir = start_dir(&ctx.state.document);
    let Some(path) = ctx.dialogs.choose_open_path(ctx.state, &start_dir)? else {
        return Ok(());
    };

    ctx.state.document.buffer.load_file(&path)?;
    logger::info(format!(
        "Opened {} ({} chars)",
        path.display(),
        ctx.state.document.buffer.len_chars()
    ));
    ctx.state.document.file_path = Some(path);
    ctx.state.viewport = Viewport::default();
    Ok(())
}

/// Overwrite the current file, or ask for one
pub(super) fn save(ctx: &mut CommandContext<'_>) -> Result<()> {
    let Some(path) = ctx.state.document.file_path.clone() else {
        return save_as(ctx);
    };
    write_document(ctx.state, &path)
}

pub(super) fn save_as(ctx: &mut CommandContext<'_>) -> Result<()> {
    let start_dir = start_dir(&ctx.state.document);
    let file_name = ctx
        .state
        .document
        .file_path
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let Some(path) = ctx
        .dialogs
        .choose_save_path(ctx.state, &start_dir, &file_name)?
    else {
        return Ok(());
    };

    write_document(ctx.state, &path)?;
    ctx.state.document.file_path = Some(path);
    Ok(())
}

fn write_document(state: &mut EditorState, path: &Path) -> Result<()> {
    state.document.buffer.save_to(path)?;
    logger::info(format!(
        "Saved {} ({} chars)",
        path.display(),
        state.document.buffer.len_chars()
    ));
    state.set_info(format!("Saved {}", path.display()));
    Ok(())
}

/// Directory of the current file, else the working directory, else home
fn start_dir(document: &Document) -> PathBuf {
    document
        .file_path
        .as_ref()
        .and_then(|path| path.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use quillcraft_core::Command;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::test_support::Harness;
    use crate::dialogs::scripted::Reply;

    #[test]
    fn test_new_clears_buffer_and_path() {
        let mut harness = Harness::with_text("draft");
        harness.state.document.file_path = Some(PathBuf::from("/tmp/draft.txt"));

        harness.run(Command::New).unwrap();

        assert!(harness.state.document.buffer.is_empty());
        assert!(harness.state.document.file_path.is_none());
        assert_eq!(harness.state.title(), "Untitled - QuillCraft");
    }

    #[test]
    fn test_save_as_then_open_round_trips_exactly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        let content = "  line one\n\tline two\n\nno trailing newline";

        let mut harness = Harness::with_text(content);
        harness.script([Reply::Path(Some(path.clone()))]);
        harness.run(Command::SaveAs).unwrap();
        assert_eq!(harness.state.document.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(harness.state.title(), "notes.txt - QuillCraft");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

        harness.run(Command::New).unwrap();
        harness.script([Reply::Path(Some(path.clone()))]);
        harness.run(Command::Open).unwrap();
        assert_eq!(harness.text(), content);
        assert_eq!(harness.state.document.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(harness.state.document.buffer.caret(), 0);
    }

    #[test]
    fn test_save_with_path_skips_dialog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "old").unwrap();

        let mut harness = Harness::with_text("new contents");
        harness.state.document.file_path = Some(path.clone());
        harness.run(Command::Save).unwrap();

        assert!(harness.dialogs.prompts.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new contents");
    }

    #[test]
    fn test_save_without_path_asks_for_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.txt");

        let mut harness = Harness::with_text("hello");
        harness.script([Reply::Path(Some(path.clone()))]);
        harness.run(Command::Save).unwrap();

        assert_eq!(harness.dialogs.prompts[0].0, "Save As");
        assert_eq!(harness.state.document.file_path, Some(path));
    }

    #[test]
    fn test_cancelled_dialogs_change_nothing() {
        let mut harness = Harness::with_text("keep me");
        harness.script([Reply::Path(None), Reply::Path(None)]);

        harness.run(Command::Open).unwrap();
        harness.run(Command::SaveAs).unwrap();

        assert_eq!(harness.text(), "keep me");
        assert!(harness.state.document.file_path.is_none());
    }

    #[test]
    fn test_open_missing_file_propagates_and_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut harness = Harness::with_text("unchanged");
        harness.script([Reply::Path(Some(dir.path().join("missing.txt")))]);

        let err = harness.run(Command::Open).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
        assert_eq!(harness.text(), "unchanged");
        assert!(harness.state.document.file_path.is_none());
    }

    #[test]
    fn test_open_invalid_utf8_propagates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.db");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let mut harness = Harness::new();
        harness.script([Reply::Path(Some(path))]);
        assert!(harness.run(Command::Open).is_err());
        assert!(harness.state.document.file_path.is_none());
    }

    #[test]
    fn test_start_dir_prefers_current_file_directory() {
        let document = Document {
            buffer: Default::default(),
            file_path: Some(PathBuf::from("/var/tmp/x.txt")),
        };
        assert_eq!(start_dir(&document), PathBuf::from("/var/tmp"));
    }
}
