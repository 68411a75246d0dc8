//! Format menu: colors, font, word wrap, tabs and themes.

use anyhow::Result;

use quillcraft_config::defaults;
use quillcraft_core::TabWidth;
use quillcraft_logger as logger;
use quillcraft_theme::{format_color, ThemeKind};

use super::CommandContext;
use crate::fonts;
use crate::state::EditorState;

pub(super) fn background_color(ctx: &mut CommandContext<'_>) -> Result<()> {
    let current = ctx.state.appearance.palette.bg;
    if let Some(color) = ctx
        .dialogs
        .choose_color(ctx.state, "Background Color", current)?
    {
        logger::info(format!("Background color: {}", format_color(color)));
        ctx.state.appearance.palette.bg = color;
    }
    Ok(())
}

pub(super) fn text_color(ctx: &mut CommandContext<'_>) -> Result<()> {
    let current = ctx.state.appearance.palette.fg;
    if let Some(color) = ctx.dialogs.choose_color(ctx.state, "Text Color", current)? {
        logger::info(format!("Text color: {}", format_color(color)));
        ctx.state.appearance.palette.fg = color;
    }
    Ok(())
}

pub(super) fn font_style(ctx: &mut CommandContext<'_>) -> Result<()> {
    let families = fonts::installed_families();
    let selected = families
        .iter()
        .position(|family| *family == ctx.state.font.family)
        .unwrap_or(0);

    let choice = ctx.dialogs.choose_from_list(
        ctx.state,
        "Font Style",
        "Select Font Style:",
        &families,
        selected,
    )?;
    if let Some(family) = choice.and_then(|index| families.get(index)) {
        logger::info(format!("Font family: {}", family));
        ctx.state.font.family = family.clone();
    }
    Ok(())
}

pub(super) fn font_size(ctx: &mut CommandContext<'_>) -> Result<()> {
    let sizes: Vec<u16> = defaults::font_sizes().collect();
    let items: Vec<String> = sizes.iter().map(u16::to_string).collect();
    let selected = sizes
        .iter()
        .position(|&size| size == ctx.state.font.size)
        .unwrap_or(0);

    let choice = ctx.dialogs.choose_from_list(
        ctx.state,
        "Font Size",
        "Select Font Size:",
        &items,
        selected,
    )?;
    if let Some(&size) = choice.and_then(|index| sizes.get(index)) {
        logger::info(format!("Font size: {}", size));
        ctx.state.font.size = size;
    }
    Ok(())
}

pub(super) fn toggle_word_wrap(state: &mut EditorState) -> Result<()> {
    let appearance = &mut state.appearance;
    appearance.word_wrap = !appearance.word_wrap;
    logger::info(format!("Word wrap: {}", appearance.word_wrap));

    // Row offsets mean something else in the other mode
    let caret_line = state.document.buffer.cursor().line;
    state.viewport.top_line = state.viewport.top_line.min(caret_line);
    state.viewport.top_row = 0;
    state.viewport.left_column = 0;
    state.ensure_caret_visible();
    Ok(())
}

pub(super) fn set_tab_width(state: &mut EditorState, width: TabWidth) -> Result<()> {
    logger::info(format!("Tab width: {}", width.columns()));
    state.appearance.tab_width = width;
    state.ensure_caret_visible();
    Ok(())
}

/// Sets all five text colors at once
pub(super) fn set_theme(state: &mut EditorState, kind: ThemeKind) -> Result<()> {
    logger::info(format!("Theme: {}", kind));
    state.appearance.apply_theme(kind);
    Ok(())
}
