use ratatui::{layout::Rect, style::Style, widgets::Block, Frame};

use quillcraft_app::EditorState;
use quillcraft_theme::Theme;
use quillcraft_ui_render::{
    render_horizontal, render_vertical, MenuBar, ScreenLayout, StatusBar, StatusBarParams,
    TextArea,
};

/// Draw the whole editor screen.
///
/// Layout follows the frame, which may be smaller than `state.screen` when
/// the terminal shrank while a dialog was open.
pub fn render(frame: &mut Frame<'_>, state: &EditorState) {
    let theme = Theme::chrome();
    let screen = frame.area();
    let layout = ScreenLayout::new(screen);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        screen,
    );
    let buf = frame.buffer_mut();

    TextArea {
        buffer: &state.document.buffer,
        layout: state.text_layout(),
        palette: state.appearance.palette,
        viewport: state.viewport,
        show_caret: state.menu.is_none(),
    }
    .render(layout.text, buf);

    let (vertical, horizontal) = state.scroll_metrics_in(layout.text);
    render_vertical(layout.vertical_scrollbar, buf, vertical, theme);
    render_horizontal(layout.horizontal_scrollbar, buf, horizontal, theme);
    // Corner between the two scrollbars
    let corner = Rect::new(
        layout.vertical_scrollbar.x,
        layout.horizontal_scrollbar.y,
        layout.vertical_scrollbar.width,
        layout.horizontal_scrollbar.height,
    );
    buf.set_style(corner, Style::default().bg(theme.accented_bg));

    let cursor = state.document.buffer.cursor();
    let title = state.title();
    StatusBar::render(
        buf,
        layout.status_bar,
        &StatusBarParams {
            theme,
            title: &title,
            line: cursor.line + 1,
            column: cursor.column + 1,
            font_family: &state.font.family,
            font_size: state.font.size,
            tab_width: state.appearance.tab_width.columns(),
            word_wrap: state.appearance.word_wrap,
            theme_label: state.appearance.theme.label(),
            status_message: state.status_message.as_ref(),
        },
    );

    // Dropdowns go last so they cover the text
    let menu_bar = MenuBar {
        menus: &state.menus,
        state: state.menu.as_ref(),
        theme,
    };
    menu_bar.render_bar(layout.menu_bar, buf);
    menu_bar.render_dropdowns(layout.menu_bar, screen, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillcraft_config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = EditorState::new(&Config::default());
        state.update_terminal_size(80, 24);
        state.document.buffer = quillcraft_buffer::TextBuffer::from_text("hello");

        terminal.draw(|frame| render(frame, &state)).unwrap();

        assert!(row(&terminal, 0).contains("File"));
        assert!(row(&terminal, 0).contains("Format"));
        assert!(row(&terminal, 1).starts_with("hello"));
        assert!(row(&terminal, 23).contains("Untitled - QuillCraft"));
        assert!(row(&terminal, 23).contains("Ln 1, Col 1"));
    }

    #[test]
    fn test_open_menu_draws_dropdown() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = EditorState::new(&Config::default());
        state.update_terminal_size(80, 24);
        state.menu = Some(quillcraft_core::MenuState::open(&state.menus, 0));

        terminal.draw(|frame| render(frame, &state)).unwrap();

        assert!(row(&terminal, 2).contains("New"));
        assert!(row(&terminal, 2).contains("Ctrl+N"));
    }

    #[test]
    fn test_render_into_smaller_frame_than_state() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut state = EditorState::new(&Config::default());
        state.update_terminal_size(80, 24);
        let text: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        state.document.buffer = quillcraft_buffer::TextBuffer::from_text(&text);
        state.menu = Some(quillcraft_core::MenuState::open(&state.menus, 3));

        terminal.draw(|frame| render(frame, &state)).unwrap();

        assert!(row(&terminal, 9).contains("Untitled"));
    }
}
