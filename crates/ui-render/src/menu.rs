//! Menu bar and dropdown rendering.
//!
//! Geometry helpers are public so that mouse handling hits exactly what
//! was drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use quillcraft_core::{Menu, MenuEntry, MenuState};
use quillcraft_theme::Theme;

/// Columns before the first title
const BAR_PADDING: u16 = 1;
/// Columns between titles
const TITLE_GAP: u16 = 2;
/// Columns between a label and its accelerator hint
const ACCELERATOR_GAP: usize = 3;
const SUBMENU_MARKER: &str = "►";

/// What a mouse click on the menu surface landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    Title(usize),
    Item(usize),
    SubmenuItem(usize),
    /// Inside an open dropdown but not on a selectable entry
    Inert,
}

/// Screen area of every menu title in the bar
pub fn title_areas(menus: &[Menu], bar: Rect) -> Vec<Rect> {
    let mut x = bar.x + BAR_PADDING;
    menus
        .iter()
        .map(|menu| {
            let width = menu.title.width() as u16;
            let rect = Rect::new(x, bar.y, width, 1);
            x += width + TITLE_GAP;
            rect
        })
        .collect()
}

fn accelerator(entry: &MenuEntry) -> Option<&'static str> {
    match entry {
        MenuEntry::Item(item) => item.accelerator,
        _ => None,
    }
}

/// Inner width needed to show `entries` with their hints
fn entries_width(entries: &[MenuEntry]) -> u16 {
    entries
        .iter()
        .map(|entry| {
            let hint = match entry {
                MenuEntry::Submenu { .. } => ACCELERATOR_GAP + SUBMENU_MARKER.width(),
                _ => accelerator(entry).map_or(0, |a| ACCELERATOR_GAP + a.width()),
            };
            entry.label().width() + hint
        })
        .max()
        .unwrap_or(0) as u16
        + 2
}

/// Place a box of `width` x `height` at (x, y), shifted to stay on screen
fn fit(x: u16, y: u16, width: u16, height: u16, screen: Rect) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let x = x.min(screen.x + screen.width - width);
    let y = y.min(screen.y + screen.height - height);
    Rect::new(x, y, width, height)
}

/// Area of the dropdown of the open menu
pub fn dropdown_area(menus: &[Menu], state: &MenuState, bar: Rect, screen: Rect) -> Option<Rect> {
    let menu = menus.get(state.menu)?;
    let title = *title_areas(menus, bar).get(state.menu)?;
    Some(fit(
        title.x.saturating_sub(1),
        bar.y + 1,
        entries_width(&menu.entries) + 2,
        menu.entries.len() as u16 + 2,
        screen,
    ))
}

/// Area of the open submenu, to the right of its parent entry
pub fn submenu_area(menus: &[Menu], state: &MenuState, bar: Rect, screen: Rect) -> Option<Rect> {
    state.submenu_item?;
    let entries = state.submenu_entries(menus)?;
    let parent = dropdown_area(menus, state, bar, screen)?;

    let width = entries_width(entries) + 2;
    let height = entries.len() as u16 + 2;
    let right = parent.x + parent.width;
    let x = if right + width <= screen.x + screen.width {
        right
    } else {
        parent.x.saturating_sub(width)
    };
    Some(fit(x, parent.y + state.item as u16, width, height, screen))
}

/// Find what lies under a screen cell
pub fn hit_test(
    menus: &[Menu],
    state: Option<&MenuState>,
    bar: Rect,
    screen: Rect,
    column: u16,
    row: u16,
) -> Option<MenuHit> {
    let inside = |r: Rect| column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height;

    if row == bar.y {
        return title_areas(menus, bar)
            .iter()
            .position(|&r| inside(r))
            .map(MenuHit::Title);
    }

    let state = state?;
    let entry_at = |area: Rect, entries: &[MenuEntry]| -> Option<usize> {
        let inner_row = row.checked_sub(area.y + 1)? as usize;
        (inner_row < entries.len() && entries[inner_row].is_selectable()).then_some(inner_row)
    };

    if let (Some(area), Some(entries)) = (
        submenu_area(menus, state, bar, screen),
        state.submenu_entries(menus),
    ) {
        if inside(area) {
            return Some(entry_at(area, entries).map_or(MenuHit::Inert, MenuHit::SubmenuItem));
        }
    }

    let area = dropdown_area(menus, state, bar, screen)?;
    if inside(area) {
        let entries = &menus.get(state.menu)?.entries;
        return Some(entry_at(area, entries).map_or(MenuHit::Inert, MenuHit::Item));
    }
    None
}

/// Menu bar with its open dropdown
pub struct MenuBar<'a> {
    pub menus: &'a [Menu],
    pub state: Option<&'a MenuState>,
    pub theme: &'a Theme,
}

impl MenuBar<'_> {
    /// Render the bar row
    pub fn render_bar(&self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        buf.set_style(area, Style::default().fg(theme.fg).bg(theme.accented_bg));

        for (index, (menu, rect)) in self
            .menus
            .iter()
            .zip(title_areas(self.menus, area))
            .enumerate()
        {
            if rect.x >= area.x + area.width {
                break;
            }
            let is_open = self.state.is_some_and(|s| s.menu == index);
            let (base, accent) = if is_open {
                let style = Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD);
                (style, style.add_modifier(Modifier::UNDERLINED))
            } else {
                (
                    Style::default().fg(theme.fg),
                    Style::default()
                        .fg(theme.accented_fg)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )
            };

            // Highlight the mnemonic letter
            let mut x = rect.x;
            let mut marked = false;
            for c in menu.title.chars() {
                let style = if !marked && c.to_ascii_lowercase() == menu.mnemonic {
                    marked = true;
                    accent
                } else {
                    base
                };
                let (next, _) = buf.set_stringn(
                    x,
                    area.y,
                    c.to_string(),
                    (area.x + area.width).saturating_sub(x) as usize,
                    style,
                );
                x = next;
            }
        }

        let hint = if self.state.is_some() {
            " ←→ menus  ↑↓ items  Enter run  Esc close "
        } else {
            " F10 menu "
        };
        let hint_width = hint.width() as u16;
        let used = title_areas(self.menus, area)
            .last()
            .map_or(area.x, |r| r.x + r.width);
        if area.x + area.width >= used + hint_width {
            buf.set_string(
                area.x + area.width - hint_width,
                area.y,
                hint,
                Style::default().fg(theme.disabled),
            );
        }
    }

    /// Render the open dropdown and submenu over everything else
    pub fn render_dropdowns(&self, bar: Rect, screen: Rect, buf: &mut Buffer) {
        let Some(state) = self.state else {
            return;
        };
        let Some(menu) = self.menus.get(state.menu) else {
            return;
        };

        if let Some(area) = dropdown_area(self.menus, state, bar, screen) {
            let highlight = Some(state.item);
            self.render_box(area, &menu.entries, highlight, state.submenu_item.is_none(), buf);
        }

        if let (Some(area), Some(entries)) = (
            submenu_area(self.menus, state, bar, screen),
            state.submenu_entries(self.menus),
        ) {
            self.render_box(area, entries, state.submenu_item, true, buf);
        }
    }

    fn render_box(
        &self,
        area: Rect,
        entries: &[MenuEntry],
        highlight: Option<usize>,
        focused: bool,
        buf: &mut Buffer,
    ) {
        let theme = self.theme;
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.disabled))
            .style(Style::default().fg(theme.fg).bg(theme.bg));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, entry) in entries.iter().enumerate().take(inner.height as usize) {
            let y = inner.y + i as u16;

            if let MenuEntry::Separator = entry {
                buf.set_string(
                    area.x,
                    y,
                    format!("├{}┤", "─".repeat(inner.width as usize)),
                    Style::default().fg(theme.disabled),
                );
                continue;
            }

            let (style, hint_style) = if highlight == Some(i) {
                let style = if focused {
                    Style::default().fg(theme.selected_fg).bg(theme.selected_bg)
                } else {
                    Style::default().fg(theme.fg).bg(theme.accented_bg)
                };
                (style, style)
            } else {
                (
                    Style::default().fg(theme.fg),
                    Style::default().fg(theme.disabled),
                )
            };
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            buf.set_stringn(
                inner.x + 1,
                y,
                entry.label(),
                inner.width.saturating_sub(2) as usize,
                style,
            );

            let hint = match entry {
                MenuEntry::Submenu { .. } => Some(SUBMENU_MARKER),
                _ => accelerator(entry),
            };
            if let Some(hint) = hint {
                let width = hint.width() as u16;
                if inner.width > width + 1 {
                    buf.set_string(inner.x + inner.width - 1 - width, y, hint, hint_style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillcraft_core::menu_bar;

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn bar() -> Rect {
        Rect::new(0, 0, 80, 1)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_title_positions() {
        let menus = menu_bar();
        let areas = title_areas(&menus, bar());
        assert_eq!(areas[0], Rect::new(1, 0, 4, 1)); // File
        assert_eq!(areas[1], Rect::new(7, 0, 4, 1)); // Edit
        assert_eq!(areas[2], Rect::new(13, 0, 6, 1)); // Format
        assert_eq!(areas[3], Rect::new(21, 0, 4, 1)); // Help
    }

    #[test]
    fn test_bar_renders_titles() {
        let menus = menu_bar();
        let theme = Theme::default();
        let mut buf = Buffer::empty(screen());
        MenuBar {
            menus: &menus,
            state: None,
            theme: &theme,
        }
        .render_bar(bar(), &mut buf);

        assert!(row_text(&buf, 0).starts_with(" File  Edit  Format  Help"));
        // 'o' of Format is the mnemonic
        assert_eq!(buf[(14, 0)].fg, theme.accented_fg);
        assert_eq!(buf[(13, 0)].fg, theme.fg);
    }

    #[test]
    fn test_dropdown_shows_accelerators() {
        let menus = menu_bar();
        let theme = Theme::default();
        let state = MenuState::open(&menus, 0);
        let mut buf = Buffer::empty(screen());
        MenuBar {
            menus: &menus,
            state: Some(&state),
            theme: &theme,
        }
        .render_dropdowns(bar(), screen(), &mut buf);

        let area = dropdown_area(&menus, &state, bar(), screen()).unwrap();
        assert_eq!(area.y, 1);
        let first = row_text(&buf, 2);
        assert!(first.contains("New"));
        assert!(first.contains("Ctrl+N"));
        assert!(row_text(&buf, 5).contains("Ctrl+Shift+S"));
        assert!(row_text(&buf, 6).contains("├"));
    }

    #[test]
    fn test_hit_test() {
        let menus = menu_bar();
        let mut state = MenuState::open(&menus, 2);

        assert_eq!(
            hit_test(&menus, None, bar(), screen(), 15, 0),
            Some(MenuHit::Title(2))
        );
        assert_eq!(hit_test(&menus, None, bar(), screen(), 5, 0), None);
        assert_eq!(hit_test(&menus, None, bar(), screen(), 15, 5), None);

        let area = dropdown_area(&menus, &state, bar(), screen()).unwrap();
        assert_eq!(
            hit_test(&menus, Some(&state), bar(), screen(), area.x + 2, area.y + 1),
            Some(MenuHit::Item(0))
        );
        // Separator row
        assert_eq!(
            hit_test(&menus, Some(&state), bar(), screen(), area.x + 2, area.y + 3),
            Some(MenuHit::Inert)
        );

        // Open the Themes submenu
        state.item = 9;
        assert!(state.open_submenu(&menus));
        let sub = submenu_area(&menus, &state, bar(), screen()).unwrap();
        assert_eq!(sub.x, area.x + area.width);
        assert_eq!(
            hit_test(&menus, Some(&state), bar(), screen(), sub.x + 1, sub.y + 2),
            Some(MenuHit::SubmenuItem(1))
        );
    }
}
