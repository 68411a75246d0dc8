//! Editor commands reachable from the menu bar and keyboard shortcuts.

use quillcraft_theme::ThemeKind;

/// Tab stop width offered by the Format > Tabs menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabWidth {
    Two,
    #[default]
    Four,
    Eight,
}

impl TabWidth {
    pub const ALL: [TabWidth; 3] = [TabWidth::Two, TabWidth::Four, TabWidth::Eight];

    pub fn columns(self) -> usize {
        match self {
            TabWidth::Two => 2,
            TabWidth::Four => 4,
            TabWidth::Eight => 8,
        }
    }

    pub fn from_columns(columns: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.columns() == columns)
    }
}

/// A user-triggered editor operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // File
    New,
    Open,
    Save,
    SaveAs,
    Quit,

    // Edit
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    Find,
    Replace,

    // Format
    BackgroundColor,
    TextColor,
    FontStyle,
    FontSize,
    ToggleWordWrap,
    SetTabWidth(TabWidth),
    SetTheme(ThemeKind),

    // Help
    ViewHelp,
    About,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_width_columns() {
        let columns: Vec<usize> = TabWidth::ALL.iter().map(|w| w.columns()).collect();
        assert_eq!(columns, vec![2, 4, 8]);
        assert_eq!(TabWidth::from_columns(8), Some(TabWidth::Eight));
        assert_eq!(TabWidth::from_columns(3), None);
        assert_eq!(TabWidth::default().columns(), 4);
    }
}
