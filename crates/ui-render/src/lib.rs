//! UI rendering components for quillcraft.
//!
//! Each screen region has its own module; `layout` decides where they go.

pub mod layout;
pub mod menu;
pub mod scrollbar;
pub mod status_bar;
pub mod text_area;

pub use layout::ScreenLayout;
pub use menu::{dropdown_area, hit_test, submenu_area, title_areas, MenuBar, MenuHit};
pub use scrollbar::{render_horizontal, render_vertical, ScrollMetrics};
pub use status_bar::{StatusBar, StatusBarParams};
pub use text_area::{ScreenRow, TextArea, TextLayout, Viewport};
