//! Drawing pages and pushing them to a panel.

mod canvas;
mod icons;
mod layout;
mod panel;

pub use canvas::Canvas;
pub use icons::{ICON_SIZE, Icon, draw_icon};
pub use layout::{
    ALERT_HEADER, PANEL_SIZE, Page, RenderedPage, alert_page_list, record_pages, render,
};
pub use panel::{ConsolePanel, MemoryPanel, Panel, PanelError, PngPanel};
