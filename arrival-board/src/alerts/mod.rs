//! CTA service alerts read from the agency's post timeline.

mod client;
mod error;
mod text;

pub use client::{AlertClient, AlertConfig, PostDto, PostsResponse, first_status_post};
pub use error::AlertError;
pub use text::{AlertPage, clean_post, paginate, wrap};

/// Characters per wrapped alert line.
pub const ALERT_LINE_WIDTH: usize = 25;

/// Wrapped lines per alert page.
pub const ALERT_LINES_PER_PAGE: usize = 4;

/// Clean, wrap and page a status post for the panel.
pub fn alert_pages(post: &str) -> Vec<AlertPage> {
    let lines = wrap(&clean_post(post), ALERT_LINE_WIDTH);
    paginate(&lines, ALERT_LINES_PER_PAGE)
}
