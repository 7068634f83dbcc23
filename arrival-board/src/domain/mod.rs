//! Domain types for the arrival board.
//!
//! These are the validated values the feeds are converted into before the
//! board transform sees them. Nothing in here performs I/O.

mod eta;
mod geo;
mod route;
mod time;
mod words;

pub use eta::{Eta, LIVE_GLYPH, SCHEDULED_GLYPH};
pub use geo::HomeLocation;
pub use route::train_line_name;
pub use time::{CTA_TIMESTAMP_FORMAT, TimeError, minutes_between, parse_cta_timestamp};
pub use words::{WordReplacer, bus_destination_abbreviations};
