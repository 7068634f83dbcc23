//! CTA and Divvy arrival board.
//!
//! Polls the CTA Train Tracker and Bus Tracker, the Divvy GBFS feeds and the
//! CTA service-alert timeline, and shows the results two stops to a page on a
//! small e-paper panel.

pub mod alerts;
pub mod board;
pub mod cache;
pub mod cta;
pub mod divvy;
pub mod domain;
pub mod error;
pub mod poller;
pub mod render;
pub mod retry;
pub mod settings;
