//! Board state and the transform from fetch results to display records.
//!
//! The poller owns a [`BoardState`] and moves it through
//! [`BoardState::apply`] once per cycle. Nothing else mutates it.

mod input;
mod record;
mod state;
mod transform;

pub use input::{BoardRules, BusFetch, CycleInput, DockFetch, TrainFetch};
pub use record::{
    DisplayRecord, ItemKind, MAX_ETAS, NO_ARRIVALS, NO_DOCK_STATUS, eta_line, join_items,
};
pub use state::{BikeDock, BoardState, BusKey, BusStop, TrainStop};
