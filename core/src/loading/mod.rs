//! Turns the gzip-compressed flat CSV / `.gr` inputs into the immutable
//! `TimetableStore`/`HubLabelStore` pair the round engine queries against.
//!
//! Reading order is load-bearing, not incidental: trips establish routes
//! and the global trip index; stop-routes establishes which stops exist;
//! the walking backend (transfers or hubs) comes next; stop-times is read
//! last so `stop_positions` can be derived from each route's first trip as
//! it streams past.

mod builder;
mod csv_source;
mod hubs;
mod stop_routes;
mod stop_times;
mod transfers;
mod trips;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use builder::{Dataset, load_dataset};
