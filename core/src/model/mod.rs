//! Data model for the timetable and walking-graph backends.
//!
//! Dense integer ids and flat, contiguous arrays replace hash-map-keyed
//! tables throughout: `stop_times` is a row-major 2-D table indexed by
//! `(trip_idx, stop_idx)`, and per-stop/per-route lists are slices into a
//! single backing `Vec`, not independently heap-allocated collections. This
//! is the layout the round engine's hot scan loop depends on for cache
//! locality (see `routing::route_scanner`).

mod route;
mod stop;

pub use route::{Route, RouteId, StopTime};
pub use stop::{HubEntry, Stop, Transfer};

/// A dense, non-negative stop identifier; also used to index `Vec<Stop>`.
pub type StopId = usize;

/// A walking-graph node identifier used by the hub-label backend. Distinct
/// from `StopId` in general (a stop need not be a hub node and vice versa).
pub type NodeId = usize;

/// A trip's position within its route's trip list, not a global trip id.
pub type TripIdx = usize;
