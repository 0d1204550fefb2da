//! Parses `trips.csv.gz` (columns `route_id,trip_id`), the first file read:
//! every other file refers to routes or trips this one establishes.
//!
//! `RouteId` and `StopId` double as direct `Vec` indices throughout this
//! crate (dense, non-negative ids), so every table built here is indexed by
//! id rather than by encounter order.

use hashbrown::HashMap;

use super::csv_source::{csv_gz, field};
use crate::error::LoadError;
use crate::model::RouteId;

const FILE: &str = "trips.csv.gz";

/// One route as seen while streaming `trips.csv.gz`, before its stop
/// pattern is known (that arrives later, from the first trip's rows in
/// `stop_times.csv.gz`).
#[derive(Default)]
pub(crate) struct RouteTrips {
    /// Global trip ids, in file order — this order *is* the trip index
    /// used everywhere else (stop_times rows, FIFO checks).
    pub(crate) trip_ids: Vec<usize>,
}

pub(crate) struct TripsTable {
    /// Indexed by `RouteId`; routes absent from `trips.csv.gz` (dense ids
    /// assume none, but a gap is tolerated as a zero-trip route rather than
    /// a panic).
    pub(crate) routes: Vec<RouteTrips>,
    /// Global trip id -> (route, trip index within that route). Sized to
    /// the largest trip id seen plus one; unused slots hold `None` and are
    /// never read.
    pub(crate) trip_positions: Vec<Option<(RouteId, usize)>>,
}

pub(crate) fn load_trips(path: &std::path::Path) -> Result<TripsTable, LoadError> {
    let mut reader = csv_gz(path)?;
    let mut by_route: HashMap<RouteId, Vec<usize>> = HashMap::new();
    let mut trip_index: Vec<(usize, RouteId, usize)> = Vec::new(); // (global trip id, route, trip idx)
    let mut max_route_id = 0usize;

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv { file: FILE, source })?;
        let route_id: RouteId = field(&record, 0, FILE, "route_id")?;
        let trip_id: usize = field(&record, 1, FILE, "trip_id")?;

        max_route_id = max_route_id.max(route_id);
        let trip_ids = by_route.entry(route_id).or_default();
        let trip_idx = trip_ids.len();
        trip_ids.push(trip_id);
        trip_index.push((trip_id, route_id, trip_idx));
    }

    let mut routes: Vec<RouteTrips> = if trip_index.is_empty() {
        Vec::new()
    } else {
        (0..=max_route_id).map(|_| RouteTrips::default()).collect()
    };
    for (route_id, trip_ids) in by_route {
        routes[route_id].trip_ids = trip_ids;
    }

    let max_trip_id = trip_index.iter().map(|&(id, ..)| id).max();
    let mut trip_positions = vec![None; max_trip_id.map_or(0, |m| m + 1)];
    for (trip_id, route_id, trip_idx) in trip_index {
        trip_positions[trip_id] = Some((route_id, trip_idx));
    }

    Ok(TripsTable {
        routes,
        trip_positions,
    })
}
