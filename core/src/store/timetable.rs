//! The in-memory, flat, read-only timetable store.

use hashbrown::HashMap;

use crate::error::QueryError;
use crate::model::{Route, RouteId, Stop, StopId, StopTime, Transfer};
use crate::time::Time;

/// Flat, immutable timetable plus the `R` (explicit transfer list) walking
/// backend. Built once by `crate::loading` and shared by reference across
/// queries; nothing here is ever mutated after construction.
#[derive(Debug, Clone)]
pub struct TimetableStore {
    pub(crate) routes: Vec<Route>,
    pub(crate) route_stops: Vec<StopId>,
    pub(crate) stop_times: Vec<StopTime>,
    pub(crate) stops: Vec<Stop>,
    pub(crate) stop_routes: Vec<RouteId>,
    pub(crate) transfers: Vec<Transfer>,
    /// First/last occurrence index of `stop` within `route`'s stop
    /// sequence, keyed `(route, stop)`. A route may visit a stop more than
    /// once (a circular route); both occurrences are kept so the forward
    /// queue can use the first and the backward queue the last.
    pub(crate) stop_positions: HashMap<(RouteId, StopId), Vec<usize>>,
    /// Dense global trip id -> (route, trip index within that route), built
    /// while parsing the `trips` file. `None` for ids never seen (the id
    /// space need not be contiguous). Not consulted by the round engine
    /// itself; exposed for diagnostics and result reconstruction.
    pub(crate) trip_positions: Vec<Option<(RouteId, usize)>>,
    pub(crate) max_stop_id: StopId,
    pub(crate) max_node_id: usize,
}

impl TimetableStore {
    #[must_use]
    pub fn max_stop_id(&self) -> StopId {
        self.max_stop_id
    }

    #[must_use]
    pub fn max_node_id(&self) -> usize {
        self.max_node_id
    }

    #[must_use]
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn validate_stop(&self, stop: StopId) -> Result<(), QueryError> {
        if stop >= self.stops.len() {
            Err(QueryError::UnknownStop(stop))
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn stop(&self, stop: StopId) -> &Stop {
        &self.stops[stop]
    }

    #[must_use]
    pub fn route(&self, route: RouteId) -> &Route {
        &self.routes[route]
    }

    #[must_use]
    pub fn trip_position(&self, trip_id: usize) -> Option<(RouteId, usize)> {
        self.trip_positions.get(trip_id).copied().flatten()
    }

    /// Stop ids along `route`, in traversal order (may repeat).
    #[must_use]
    pub fn route_stops(&self, route: RouteId) -> &[StopId] {
        let r = &self.routes[route];
        &self.route_stops[r.stops_start..r.stops_start + r.num_stops]
    }

    /// `StopTime` row for the `trip_idx`-th trip of `route`.
    #[must_use]
    pub fn trip(&self, route: RouteId, trip_idx: usize) -> &[StopTime] {
        let r = &self.routes[route];
        let start = r.trips_start + trip_idx * r.num_stops;
        &self.stop_times[start..start + r.num_stops]
    }

    /// Footpaths out of `stop`, sorted ascending by duration.
    #[must_use]
    pub fn transfers(&self, stop: StopId) -> &[Transfer] {
        let s = &self.stops[stop];
        &self.transfers[s.transfers_start..s.transfers_start + s.transfers_len]
    }

    /// Routes serving `stop`.
    #[must_use]
    pub fn routes_for_stop(&self, stop: StopId) -> &[RouteId] {
        let s = &self.stops[stop];
        &self.stop_routes[s.routes_start..s.routes_start + s.routes_len]
    }

    /// First (forward) or last (backward) position at which `stop` appears
    /// in `route`'s stop sequence, or `None` if the route never visits it.
    #[must_use]
    pub fn boarding_position(&self, route: RouteId, stop: StopId, backward: bool) -> Option<usize> {
        let positions = self.stop_positions.get(&(route, stop))?;
        if backward {
            positions.last().copied()
        } else {
            positions.first().copied()
        }
    }

}

#[cfg(test)]
mod tests {
    use super::super::super::loading::test_fixtures::two_route_fixture;

    #[test]
    fn route_stops_round_trip_through_offsets() {
        let data = two_route_fixture();
        assert_eq!(data.timetable.route_stops(0), &[0, 1, 2]);
    }

    #[test]
    fn boarding_position_picks_first_or_last_occurrence() {
        let data = two_route_fixture();
        // Route 0 visits stops [0, 1, 2] without repeats.
        assert_eq!(data.timetable.boarding_position(0, 1, false), Some(1));
        assert_eq!(data.timetable.boarding_position(0, 1, true), Some(1));
    }
}
