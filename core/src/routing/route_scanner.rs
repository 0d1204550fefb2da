//! The route queue and the per-(route, boarding-stop) scan that propagates
//! arrival labels along a route, with local and target pruning. Generalised
//! over `Direction` so the same scan serves both the forward and backward
//! searches, and backed by a query-local memoisation cache for the
//! boarding-trip binary search.

use hashbrown::HashMap;

use super::direction::Direction;
use super::state::RoundState;
use crate::model::{RouteId, StopId};
use crate::store::TimetableStore;
use crate::time::Time;

/// Route queue construction: for each marked stop and each route serving
/// it, keep only the earliest (forward) / latest (backward) boarding
/// position — a route is scanned at most once per round regardless of how
/// many of its stops were marked.
pub(crate) fn build_route_queue(
    timetable: &TimetableStore,
    direction: Direction,
    marked: impl IntoIterator<Item = StopId>,
) -> HashMap<RouteId, StopId> {
    let backward = direction == Direction::Backward;
    let mut queue: HashMap<RouteId, StopId> = HashMap::new();
    for stop in marked {
        for &route in timetable.routes_for_stop(stop) {
            match queue.get(&route).copied() {
                None => {
                    queue.insert(route, stop);
                }
                Some(current) => {
                    let cur_pos = timetable.boarding_position(route, current, backward);
                    let new_pos = timetable.boarding_position(route, stop, backward);
                    if let (Some(cur_pos), Some(new_pos)) = (cur_pos, new_pos) {
                        let better = if backward { new_pos > cur_pos } else { new_pos < cur_pos };
                        if better {
                            queue.insert(route, stop);
                        }
                    }
                }
            }
        }
    }
    queue
}

/// The `earliest_trip`/`latest_trip` binary search, memoised per query on
/// `(route, stop_idx, t0)`. A fresh cache is created per query and
/// discarded at query end — sharing it across queries would mix unrelated
/// key spaces for no benefit.
pub(crate) struct TripCache {
    direction: Direction,
    memo: HashMap<(RouteId, usize, Time), Option<usize>>,
}

impl TripCache {
    pub(crate) fn new(direction: Direction) -> Self {
        TripCache {
            direction,
            memo: HashMap::new(),
        }
    }

    /// Forward: earliest trip of `route` whose departure at `stop_idx` is
    /// `>= t0`. Backward: latest trip whose arrival at `stop_idx` is
    /// `<= t0`. `None` if no such trip exists. Trip columns are
    /// non-decreasing (FIFO), so this is a standard lower-bound binary
    /// search in either direction.
    pub(crate) fn find(&mut self, timetable: &TimetableStore, route: RouteId, stop_idx: usize, t0: Time) -> Option<usize> {
        let key = (route, stop_idx, t0);
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }
        let num_trips = timetable.route(route).num_trips;
        let result = match self.direction {
            Direction::Forward => {
                let (mut lo, mut hi) = (0usize, num_trips);
                let mut found = None;
                while lo < hi {
                    let mid = lo + (hi - lo) / 2;
                    if timetable.trip(route, mid)[stop_idx].departure >= t0 {
                        found = Some(mid);
                        hi = mid;
                    } else {
                        lo = mid + 1;
                    }
                }
                found
            }
            Direction::Backward => {
                // Largest trip index whose arrival at `stop_idx` is <= t0:
                // binary search the reversed order (arrivals are
                // non-decreasing in trip index, so non-increasing when
                // scanned from the last trip backwards).
                let (mut lo, mut hi) = (0usize, num_trips);
                let mut found = None;
                while lo < hi {
                    let mid = lo + (hi - lo) / 2;
                    let idx_from_end = num_trips - 1 - mid;
                    if timetable.trip(route, idx_from_end)[stop_idx].arrival <= t0 {
                        found = Some(idx_from_end);
                        hi = mid;
                    } else {
                        lo = mid + 1;
                    }
                }
                found
            }
        };
        self.memo.insert(key, result);
        result
    }
}

/// Scans `route` starting from `boarding_stop`, updating `state`'s labels.
/// `prev` is the start-of-round snapshot of `earliest_arrival` taken by the
/// copy stage; `terminal` (the target in a forward search, the source in a
/// backward search) only narrows the pruning bound — every stop along the
/// way, terminal or not, is labelled with the trip's true arrival
/// (forward) or departure (backward) at that stop, since that label is
/// both what footpath relaxation walks from and what the next round's
/// re-boarding check reads back out of `prev`.
///
/// Appends every stop whose label improved to `newly_marked`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn scan_route(
    timetable: &TimetableStore,
    direction: Direction,
    route: RouteId,
    boarding_stop: StopId,
    terminal: Option<StopId>,
    prev: &[Time],
    state: &mut RoundState,
    cache: &mut TripCache,
    newly_marked: &mut Vec<StopId>,
) {
    let backward = direction == Direction::Backward;
    let stops = timetable.route_stops(route);
    let Some(start_idx) = timetable.boarding_position(route, boarding_stop, backward) else {
        return;
    };

    let mut trip: Option<usize> = None;
    let target_bound = state.target_bound(terminal);

    let mut visit = |i: usize, trip: &mut Option<usize>| {
        let p_i = stops[i];

        if let Some(t) = *trip {
            let row_time = timetable.trip(route, t)[i];
            let actual = if backward { row_time.departure } else { row_time.arrival };

            let bound = direction.better(state.earliest_arrival[p_i], target_bound);
            if direction.improves(actual, bound) && state.update(p_i, actual) {
                newly_marked.push(p_i);
            }
        }

        let current_board = match *trip {
            Some(t) => {
                let row_time = timetable.trip(route, t)[i];
                if backward { row_time.arrival } else { row_time.departure }
            }
            None => direction.unreached(),
        };
        if direction.reaches(prev[p_i], current_board) {
            *trip = cache.find(timetable, route, i, prev[p_i]);
        }
    };

    if backward {
        for i in (0..=start_idx).rev() {
            visit(i, &mut trip);
        }
    } else {
        for i in start_idx..stops.len() {
            visit(i, &mut trip);
        }
    }
}
