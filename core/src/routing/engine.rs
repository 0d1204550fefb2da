//! The round-based fixed-point loop.
//!
//! Forward and backward queries share this one loop, parameterised by
//! `Direction`; only the initialisation and the interpretation of the
//! per-round label vector differ between "plain earliest-arrival query" and
//! "one leg of the profile loop" (see `routing::profile`).

use log::trace;

use super::backend::WalkingBackend;
use super::direction::Direction;
use super::footpath::relax;
use super::route_scanner::{TripCache, build_route_queue, scan_route};
use super::state::RoundState;
use crate::model::StopId;
use crate::store::TimetableStore;
use crate::time::Time;

/// A generous ceiling on the number of rounds a single query may run. There
/// is no caller-supplied transfer cap, so this bound exists only to turn a
/// hypothetical non-terminating label sequence into a logged warning
/// instead of an unbounded loop.
const MAX_ROUNDS: usize = 64;

/// Runs the round loop for one source-rooted query and returns the
/// per-round arrival label at `target` (round 0 first), or the whole
/// `earliest_arrival` vector at the end if `target` is `None`.
///
/// Callers seed `source` (and, for an `HLR` earliest-arrival query, the
/// pure-walking bound at `target`) into `state` before calling this;
/// profile legs skip that target seed.
pub(crate) fn run_rounds(
    timetable: &TimetableStore,
    backend: WalkingBackend<'_>,
    direction: Direction,
    source: StopId,
    target: Option<StopId>,
    mut state: RoundState,
    round_one_source_trick: bool,
) -> Vec<Time> {
    let mut labels = vec![target.map_or(direction.unreached(), |t| state.earliest_arrival[t])];

    for round in 1..=MAX_ROUNDS {
        let prev_arrival = state.earliest_arrival.clone();

        let route_marked = state.take_marked();
        let queue = build_route_queue(timetable, direction, route_marked);

        let mut cache = TripCache::new(direction);
        let mut route_improved = Vec::new();
        for (route, boarding_stop) in queue {
            scan_route(
                timetable,
                direction,
                route,
                boarding_stop,
                target,
                &prev_arrival,
                &mut state,
                &mut cache,
                &mut route_improved,
            );
        }
        let stage2_progress = !route_improved.is_empty();
        for stop in route_improved {
            state.mark(stop);
        }

        if round == 1 && round_one_source_trick {
            state.mark(source);
        }

        let footpath_marked = state.marked.clone();
        let mut footpath_improved = Vec::new();
        relax(backend, direction, timetable, &footpath_marked, &mut state, target, &mut footpath_improved);
        let stage3_progress = !footpath_improved.is_empty();
        for stop in footpath_improved {
            state.mark(stop);
        }

        if round == 1 && round_one_source_trick {
            state.unmark(source);
        }

        labels.push(target.map_or(direction.unreached(), |t| state.earliest_arrival[t]));

        if !stage2_progress && !stage3_progress {
            break;
        }
        if round == MAX_ROUNDS {
            trace!("query from stop {source} did not converge within {MAX_ROUNDS} rounds");
        }
    }

    labels
}
