//! Public query entry points tying the round engine, footpath relaxer and
//! backend selection together, plus query-input validation.

use super::backend::WalkingBackend;
use super::direction::Direction;
use super::engine::run_rounds;
use super::state::RoundState;
use crate::error::QueryError;
use crate::model::StopId;
use crate::store::TimetableStore;
use crate::time::Time;

/// The maximum departure time accepted by a query, in seconds since
/// midnight of the service day.
pub const MAX_DEPARTURE: u32 = 86_400;

/// A single earliest-arrival or profile-leg request.
#[derive(Debug, Clone, Copy)]
pub struct QueryInput {
    pub source: StopId,
    pub target: StopId,
    pub departure: Time,
}

fn validate(timetable: &TimetableStore, backend: WalkingBackend<'_>, input: QueryInput) -> Result<(), QueryError> {
    timetable.validate_stop(input.source)?;
    timetable.validate_stop(input.target)?;
    if input.source == input.target {
        return Err(QueryError::IdenticalEndpoints);
    }
    if input.departure.as_secs().is_none_or(|s| s > MAX_DEPARTURE) {
        return Err(QueryError::DepartureOutOfRange);
    }
    if is_isolated(timetable, backend, input.source) {
        return Err(QueryError::IsolatedStop(input.source));
    }
    if is_isolated(timetable, backend, input.target) {
        return Err(QueryError::IsolatedStop(input.target));
    }
    Ok(())
}

/// A stop is isolated when it serves no route and has no way to walk
/// anywhere: no `R` transfers, or (for `HLR`) no hub labels at all.
fn is_isolated(timetable: &TimetableStore, backend: WalkingBackend<'_>, stop: StopId) -> bool {
    if timetable.stop(stop).is_valid() {
        return false;
    }
    match backend {
        WalkingBackend::R => timetable.transfers(stop).is_empty(),
        WalkingBackend::Hlr(hubs) => hubs.out_hubs(stop).is_empty() && hubs.in_hubs(stop).is_empty(),
    }
}

/// Runs a forward earliest-arrival query and returns the per-round arrival
/// label sequence at `target` (round 0 first). Round 0's label is the
/// pure-walking upper bound for `HLR`, or `+∞` for `R`.
pub fn earliest_arrival_query(
    timetable: &TimetableStore,
    backend: WalkingBackend<'_>,
    input: QueryInput,
) -> Result<Vec<Time>, QueryError> {
    validate(timetable, backend, input)?;
    let mut state = RoundState::new(Direction::Forward, timetable.num_stops());
    state.earliest_arrival[input.source] = input.departure;
    state.mark(input.source);

    if let WalkingBackend::Hlr(hubs) = backend {
        state.earliest_arrival[input.target] = hubs.walking_arrival(input.source, input.target, input.departure);
    }

    let round_one_trick = matches!(backend, WalkingBackend::Hlr(_));
    Ok(run_rounds(
        timetable,
        backend,
        Direction::Forward,
        input.source,
        Some(input.target),
        state,
        round_one_trick,
    ))
}

/// Runs a backward query: given a desired arrival time at `target`, finds
/// the latest feasible departure from `source`. Dualises every operator in
/// `earliest_arrival_query`. Used standalone and as the second half of each
/// profile-loop iteration.
pub fn latest_departure_query(
    timetable: &TimetableStore,
    backend: WalkingBackend<'_>,
    source: StopId,
    target: StopId,
    arrival: Time,
) -> Result<Vec<Time>, QueryError> {
    // Validation reuses the forward shape; departure/arrival both bound to
    // the same [0, 86400] service-day window.
    validate(
        timetable,
        backend,
        QueryInput {
            source,
            target,
            departure: arrival,
        },
    )?;

    let mut state = RoundState::new(Direction::Backward, timetable.num_stops());
    state.earliest_arrival[target] = arrival;
    state.mark(target);

    if let WalkingBackend::Hlr(hubs) = backend {
        state.earliest_arrival[source] = hubs.walking_arrival(target, source, arrival);
    }

    let round_one_trick = matches!(backend, WalkingBackend::Hlr(_));
    Ok(run_rounds(
        timetable,
        backend,
        Direction::Backward,
        target,
        Some(source),
        state,
        round_one_trick,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::test_fixtures::two_route_fixture;

    #[test]
    fn rejects_identical_endpoints() {
        let data = two_route_fixture();
        let err = earliest_arrival_query(
            &data.timetable,
            WalkingBackend::R,
            QueryInput {
                source: 0,
                target: 0,
                departure: Time::from_secs(0),
            },
        )
        .unwrap_err();
        assert_eq!(err, QueryError::IdenticalEndpoints);
    }

    #[test]
    fn rejects_unknown_stop() {
        let data = two_route_fixture();
        let err = earliest_arrival_query(
            &data.timetable,
            WalkingBackend::R,
            QueryInput {
                source: 999,
                target: 1,
                departure: Time::from_secs(0),
            },
        )
        .unwrap_err();
        assert_eq!(err, QueryError::UnknownStop(999));
    }

    #[test]
    fn rejects_departure_out_of_range() {
        let data = two_route_fixture();
        let err = earliest_arrival_query(
            &data.timetable,
            WalkingBackend::R,
            QueryInput {
                source: 0,
                target: 1,
                departure: Time::from_secs(MAX_DEPARTURE + 1),
            },
        )
        .unwrap_err();
        assert_eq!(err, QueryError::DepartureOutOfRange);
    }

    #[test]
    fn finds_direct_trip_on_connected_route() {
        let data = two_route_fixture();
        let labels = earliest_arrival_query(
            &data.timetable,
            WalkingBackend::R,
            QueryInput {
                source: 0,
                target: 2,
                departure: Time::from_secs(0),
            },
        )
        .unwrap();
        assert!(labels.last().unwrap().is_finite());
    }
}
