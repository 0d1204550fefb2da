//! The backward query wrapper and the ε-advance profile loop that
//! enumerates the Pareto front of (departure, arrival) pairs over a day.

use log::debug;

use super::backend::WalkingBackend;
use super::query::{MAX_DEPARTURE, latest_departure_query};
use crate::error::QueryError;
use crate::model::StopId;
use crate::store::TimetableStore;
use crate::time::Time;

/// One ε step, in seconds — the smallest representable time unit, used to
/// nudge the next candidate departure strictly past the one just emitted.
const EPSILON: u32 = 1;

/// Reduces a per-round label sequence to its Pareto set: strictly
/// decreasing, with every `+∞` (and every later-or-equal repeat) dropped.
/// Input order is round 0 first; output preserves that order.
#[must_use]
pub fn remove_dominated(times: &[Time]) -> Vec<Time> {
    let mut out = Vec::new();
    let mut running_min = Time::INFINITY;
    for &t in times {
        if t.is_finite() && t < running_min {
            out.push(t);
            running_min = t;
        }
    }
    out
}

/// One (departure, arrival) pair in a profile query's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEntry {
    pub departure: Time,
    pub arrival: Time,
}

/// Runs the profile loop from `source` to `target`: repeated
/// forward/backward alternation, each leg seeded at an ε-advance of the
/// previous leg's latest feasible departure, until the 24-hour window is
/// exhausted or a forward leg finds nothing new.
///
/// For `HLR`, the result additionally passes the pure-walking dominance
/// filter: only entries beating the pure-walking travel time survive, with
/// `(0, walking_time)` prepended as the baseline.
pub fn profile_query(
    timetable: &TimetableStore,
    backend: WalkingBackend<'_>,
    source: StopId,
    target: StopId,
) -> Result<Vec<ProfileEntry>, QueryError> {
    let mut entries = Vec::new();
    let mut departure = Time::from_secs(0);

    loop {
        let forward_labels = super::query::earliest_arrival_query(
            timetable,
            backend,
            super::query::QueryInput {
                source,
                target,
                departure,
            },
        )?;
        let candidates = remove_dominated(&forward_labels);
        if candidates.is_empty() {
            break;
        }

        // `remove_dominated` yields a strictly decreasing sequence (round 0
        // first), so the earliest (smallest) reachable arrival is its last
        // element.
        let Some(&arrival) = candidates.last() else { break };

        let backward_labels = latest_departure_query(timetable, backend, source, target, arrival)?;
        let latest_departure = backward_labels
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .max()
            .unwrap_or(departure);

        entries.push(ProfileEntry {
            departure: latest_departure,
            arrival,
        });
        debug!("profile leg: depart {latest_departure} arrive {arrival}");

        let Some(next_departure) = latest_departure.as_secs().map(|s| s.saturating_add(EPSILON)) else {
            break;
        };
        if next_departure > MAX_DEPARTURE {
            break;
        }
        departure = Time::from_secs(next_departure);
    }

    if let WalkingBackend::Hlr(hubs) = backend {
        entries = apply_walking_dominance(entries, hubs.walking_time(source, target));
    }

    Ok(entries)
}

fn apply_walking_dominance(
    entries: Vec<ProfileEntry>,
    walking_time: Option<crate::time::Duration>,
) -> Vec<ProfileEntry> {
    let Some(w) = walking_time else { return entries };
    let mut filtered: Vec<ProfileEntry> = entries
        .into_iter()
        .filter(|e| e.arrival.is_finite() && e.arrival - e.departure < w)
        .collect();
    filtered.insert(
        0,
        ProfileEntry {
            departure: Time::from_secs(0),
            arrival: Time::from_secs(0) + w,
        },
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_dominated_keeps_strictly_decreasing_prefix() {
        let times = [
            Time::from_secs(100),
            Time::from_secs(90),
            Time::from_secs(95),
            Time::from_secs(80),
            Time::INFINITY,
        ];
        assert_eq!(
            remove_dominated(&times),
            vec![Time::from_secs(100), Time::from_secs(90), Time::from_secs(80)]
        );
    }

    #[test]
    fn remove_dominated_drops_all_infinite() {
        let times = [Time::INFINITY, Time::INFINITY];
        assert!(remove_dominated(&times).is_empty());
    }
}
