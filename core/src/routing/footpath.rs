//! The footpath relaxer, in its two variants: explicit transfer lists and
//! hub-label two-hop relaxation.
//!
//! Both variants follow the same shape: scan each just-marked stop's
//! ascending-sorted neighbour list, stop early once the cumulative walking
//! time exceeds the current target bound, and collect newly-improved stops
//! in a side buffer to mark only after the scan completes — two passes, to
//! avoid mutating the marked-stop bitset while iterating it.

use hashbrown::HashMap;

use super::backend::WalkingBackend;
use super::direction::Direction;
use super::state::RoundState;
use crate::model::{NodeId, StopId};
use crate::time::Time;

/// Runs one footpath-relaxation stage over `marked` (the stops the route
/// scan just reached this round), updating `state` and appending every
/// newly-improved stop to `newly_marked`.
///
/// Backward search reuses the same `R` transfer lists and hub tables as
/// forward search, under the assumption that a footpath's walking time is
/// symmetric (see DESIGN.md) — only the direction of time advancement and
/// the hub roles are dualised.
pub(crate) fn relax(
    backend: WalkingBackend<'_>,
    direction: Direction,
    timetable: &crate::store::TimetableStore,
    marked: &[StopId],
    state: &mut RoundState,
    target: Option<StopId>,
    newly_marked: &mut Vec<StopId>,
) {
    match backend {
        WalkingBackend::R => relax_transfers(timetable, direction, marked, state, target, newly_marked),
        WalkingBackend::Hlr(hubs) => relax_hubs(hubs, direction, marked, state, target, newly_marked),
    }
}

fn relax_transfers(
    timetable: &crate::store::TimetableStore,
    direction: Direction,
    marked: &[StopId],
    state: &mut RoundState,
    target: Option<StopId>,
    newly_marked: &mut Vec<StopId>,
) {
    let target_bound = state.target_bound(target);
    for &s in marked {
        let base = state.earliest_arrival[s];
        for transfer in timetable.transfers(s) {
            let tmp = direction.advance(base, transfer.duration);
            if direction.improves(target_bound, tmp) {
                break;
            }
            if state.update(transfer.target_stop, tmp) {
                newly_marked.push(transfer.target_stop);
            }
        }
    }
}

fn relax_hubs(
    hubs: &crate::store::HubLabelStore,
    direction: Direction,
    marked: &[StopId],
    state: &mut RoundState,
    target: Option<StopId>,
    newly_marked: &mut Vec<StopId>,
) {
    let target_bound = state.target_bound(target);
    let mut tmp_hub: HashMap<NodeId, Time> = HashMap::new();
    let mut improved_hubs: Vec<NodeId> = Vec::new();

    // Stage 1: propagate each marked stop into the hubs it carries.
    for &s in marked {
        let base = state.earliest_arrival[s];
        let out = if direction == Direction::Forward { hubs.out_hubs(s) } else { hubs.in_hubs(s) };
        for entry in out {
            let tmp = direction.advance(base, entry.time);
            if direction.improves(target_bound, tmp) {
                break;
            }
            let slot = tmp_hub.entry(entry.node).or_insert(direction.unreached());
            if direction.improves(tmp, *slot) {
                *slot = tmp;
                improved_hubs.push(entry.node);
            }
        }
    }

    // Stage 2: propagate each improved hub back out to the stops it serves.
    for hub in improved_hubs {
        let Some(&tmp_at_hub) = tmp_hub.get(&hub) else { continue };
        let inverse = if direction == Direction::Forward {
            hubs.inverse_in_hubs(hub)
        } else {
            hubs.inverse_out_hubs(hub)
        };
        for &(w, stop) in inverse {
            let tmp = direction.advance(tmp_at_hub, w);
            if direction.improves(target_bound, tmp) {
                break;
            }
            if state.update(stop, tmp) {
                newly_marked.push(stop);
            }
        }
    }
}
