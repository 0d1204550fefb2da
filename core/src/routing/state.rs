use fixedbitset::FixedBitSet;

use super::direction::Direction;
use crate::model::StopId;
use crate::time::Time;

/// Per-query state for the round loop: the running best label per stop plus
/// the marked-stop set each round consumes and rebuilds.
///
/// `earliest_arrival` is a single array across the whole query — rounds
/// never get their own private copy — because a stop's label only ever
/// improves (forward) or worsens-never (backward is the dual), so "the
/// value at the end of round k" and "the best value seen so far" are the
/// same quantity. What *does* need a private snapshot is the start-of-round
/// value, since a round's route scans must only ever see labels as they
/// stood before this round's own updates (otherwise a route scanned late in
/// the round could "see" an improvement a route scanned earlier in the
/// *same* round produced, collapsing two transfers into one journey leg).
/// The round engine owns that snapshot (`prev_arrival`, see
/// `engine::run_round`) and passes it into the route scanner and footpath
/// relaxer explicitly, rather than storing it here.
#[derive(Debug)]
pub struct RoundState {
    pub direction: Direction,
    pub earliest_arrival: Vec<Time>,
    marked_set: FixedBitSet,
    pub marked: Vec<StopId>,
}

impl RoundState {
    #[must_use]
    pub fn new(direction: Direction, num_stops: usize) -> Self {
        RoundState {
            direction,
            earliest_arrival: vec![direction.unreached(); num_stops],
            marked_set: FixedBitSet::with_capacity(num_stops),
            marked: Vec::new(),
        }
    }

    /// Marks `stop`, if it is not already marked this round.
    pub fn mark(&mut self, stop: StopId) {
        if !self.marked_set.contains(stop) {
            self.marked_set.insert(stop);
            self.marked.push(stop);
        }
    }

    #[must_use]
    pub fn is_marked(&self, stop: StopId) -> bool {
        self.marked_set.contains(stop)
    }

    /// Unmarks `stop`. Used only by the round-1 source trick, which marks
    /// the source for the footpath stage and then retracts it so round 2's
    /// route-scan stage does not re-expand from it.
    pub fn unmark(&mut self, stop: StopId) {
        if self.marked_set.contains(stop) {
            self.marked_set.set(stop, false);
            self.marked.retain(|&s| s != stop);
        }
    }

    /// Drains the marked-stop set, returning its previous contents. The
    /// route-scan stage consumes and clears it before building the route
    /// queue.
    pub fn take_marked(&mut self) -> Vec<StopId> {
        self.marked_set.clear();
        std::mem::take(&mut self.marked)
    }

    /// Applies a candidate label at `stop`. Returns `true` iff it strictly
    /// improved the running best (the condition under which the round
    /// engine marks the stop).
    pub fn update(&mut self, stop: StopId, candidate: Time) -> bool {
        if self.direction.improves(candidate, self.earliest_arrival[stop]) {
            self.earliest_arrival[stop] = candidate;
            true
        } else {
            false
        }
    }

    /// The current pruning bound: the best known label at `target`, or the
    /// direction's "unreached" sentinel if no target is tracked.
    #[must_use]
    pub fn target_bound(&self, target: Option<StopId>) -> Time {
        target.map_or(self.direction.unreached(), |t| self.earliest_arrival[t])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_reports_improvement_only() {
        let mut state = RoundState::new(Direction::Forward, 2);
        assert!(state.update(0, Time::from_secs(100)));
        assert!(!state.update(0, Time::from_secs(200)));
        assert!(state.update(0, Time::from_secs(50)));
    }

    #[test]
    fn mark_is_idempotent() {
        let mut state = RoundState::new(Direction::Forward, 3);
        state.mark(1);
        state.mark(1);
        assert_eq!(state.marked, vec![1]);
    }

    #[test]
    fn take_marked_clears_set() {
        let mut state = RoundState::new(Direction::Forward, 3);
        state.mark(0);
        state.mark(2);
        let taken = state.take_marked();
        assert_eq!(taken.len(), 2);
        assert!(state.marked.is_empty());
        assert!(!state.is_marked(0));
    }
}
