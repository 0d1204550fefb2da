use crate::model::{NodeId, StopId};
use crate::time::Duration;

/// A transit stop as stored by the timetable store.
///
/// `routes_start`/`routes_len` and `transfers_start`/`transfers_len` are
/// offsets into the flat `stop_routes` / `transfers` arrays owned by
/// `TimetableStore`, not independently allocated `Vec`s — see the module
/// docs on `model` for why.
#[derive(Debug, Clone)]
pub struct Stop {
    pub id: StopId,
    pub routes_start: usize,
    pub routes_len: usize,
    pub transfers_start: usize,
    pub transfers_len: usize,
}

impl Stop {
    #[must_use]
    pub fn invalid(id: StopId) -> Self {
        Stop {
            id,
            routes_start: 0,
            routes_len: 0,
            transfers_start: 0,
            transfers_len: 0,
        }
    }

    /// A stop is valid when it is served by at least one route.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.routes_len > 0
    }
}

/// A footpath from one stop to another, used by the `R` (explicit transfer
/// list) walking backend. Stored sorted ascending by `duration` within each
/// stop's slice, so the relaxer's early-exit scan can stop as soon as the
/// cumulative time exceeds the current target bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub target_stop: StopId,
    pub duration: Duration,
}

/// One entry in a hub label: the walking time to (out-hub) or from (in-hub)
/// a hub node, paired with the node itself. Sorted ascending by `time`
/// within each stop's / hub's slice for the same early-exit reason as
/// `Transfer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubEntry {
    pub time: Duration,
    pub node: NodeId,
}
