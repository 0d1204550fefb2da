use crate::time::{Duration, Time};

/// Selects forward (earliest-arrival) or backward (latest-departure) search.
/// Both directions share the same round loop, route scanner and footpath
/// relaxer code, parameterised by this enum rather than duplicated — see the
/// design notes on preferring monomorphic parameterisation over a virtual
/// dispatch hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The "not yet reached" sentinel for this direction: `+∞` forward,
    /// `−∞` backward.
    #[must_use]
    pub const fn unreached(self) -> Time {
        match self {
            Direction::Forward => Time::INFINITY,
            Direction::Backward => Time::NEG_INFINITY,
        }
    }

    /// Advance `time` by `dur` in this direction: `+` for forward, `−` for
    /// backward, saturating rather than wrapping in either case.
    #[must_use]
    pub fn advance(self, time: Time, dur: Duration) -> Time {
        match self {
            Direction::Forward => time.saturating_add(dur),
            Direction::Backward => time.saturating_sub(dur),
        }
    }

    /// Whether `candidate` strictly improves on `current`: `<` forward,
    /// `>` backward.
    #[must_use]
    pub fn improves(self, candidate: Time, current: Time) -> bool {
        match self {
            Direction::Forward => candidate < current,
            Direction::Backward => candidate > current,
        }
    }

    /// `min` (forward) or `max` (backward) of two times.
    #[must_use]
    pub fn better(self, a: Time, b: Time) -> Time {
        if self.improves(a, b) { a } else { b }
    }

    /// Whether `a` is at least as advanced as `b` in this direction: `<=`
    /// forward (`a` no later than `b`), `>=` backward (`a` no earlier).
    #[must_use]
    pub fn reaches(self, a: Time, b: Time) -> bool {
        match self {
            Direction::Forward => a <= b,
            Direction::Backward => a >= b,
        }
    }
}
