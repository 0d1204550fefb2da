//! Footpath-backend selection. A closed, two-variant enum rather than a
//! trait object: there are exactly two walking strategies and the choice is
//! fixed per dataset, not pluggable at runtime, so a `match` over an enum is
//! the natural fit over `dyn` dispatch.

use crate::store::HubLabelStore;

/// Which walking backend a dataset was loaded for, and which footpath
/// relaxation rules a query therefore uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Explicit transfer-list relaxation.
    R,
    /// Hub-labelling two-hop relaxation.
    Hlr,
}

impl Algorithm {
    /// Parses the CLI's `<R|HLR>` argument, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "R" => Some(Algorithm::R),
            "HLR" => Some(Algorithm::Hlr),
            _ => None,
        }
    }
}

/// The backend-specific half of a query's read-only inputs. `TimetableStore`
/// already carries the `R` transfer lists, so this only needs to attach the
/// hub store for `HLR`.
#[derive(Clone, Copy)]
pub enum WalkingBackend<'a> {
    R,
    Hlr(&'a HubLabelStore),
}

impl<'a> WalkingBackend<'a> {
    #[must_use]
    pub fn algorithm(self) -> Algorithm {
        match self {
            WalkingBackend::R => Algorithm::R,
            WalkingBackend::Hlr(_) => Algorithm::Hlr,
        }
    }

    #[must_use]
    pub fn hubs(self) -> Option<&'a HubLabelStore> {
        match self {
            WalkingBackend::R => None,
            WalkingBackend::Hlr(h) => Some(h),
        }
    }
}
