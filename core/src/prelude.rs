//! Convenience re-export of the types most callers need: the two stores,
//! the backend/direction selectors, the query entry points, and the time
//! types everything is expressed in.

pub use crate::error::{LoadError, QueryError};
pub use crate::loading::{Dataset, load_dataset};
pub use crate::model::{RouteId, StopId};
pub use crate::routing::{
    Algorithm, GeneratedQuery, ProfileEntry, QueryInput, WalkingBackend, earliest_arrival_query,
    generate_queries, latest_departure_query, profile_query, remove_dominated,
};
pub use crate::store::{HubLabelStore, TimetableStore};
pub use crate::time::{Duration, Time};
