//! Earliest-arrival and profile (range) journey planning over a scheduled
//! transit timetable combined with an unrestricted walking graph.
//!
//! The round-based search (RAPTOR) propagates arrival labels across rounds
//! by scanning routes and then footpaths (`routing::engine`), with either
//! an explicit transfer list or a hub-labelling 2-hop walking oracle
//! (`store::hubs`) standing in for the footpath graph. `loading` turns the
//! gzip-compressed flat-file inputs into the immutable stores the engine
//! runs against; `routing::querygen` produces rank-stratified benchmark
//! query sets from the same hub labels.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;
pub mod time;

pub use error::{LoadError, QueryError};
pub use loading::{Dataset, load_dataset};
pub use model::{RouteId, StopId};
pub use routing::{
    Algorithm, GeneratedQuery, ProfileEntry, QueryInput, WalkingBackend, earliest_arrival_query,
    generate_queries, latest_departure_query, profile_query, remove_dominated,
};
pub use store::{HubLabelStore, TimetableStore};
pub use time::{Duration, Time};
