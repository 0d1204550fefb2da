//! Parses `stop_routes.csv.gz` (columns `stop_id,route_id`), the second
//! file read — it establishes which stops exist before the walking backend
//! and stop-times files are consulted.

use hashbrown::HashMap;

use super::csv_source::{csv_gz, field};
use crate::error::LoadError;
use crate::model::{RouteId, StopId};

const FILE: &str = "stop_routes.csv.gz";

pub(crate) struct StopRoutesTable {
    /// Indexed by `StopId`; a stop with an empty list is invalid (serves no
    /// routes, per `Stop::is_valid`).
    pub(crate) routes_by_stop: Vec<Vec<RouteId>>,
    pub(crate) max_stop_id: StopId,
}

pub(crate) fn load_stop_routes(path: &std::path::Path) -> Result<StopRoutesTable, LoadError> {
    let mut reader = csv_gz(path)?;
    let mut by_stop: HashMap<StopId, Vec<RouteId>> = HashMap::new();
    let mut max_stop_id = 0usize;
    let mut any = false;

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv { file: FILE, source })?;
        let stop_id: StopId = field(&record, 0, FILE, "stop_id")?;
        let route_id: RouteId = field(&record, 1, FILE, "route_id")?;

        any = true;
        max_stop_id = max_stop_id.max(stop_id);
        by_stop.entry(stop_id).or_default().push(route_id);
    }

    let mut routes_by_stop: Vec<Vec<RouteId>> = if any {
        vec![Vec::new(); max_stop_id + 1]
    } else {
        Vec::new()
    };
    for (stop_id, routes) in by_stop {
        routes_by_stop[stop_id] = routes;
    }

    Ok(StopRoutesTable {
        routes_by_stop,
        max_stop_id,
    })
}
