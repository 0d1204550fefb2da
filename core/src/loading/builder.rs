//! Orchestrates the per-file readers in the required order — trips, then
//! stop-routes, then the chosen walking backend, then stop-times last — and
//! assembles the flat `TimetableStore` (plus a `HubLabelStore` for the
//! `HLR` backend).

use log::info;

use super::csv_source::dataset_path;
use super::hubs::{HubsTable, load_hubs};
use super::stop_routes::load_stop_routes;
use super::stop_times::load_stop_times;
use super::transfers::load_transfers;
use super::trips::load_trips;
use crate::error::LoadError;
use crate::model::{Route, RouteId, Stop, Transfer};
use crate::routing::Algorithm;
use crate::store::{HubLabelStore, TimetableStore};

/// Everything a query needs: the timetable store, plus a hub-label store
/// when the dataset was loaded for the `HLR` backend.
pub struct Dataset {
    pub timetable: TimetableStore,
    pub hubs: Option<HubLabelStore>,
}

/// Loads `<dir>/trips.csv.gz`, `<dir>/stop_routes.csv.gz`, the walking
/// backend named by `algorithm` (`transfers.csv.gz` for `R`, `in_hubs.gr.gz`
/// / `out_hubs.gr.gz` for `HLR`), and `<dir>/stop_times.csv.gz`, in that
/// order.
///
/// # Errors
///
/// Returns `Err` on a missing/malformed file or a violated load-time
/// invariant; both are fatal to the caller.
pub fn load_dataset(dir: &std::path::Path, algorithm: Algorithm) -> Result<Dataset, LoadError> {
    info!("loading trips from {}", dir.display());
    let trips = load_trips(&dataset_path(dir, "trips.csv.gz"))?;

    info!("loading stop_routes from {}", dir.display());
    let stop_routes = load_stop_routes(&dataset_path(dir, "stop_routes.csv.gz"))?;

    let (transfers, hubs) = match algorithm {
        Algorithm::R => {
            info!("loading transfers from {}", dir.display());
            (Some(load_transfers(&dataset_path(dir, "transfers.csv.gz"))?), None)
        }
        Algorithm::Hlr => {
            info!("loading hub labels from {}", dir.display());
            let hubs = load_hubs(
                &dataset_path(dir, "in_hubs.gr.gz"),
                &dataset_path(dir, "out_hubs.gr.gz"),
            )?;
            (None, Some(hubs))
        }
    };

    info!("loading stop_times from {}", dir.display());
    let stop_times = load_stop_times(&dataset_path(dir, "stop_times.csv.gz"), &trips)?;

    let max_stop_id = [
        stop_routes.max_stop_id,
        stop_times.max_stop_id,
        transfers.as_ref().map_or(0, |t| t.max_stop_id),
        hubs.as_ref().map_or(0, |h| h.max_stop_id),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);
    let max_node_id = hubs.as_ref().map_or(0, |h: &HubsTable| h.max_node_id);

    let routes: Vec<Route> = stop_times
        .route_meta
        .iter()
        .enumerate()
        .map(|(id, &(stops_start, num_stops, trips_start, num_trips))| Route {
            id,
            stops_start,
            num_stops,
            trips_start,
            num_trips,
        })
        .collect();

    let mut stops: Vec<Stop> = (0..=max_stop_id).map(Stop::invalid).collect();

    let mut routes_by_stop = stop_routes.routes_by_stop;
    routes_by_stop.resize(max_stop_id + 1, Vec::new());
    let mut stop_routes_flat: Vec<RouteId> = Vec::new();
    for (stop_id, routes_here) in routes_by_stop.into_iter().enumerate() {
        let start = stop_routes_flat.len();
        let len = routes_here.len();
        stop_routes_flat.extend(routes_here);
        stops[stop_id].routes_start = start;
        stops[stop_id].routes_len = len;
    }

    let mut transfers_flat: Vec<Transfer> = Vec::new();
    if let Some(table) = transfers {
        let mut by_stop = table.by_stop;
        by_stop.resize(max_stop_id + 1, Vec::new());
        for (stop_id, list) in by_stop.into_iter().enumerate() {
            let start = transfers_flat.len();
            let len = list.len();
            transfers_flat.extend(list);
            stops[stop_id].transfers_start = start;
            stops[stop_id].transfers_len = len;
        }
    }

    let timetable = TimetableStore {
        routes,
        route_stops: stop_times.route_stops,
        stop_times: stop_times.stop_times,
        stops,
        stop_routes: stop_routes_flat,
        transfers: transfers_flat,
        stop_positions: stop_times.stop_positions,
        trip_positions: trips.trip_positions,
        max_stop_id,
        max_node_id,
    };
    validate_fifo(&timetable)?;

    let hub_store = hubs.map(|table| build_hub_store(table, max_stop_id));

    Ok(Dataset {
        timetable,
        hubs: hub_store,
    })
}

fn build_hub_store(table: HubsTable, max_stop_id: usize) -> HubLabelStore {
    let mut out_hubs = table.out_hubs;
    out_hubs.resize(max_stop_id + 1, Vec::new());
    let mut in_hubs = table.in_hubs;
    in_hubs.resize(max_stop_id + 1, Vec::new());
    HubLabelStore {
        out_hubs,
        in_hubs,
        inverse_in_hubs: table.inverse_in_hubs,
        inverse_out_hubs: table.inverse_out_hubs,
    }
}

/// Checks the FIFO invariant: for every route and stop index, both
/// `arrival` and `departure` are non-decreasing across trip index, and
/// within a trip, both are non-decreasing across stop index (column
/// monotonicity — a trip cannot arrive at a later stop before an earlier
/// one). A violation indicates a preprocessing bug upstream and is fatal.
fn validate_fifo(timetable: &TimetableStore) -> Result<(), LoadError> {
    for route_idx in 0..timetable.num_routes() {
        let route = timetable.route(route_idx);
        if route.num_trips == 0 || route.num_stops == 0 {
            continue;
        }
        for trip_idx in 0..route.num_trips {
            let row = timetable.trip(route_idx, trip_idx);
            for window in row.windows(2) {
                if window[1].arrival < window[0].arrival || window[1].departure < window[0].departure {
                    return Err(LoadError::InvariantViolation(format!(
                        "route {route_idx} trip {trip_idx}: stop times are not non-decreasing along the trip"
                    )));
                }
            }
        }
        for stop_idx in 0..route.num_stops {
            let mut prev_departure = None;
            for trip_idx in 0..route.num_trips {
                let departure = timetable.trip(route_idx, trip_idx)[stop_idx].departure;
                if let Some(prev) = prev_departure {
                    if departure < prev {
                        return Err(LoadError::InvariantViolation(format!(
                            "route {route_idx} stop index {stop_idx}: departures are not FIFO across trips"
                        )));
                    }
                }
                prev_departure = Some(departure);
            }
        }
    }
    Ok(())
}
