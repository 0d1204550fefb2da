//! Parses `stop_times.csv.gz` (columns `trip_id,arrival_time,
//! departure_time,stop_id`), read last so that `stop_positions` can be
//! derived while streaming each route's first trip.

use hashbrown::HashMap;

use super::csv_source::{csv_gz, field};
use super::trips::TripsTable;
use crate::error::LoadError;
use crate::model::{RouteId, StopId, StopTime};
use crate::time::Time;

const FILE: &str = "stop_times.csv.gz";

pub(crate) struct StopTimesResult {
    /// Per-route `(stops_start, num_stops, trips_start, num_trips)`,
    /// indexed by `RouteId`.
    pub(crate) route_meta: Vec<(usize, usize, usize, usize)>,
    pub(crate) route_stops: Vec<StopId>,
    pub(crate) stop_times: Vec<StopTime>,
    pub(crate) stop_positions: HashMap<(RouteId, StopId), Vec<usize>>,
    pub(crate) max_stop_id: StopId,
}

pub(crate) fn load_stop_times(path: &std::path::Path, trips: &TripsTable) -> Result<StopTimesResult, LoadError> {
    let mut reader = csv_gz(path)?;

    // Per-route stop pattern, captured from each route's first trip.
    let mut patterns: Vec<Option<Vec<StopId>>> = vec![None; trips.routes.len()];
    // Per-route, per-trip-index rows (filled lazily as trips are seen).
    let mut trip_rows: Vec<Vec<Option<Vec<StopTime>>>> = trips
        .routes
        .iter()
        .map(|r| vec![None; r.trip_ids.len()])
        .collect();
    let mut max_stop_id = 0usize;

    let mut current_trip: Option<usize> = None;
    let mut buffer: Vec<(StopId, StopTime)> = Vec::new();

    let mut flush = |trip_id: usize, buffer: &mut Vec<(StopId, StopTime)>| -> Result<(), LoadError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let Some((route_id, trip_idx)) = trips.trip_positions.get(trip_id).copied().flatten() else {
            return Err(LoadError::InvalidData {
                file: FILE,
                reason: format!("trip_id {trip_id} not present in trips.csv.gz"),
            });
        };
        let stops: Vec<StopId> = buffer.iter().map(|(s, _)| *s).collect();
        let times: Vec<StopTime> = buffer.iter().map(|(_, t)| *t).collect();

        match &patterns[route_id] {
            None => patterns[route_id] = Some(stops),
            Some(pattern) if *pattern == stops => {}
            Some(_) => {
                return Err(LoadError::InvariantViolation(format!(
                    "route {route_id} trip {trip_id} has a stop pattern differing from its route's first trip"
                )));
            }
        }
        trip_rows[route_id][trip_idx] = Some(times);
        buffer.clear();
        Ok(())
    };

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv { file: FILE, source })?;
        let trip_id: usize = field(&record, 0, FILE, "trip_id")?;
        let arrival: u32 = field(&record, 1, FILE, "arrival_time")?;
        let departure: u32 = field(&record, 2, FILE, "departure_time")?;
        let stop_id: StopId = field(&record, 3, FILE, "stop_id")?;

        if arrival > departure {
            return Err(LoadError::InvalidData {
                file: FILE,
                reason: format!("stop {stop_id} on trip {trip_id}: arrival {arrival} > departure {departure}"),
            });
        }
        max_stop_id = max_stop_id.max(stop_id);

        if current_trip != Some(trip_id) {
            if let Some(prev) = current_trip {
                flush(prev, &mut buffer)?;
            }
            current_trip = Some(trip_id);
        }
        buffer.push((
            stop_id,
            StopTime {
                arrival: Time::from_secs(arrival),
                departure: Time::from_secs(departure),
            },
        ));
    }
    if let Some(prev) = current_trip {
        flush(prev, &mut buffer)?;
    }

    // Lay out routes in id order: `stops_start`/`trips_start` are running
    // offsets into the flat `route_stops`/`stop_times` arrays.
    let mut route_meta = Vec::with_capacity(trips.routes.len());
    let mut route_stops = Vec::new();
    let mut stop_times = Vec::new();
    let mut stop_positions: HashMap<(RouteId, StopId), Vec<usize>> = HashMap::new();

    for (route_id, route) in trips.routes.iter().enumerate() {
        let pattern = patterns[route_id].clone().unwrap_or_default();
        let num_stops = pattern.len();
        let num_trips = route.trip_ids.len();
        let stops_start = route_stops.len();
        let trips_start = stop_times.len();

        for (idx, &stop) in pattern.iter().enumerate() {
            stop_positions.entry((route_id, stop)).or_default().push(idx);
        }
        route_stops.extend(pattern);

        for trip_idx in 0..num_trips {
            match trip_rows[route_id][trip_idx].take() {
                Some(row) if row.len() == num_stops => stop_times.extend(row),
                Some(_) => {
                    return Err(LoadError::InvariantViolation(format!(
                        "route {route_id} trip index {trip_idx} row count does not match its stop pattern"
                    )));
                }
                None => {
                    return Err(LoadError::InvariantViolation(format!(
                        "route {route_id} trip index {trip_idx} has no stop_times rows"
                    )));
                }
            }
        }

        route_meta.push((stops_start, num_stops, trips_start, num_trips));
    }

    Ok(StopTimesResult {
        route_meta,
        route_stops,
        stop_times,
        stop_positions,
        max_stop_id,
    })
}
