use crate::time::Time;

pub type RouteId = usize;

/// A scheduled route: a fixed sequence of stops served by zero or more
/// trips sharing that stop pattern.
///
/// `stops_start`/`num_stops` index into the timetable's flat `route_stops`
/// array; `trips_start`/`num_trips` index into the flat `stop_times` table,
/// whose row-major layout is `trips_start + trip_idx * num_stops +
/// stop_idx`. Keeping every trip's row contiguous is what lets the hot scan
/// loop walk a single slice instead of chasing pointers.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub id: RouteId,
    pub stops_start: usize,
    pub num_stops: usize,
    pub trips_start: usize,
    pub num_trips: usize,
}

/// Scheduled arrival/departure at one stop of one trip. `arrival <=
/// departure` always holds (dwell time is non-negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub arrival: Time,
    pub departure: Time,
}
