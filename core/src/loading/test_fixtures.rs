//! A small, hand-built in-memory timetable used by unit tests across the
//! crate — no fixture files on disk, just synthetic test data built
//! directly in Rust.

use hashbrown::HashMap;

use crate::loading::Dataset;
use crate::model::{Route, Stop, StopTime};
use crate::store::TimetableStore;
use crate::time::Time;

/// Two routes sharing stop 1: route 0 runs `0 -> 1 -> 2` with two trips one
/// thousand seconds apart; route 1 runs `1 -> 3` with a single trip. No
/// transfers, no hub labels.
pub(crate) fn two_route_fixture() -> Dataset {
    let routes = vec![
        Route {
            id: 0,
            stops_start: 0,
            num_stops: 3,
            trips_start: 0,
            num_trips: 2,
        },
        Route {
            id: 1,
            stops_start: 3,
            num_stops: 2,
            trips_start: 6,
            num_trips: 1,
        },
    ];
    let route_stops = vec![0, 1, 2, 1, 3];

    let stop_times = vec![
        // route 0, trip 0
        StopTime { arrival: Time::from_secs(0), departure: Time::from_secs(0) },
        StopTime { arrival: Time::from_secs(100), departure: Time::from_secs(100) },
        StopTime { arrival: Time::from_secs(200), departure: Time::from_secs(200) },
        // route 0, trip 1
        StopTime { arrival: Time::from_secs(1000), departure: Time::from_secs(1000) },
        StopTime { arrival: Time::from_secs(1100), departure: Time::from_secs(1100) },
        StopTime { arrival: Time::from_secs(1200), departure: Time::from_secs(1200) },
        // route 1, trip 0
        StopTime { arrival: Time::from_secs(50), departure: Time::from_secs(50) },
        StopTime { arrival: Time::from_secs(150), departure: Time::from_secs(150) },
    ];

    let mut stops: Vec<Stop> = (0..4).map(Stop::invalid).collect();
    stops[0].routes_start = 0;
    stops[0].routes_len = 1;
    stops[1].routes_start = 1;
    stops[1].routes_len = 2;
    stops[2].routes_start = 3;
    stops[2].routes_len = 1;
    stops[3].routes_start = 4;
    stops[3].routes_len = 1;
    let stop_routes = vec![0, 0, 1, 0, 1];

    let mut stop_positions = HashMap::new();
    stop_positions.insert((0, 0), vec![0]);
    stop_positions.insert((0, 1), vec![1]);
    stop_positions.insert((0, 2), vec![2]);
    stop_positions.insert((1, 1), vec![0]);
    stop_positions.insert((1, 3), vec![1]);

    let timetable = TimetableStore {
        routes,
        route_stops,
        stop_times,
        stops,
        stop_routes,
        transfers: Vec::new(),
        stop_positions,
        trip_positions: Vec::new(),
        max_stop_id: 3,
        max_node_id: 0,
    };

    Dataset { timetable, hubs: None }
}
