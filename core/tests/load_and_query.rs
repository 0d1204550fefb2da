//! Full load-then-query integration tests: builds tiny gzip-compressed
//! fixture datasets on disk, loads them through the public `load_dataset`
//! entry point, and exercises the query API end to end.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;

use raptor_core::{
    Algorithm, QueryInput, Time, WalkingBackend, earliest_arrival_query, latest_departure_query,
    load_dataset, profile_query, remove_dominated,
};

fn write_gz(path: &std::path::Path, contents: &str) {
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// A dataset directory under the system temp dir, removed on drop.
struct TempDataset {
    dir: PathBuf,
}

impl TempDataset {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "raptor_engine_test_{name}_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        TempDataset { dir }
    }
}

impl Drop for TempDataset {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// One route, stops `0 -> 1 -> 2`, two trips a thousand seconds apart. A
/// single footpath from stop 2 to stop 3 (an otherwise routeless stop).
fn build_r_dataset() -> TempDataset {
    let ds = TempDataset::new("r");
    write_gz(&ds.dir.join("trips.csv.gz"), "route_id,trip_id\n0,100\n0,101\n");
    write_gz(
        &ds.dir.join("stop_routes.csv.gz"),
        "stop_id,route_id\n0,0\n1,0\n2,0\n",
    );
    write_gz(
        &ds.dir.join("transfers.csv.gz"),
        "from_stop_id,to_stop_id,min_transfer_time\n2,3,50\n",
    );
    write_gz(
        &ds.dir.join("stop_times.csv.gz"),
        "trip_id,arrival_time,departure_time,stop_id\n\
         100,0,0,0\n100,100,100,1\n100,200,200,2\n\
         101,1000,1000,0\n101,1100,1100,1\n101,1200,1200,2\n",
    );
    ds
}

/// Same topology as `build_r_dataset`, but with hub labels that
/// reproduce exactly the one `2 -> 3` footpath (so R and HLR must agree).
fn build_hlr_dataset() -> TempDataset {
    let ds = TempDataset::new("hlr");
    write_gz(&ds.dir.join("trips.csv.gz"), "route_id,trip_id\n0,100\n0,101\n");
    write_gz(
        &ds.dir.join("stop_routes.csv.gz"),
        "stop_id,route_id\n0,0\n1,0\n2,0\n",
    );
    write_gz(
        &ds.dir.join("stop_times.csv.gz"),
        "trip_id,arrival_time,departure_time,stop_id\n\
         100,0,0,0\n100,100,100,1\n100,200,200,2\n\
         101,1000,1000,0\n101,1100,1100,1\n101,1200,1200,2\n",
    );
    // distance_to_time(d) = round(9d / 100); d = 556 rounds to 50, matching
    // the 50-second footpath used by `build_r_dataset`.
    write_gz(&ds.dir.join("out_hubs.gr.gz"), "2 90 556\n");
    write_gz(&ds.dir.join("in_hubs.gr.gz"), "90 3 0\n");
    ds
}

/// Same route as `build_hlr_dataset`, plus a direct `0 -> 3` hub path slower
/// than the transit + footpath route, so a profile query has both a transit
/// leg and a pure-walking baseline to compare.
fn build_hlr_walkable_dataset() -> TempDataset {
    let ds = TempDataset::new("hlr_walkable");
    write_gz(&ds.dir.join("trips.csv.gz"), "route_id,trip_id\n0,100\n0,101\n");
    write_gz(
        &ds.dir.join("stop_routes.csv.gz"),
        "stop_id,route_id\n0,0\n1,0\n2,0\n",
    );
    write_gz(
        &ds.dir.join("stop_times.csv.gz"),
        "trip_id,arrival_time,departure_time,stop_id\n\
         100,0,0,0\n100,100,100,1\n100,200,200,2\n\
         101,1000,1000,0\n101,1100,1100,1\n101,1200,1200,2\n",
    );
    write_gz(
        &ds.dir.join("out_hubs.gr.gz"),
        "0 90 5000\n2 90 556\n",
    );
    write_gz(&ds.dir.join("in_hubs.gr.gz"), "90 3 0\n");
    ds
}

/// One route, stops `0 -> 1 -> 2`, a single trip that dwells 50s at stop 1
/// (arrives 100, departs 150). A footpath leaves from stop 1 itself, so a
/// walking leg to stop 3 must start from the trip's *arrival* at stop 1, not
/// its later departure.
fn build_dwell_dataset() -> TempDataset {
    let ds = TempDataset::new("dwell");
    write_gz(&ds.dir.join("trips.csv.gz"), "route_id,trip_id\n0,100\n");
    write_gz(
        &ds.dir.join("stop_routes.csv.gz"),
        "stop_id,route_id\n0,0\n1,0\n2,0\n",
    );
    write_gz(
        &ds.dir.join("transfers.csv.gz"),
        "from_stop_id,to_stop_id,min_transfer_time\n1,3,10\n",
    );
    write_gz(
        &ds.dir.join("stop_times.csv.gz"),
        "trip_id,arrival_time,departure_time,stop_id\n\
         100,0,0,0\n100,100,150,1\n100,250,250,2\n",
    );
    ds
}

#[test]
fn footpath_from_a_dwelling_stop_starts_at_arrival_not_departure() {
    let ds = build_dwell_dataset();
    let dataset = load_dataset(&ds.dir, Algorithm::R).unwrap();

    let labels = earliest_arrival_query(
        &dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 0,
            target: 3,
            departure: Time::from_secs(0),
        },
    )
    .unwrap();

    // Arrive at stop 1 at 100 (not 150, the departure after the 50s dwell),
    // then walk 10s to stop 3: 110, not 160.
    assert_eq!(*labels.last().unwrap(), Time::from_secs(110));
}

#[test]
fn forward_r_finds_the_direct_trip() {
    let ds = build_r_dataset();
    let dataset = load_dataset(&ds.dir, Algorithm::R).unwrap();

    let labels = earliest_arrival_query(
        &dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 0,
            target: 2,
            departure: Time::from_secs(0),
        },
    )
    .unwrap();

    // Round 0 is the pure-R seed (+inf, no walking upper bound); round 1
    // reaches stop 2 at 200 via the first trip.
    assert_eq!(*labels.last().unwrap(), Time::from_secs(200));
    // The per-round label sequence must be non-increasing (never regresses).
    for window in labels.windows(2) {
        assert!(window[1] <= window[0]);
    }
}

#[test]
fn forward_r_reaches_a_routeless_stop_via_transfer() {
    let ds = build_r_dataset();
    let dataset = load_dataset(&ds.dir, Algorithm::R).unwrap();

    let labels = earliest_arrival_query(
        &dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 0,
            target: 3,
            departure: Time::from_secs(0),
        },
    )
    .unwrap();

    // Arrive at stop 2 at 200, then walk 50s to stop 3.
    assert_eq!(*labels.last().unwrap(), Time::from_secs(250));
}

#[test]
fn backward_then_forward_does_not_arrive_later() {
    let ds = build_r_dataset();
    let dataset = load_dataset(&ds.dir, Algorithm::R).unwrap();

    let arrival = Time::from_secs(250);
    let backward_labels =
        latest_departure_query(&dataset.timetable, WalkingBackend::R, 0, 3, arrival).unwrap();
    let latest_departure = backward_labels
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .max()
        .unwrap();

    let forward_labels = earliest_arrival_query(
        &dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 0,
            target: 3,
            departure: latest_departure,
        },
    )
    .unwrap();

    assert!(*forward_labels.last().unwrap() <= arrival);
}

#[test]
fn identical_endpoints_are_rejected() {
    let ds = build_r_dataset();
    let dataset = load_dataset(&ds.dir, Algorithm::R).unwrap();

    let err = earliest_arrival_query(
        &dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 1,
            target: 1,
            departure: Time::from_secs(0),
        },
    )
    .unwrap_err();

    assert_eq!(err, raptor_core::QueryError::IdenticalEndpoints);
}

#[test]
fn unreachable_target_reports_infinity_not_an_error() {
    let ds = TempDataset::new("two_islands");
    write_gz(
        &ds.dir.join("trips.csv.gz"),
        "route_id,trip_id\n0,100\n1,200\n",
    );
    write_gz(
        &ds.dir.join("stop_routes.csv.gz"),
        "stop_id,route_id\n0,0\n1,0\n2,1\n3,1\n",
    );
    write_gz(
        &ds.dir.join("transfers.csv.gz"),
        "from_stop_id,to_stop_id,min_transfer_time\n",
    );
    write_gz(
        &ds.dir.join("stop_times.csv.gz"),
        "trip_id,arrival_time,departure_time,stop_id\n\
         100,0,0,0\n100,100,100,1\n\
         200,0,0,2\n200,100,100,3\n",
    );
    let dataset = load_dataset(&ds.dir, Algorithm::R).unwrap();

    let labels = earliest_arrival_query(
        &dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 0,
            target: 2,
            departure: Time::from_secs(0),
        },
    )
    .unwrap();

    assert!(!labels.last().unwrap().is_finite());
}

#[test]
fn hlr_agrees_with_r_when_the_hub_closure_matches_the_transfer_graph() {
    let r_ds = build_r_dataset();
    let r_dataset = load_dataset(&r_ds.dir, Algorithm::R).unwrap();
    let r_labels = earliest_arrival_query(
        &r_dataset.timetable,
        WalkingBackend::R,
        QueryInput {
            source: 0,
            target: 3,
            departure: Time::from_secs(0),
        },
    )
    .unwrap();

    let hlr_ds = build_hlr_dataset();
    let hlr_dataset = load_dataset(&hlr_ds.dir, Algorithm::Hlr).unwrap();
    let hubs = hlr_dataset.hubs.as_ref().unwrap();
    let hlr_labels = earliest_arrival_query(
        &hlr_dataset.timetable,
        WalkingBackend::Hlr(hubs),
        QueryInput {
            source: 0,
            target: 3,
            departure: Time::from_secs(0),
        },
    )
    .unwrap();

    assert_eq!(*r_labels.last().unwrap(), *hlr_labels.last().unwrap());
}

#[test]
fn profile_query_includes_the_pure_walking_baseline_and_dominates_by_travel_time() {
    let ds = build_hlr_walkable_dataset();
    let dataset = load_dataset(&ds.dir, Algorithm::Hlr).unwrap();
    let hubs = dataset.hubs.as_ref().unwrap();
    let walking_time = hubs.walking_time(0, 3).unwrap();

    let entries = profile_query(&dataset.timetable, WalkingBackend::Hlr(hubs), 0, 3).unwrap();
    assert!(!entries.is_empty());

    // The baseline entry (always present, always first) is exactly as good
    // as walking alone.
    let baseline = entries[0];
    assert_eq!(baseline.departure, Time::from_secs(0));
    assert_eq!(baseline.arrival, Time::from_secs(0) + walking_time);

    // Everything else in the Pareto front beats pure walking, or it
    // wouldn't have survived the dominance filter.
    for entry in &entries[1..] {
        assert!(entry.arrival - entry.departure < walking_time);
    }

    // The transit + footpath route (depart 0, arrive 250) must have
    // survived: it is strictly faster than the 450s direct walk.
    assert!(
        entries
            .iter()
            .any(|e| e.departure == Time::from_secs(0) && e.arrival == Time::from_secs(250))
    );
}

#[test]
fn remove_dominated_is_idempotent() {
    let times = [
        Time::from_secs(500),
        Time::from_secs(500),
        Time::from_secs(300),
        Time::INFINITY,
        Time::from_secs(100),
    ];
    let once = remove_dominated(&times);
    let twice = remove_dominated(&once);
    assert_eq!(once, twice);
}
