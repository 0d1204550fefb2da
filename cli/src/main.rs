//! Batch query driver: `raptor-engine <dataset> <R|HLR> <n|p|g>`.
//!
//! Loads a dataset for the chosen walking backend, then either runs every
//! row of `queries.csv` as a plain earliest-arrival query (`n`) or a profile
//! query (`p`) and writes the two result CSVs next to the dataset, or (`g`)
//! samples a fresh rank-stratified `queries.csv` from the hub labels.
//! Independent queries share nothing but the read-only dataset, so a query
//! batch runs in parallel with `rayon`.

mod writers;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use rayon::prelude::*;

use raptor_core::{
    Algorithm, Dataset, QueryInput, Time, WalkingBackend, earliest_arrival_query, generate_queries,
    load_dataset, profile_query,
};

use writers::{QueryResult, read_queries, write_arrival_times, write_query_set, write_running_time};

/// Per-rank-bucket query quota for the `g` (generate) mode.
const QUERIES_PER_RANK: usize = 100;

/// Earliest-arrival / profile query engine over a scheduled timetable plus
/// an unrestricted walking graph.
#[derive(Parser, Debug)]
#[command(name = "raptor-engine")]
struct Cli {
    /// Directory holding the dataset's flat CSV inputs and `queries.csv`.
    dataset: PathBuf,
    /// Walking backend: `R` (explicit transfers) or `HLR` (hub labels).
    algorithm: String,
    /// Query type: `n` (normal earliest-arrival), `p` (profile), or `g`
    /// (generate a fresh `queries.csv`).
    query_type: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // `--help`/`--version` aren't argument errors; clap's own exit
            // codes for those (0) are kept. Everything else (a malformed or
            // missing positional) exits 1 like every other failure here,
            // not clap's default of 2.
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryMode {
    Normal,
    Profile,
    /// Generate a rank-stratified `queries.csv` instead of running queries;
    /// requires the `HLR` backend, since the generator samples distances
    /// from the hub-label store.
    Generate,
}

fn parse_query_mode(s: &str) -> Result<QueryMode, String> {
    match s {
        "n" => Ok(QueryMode::Normal),
        "p" => Ok(QueryMode::Profile),
        "g" => Ok(QueryMode::Generate),
        other => Err(format!("unknown query type {other:?}, expected 'n', 'p', or 'g'")),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let algorithm = Algorithm::parse(&cli.algorithm)
        .ok_or_else(|| format!("unknown algorithm {:?}, expected 'R' or 'HLR'", cli.algorithm))?;
    let mode = parse_query_mode(&cli.query_type)?;

    info!("loading dataset from {}", cli.dataset.display());
    let dataset = Arc::new(load_dataset(&cli.dataset, algorithm)?);
    info!(
        "loaded {} stops, {} routes",
        dataset.timetable.num_stops(),
        dataset.timetable.num_routes()
    );

    if mode == QueryMode::Generate {
        return generate(&cli.dataset, &dataset);
    }

    let queries_path = cli.dataset.join("queries.csv");
    let queries = read_queries(&queries_path)?;
    info!("{} queries loaded from {}", queries.len(), queries_path.display());

    let results: Vec<QueryResult> = queries
        .par_iter()
        .map(|row| {
            let backend = backend_of(&dataset);
            let start = Instant::now();
            let labels = run_one(&dataset, backend, mode, row.source, row.target, row.time);
            if let Err(ref err) = labels {
                warn!("query (source={}, target={}) failed: {err}", row.source, row.target);
            }
            QueryResult {
                running_time: start.elapsed(),
                labels,
            }
        })
        .collect();

    let algo_tag = algorithm_tag(algorithm);
    let dataset_name = dataset_name(&cli.dataset);
    let running_time_path = cli.dataset.join(format!("{dataset_name}_{algo_tag}_running_time.csv"));
    let arrival_times_path = cli.dataset.join(format!("{dataset_name}_{algo_tag}_arrival_times.csv"));

    write_running_time(&running_time_path, &results)?;
    write_arrival_times(&arrival_times_path, &results)?;
    info!("wrote {} and {}", running_time_path.display(), arrival_times_path.display());

    Ok(())
}

/// Samples a rank-stratified benchmark query set from the dataset's hub
/// labels and writes it to `queries.csv` next to the dataset.
fn generate(dataset_dir: &Path, dataset: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
    let hubs = dataset
        .hubs
        .as_ref()
        .ok_or("query generation requires the HLR backend (no hub labels loaded)")?;

    let mut rng = rand::thread_rng();
    let queries = generate_queries(&dataset.timetable, hubs, QUERIES_PER_RANK, &mut rng);
    info!("generated {} queries", queries.len());

    let queries_path = dataset_dir.join("queries.csv");
    write_query_set(&queries_path, &queries)?;
    info!("wrote {}", queries_path.display());
    Ok(())
}

fn backend_of(dataset: &Dataset) -> WalkingBackend<'_> {
    match &dataset.hubs {
        Some(hubs) => WalkingBackend::Hlr(hubs),
        None => WalkingBackend::R,
    }
}

/// Runs one query row. `n` reports the per-round arrival label sequence at
/// `target`; `p` flattens the profile's (departure, arrival) pairs into an
/// alternating `dep,arr,dep,arr,...` sequence so both modes share one
/// result-row shape in the output CSV.
fn run_one(
    dataset: &Dataset,
    backend: WalkingBackend<'_>,
    mode: QueryMode,
    source: raptor_core::StopId,
    target: raptor_core::StopId,
    departure: Time,
) -> Result<Vec<Time>, raptor_core::QueryError> {
    match mode {
        QueryMode::Normal => earliest_arrival_query(
            &dataset.timetable,
            backend,
            QueryInput { source, target, departure },
        ),
        QueryMode::Profile => {
            let entries = profile_query(&dataset.timetable, backend, source, target)?;
            Ok(entries.into_iter().flat_map(|e| [e.departure, e.arrival]).collect())
        }
        QueryMode::Generate => unreachable!("generate mode returns before the batch loop"),
    }
}

fn algorithm_tag(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::R => "R",
        Algorithm::Hlr => "HLR",
    }
}

fn dataset_name(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}
