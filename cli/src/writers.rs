//! The CSV readers/writers around the engine — deliberately thin,
//! formatting only, preferring small `csv::Writer`/`csv::Reader` wrappers
//! over hand-rolled string building.

use std::path::Path;
use std::time::Duration as StdDuration;

use raptor_core::{QueryError, StopId, Time};

/// One row of `queries.csv` (`rank,source,target,time`).
#[derive(Debug, Clone, Copy)]
pub struct QueryRow {
    pub rank: u32,
    pub source: StopId,
    pub target: StopId,
    pub time: Time,
}

pub fn read_queries(path: &Path) -> csv::Result<Vec<QueryRow>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let rank: u32 = record[0].trim().parse().unwrap_or(0);
        let source: StopId = record[1].trim().parse().unwrap_or(0);
        let target: StopId = record[2].trim().parse().unwrap_or(0);
        let time: u32 = record[3].trim().parse().unwrap_or(0);
        rows.push(QueryRow {
            rank,
            source,
            target,
            time: Time::from_secs(time),
        });
    }
    Ok(rows)
}

/// One executed query's result: either the running time and per-round
/// label sequence, or a query-time failure, which is rendered as an empty
/// result row rather than aborting the batch.
pub struct QueryResult {
    pub running_time: StdDuration,
    pub labels: Result<Vec<Time>, QueryError>,
}

pub fn write_running_time(path: &Path, results: &[QueryResult]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    writer.write_record(["running_time"])?;
    for result in results {
        writer.write_record([result.running_time.as_secs_f64().to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_arrival_times(path: &Path, results: &[QueryResult]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    writer.write_record(["arrival_times"])?;
    for result in results {
        let joined = match &result.labels {
            Ok(labels) => labels.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            Err(_) => String::new(),
        };
        writer.write_record([joined])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the query generator's `queries.csv`.
pub fn write_query_set(path: &Path, queries: &[raptor_core::GeneratedQuery]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    writer.write_record(["rank", "source", "target", "time"])?;
    for q in queries {
        writer.write_record([
            q.rank.to_string(),
            q.source.to_string(),
            q.target.to_string(),
            q.departure.as_secs().unwrap_or(0).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
