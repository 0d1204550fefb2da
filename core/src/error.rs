//! Error kinds for the timetable/hub stores and the round engine.
//!
//! Load-time failures (`LoadError`) are fatal: the caller aborts with a
//! non-zero exit code. Query-time failures (`QueryError`) are caught by the
//! CLI driver and turned into an empty/∞ result row instead of aborting the
//! whole batch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed row in {file}: {reason}")]
    MalformedRow { file: &'static str, reason: String },
    #[error("invalid data in {file}: {reason}")]
    InvalidData { file: &'static str, reason: String },
    #[error("csv error while reading {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown stop id {0}")]
    UnknownStop(usize),
    #[error("source and target stop are identical")]
    IdenticalEndpoints,
    #[error("departure time is out of range")]
    DepartureOutOfRange,
    #[error("stop {0} is isolated (serves no routes and has no transfers)")]
    IsolatedStop(usize),
}
