//! Shared gzip-decompression entry point feeding every per-file reader in
//! this module: one streaming front door for the archive format so each
//! reader only has to deal with plain CSV records.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::LoadError;

fn open(path: &Path) -> Result<MultiGzDecoder<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(MultiGzDecoder::new(BufReader::new(file)))
}

/// Opens a gzip-compressed, comma-separated file with a single header row.
pub(crate) fn csv_gz(path: &Path) -> Result<csv::Reader<MultiGzDecoder<BufReader<File>>>, LoadError> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(open(path)?))
}

/// Opens a gzip-compressed, space-separated file with no header row (the
/// `.gr` hub-label format).
pub(crate) fn gr_gz(path: &Path) -> Result<csv::Reader<MultiGzDecoder<BufReader<File>>>, LoadError> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .from_reader(open(path)?))
}

/// Parses field `idx` of `record` as a `usize`/`u32`, wrapping failures in a
/// `LoadError::MalformedRow` tagged with `file` and the field name.
pub(crate) fn field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    file: &'static str,
    name: &'static str,
) -> Result<T, LoadError> {
    let raw = record.get(idx).ok_or_else(|| LoadError::MalformedRow {
        file,
        reason: format!("missing column {name} (index {idx}) in row {record:?}"),
    })?;
    raw.trim().parse::<T>().map_err(|_| LoadError::MalformedRow {
        file,
        reason: format!("column {name} is not a valid number: {raw:?}"),
    })
}

pub(crate) fn dataset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}
