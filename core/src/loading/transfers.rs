//! Parses `transfers.csv.gz` (columns `from_stop_id,to_stop_id,
//! min_transfer_time`), the `R` walking backend. Read third, right after
//! `stop_routes.csv.gz` and before `stop_times.csv.gz`.

use crate::error::LoadError;
use crate::model::{StopId, Transfer};
use crate::time::Duration;

use super::csv_source::{csv_gz, field};

const FILE: &str = "transfers.csv.gz";

pub(crate) struct TransfersTable {
    /// Indexed by `StopId`, sorted ascending by `(duration, target_stop)` —
    /// the ordering the relaxer's early-exit scan depends on.
    pub(crate) by_stop: Vec<Vec<Transfer>>,
    pub(crate) max_stop_id: StopId,
}

pub(crate) fn load_transfers(path: &std::path::Path) -> Result<TransfersTable, LoadError> {
    let mut reader = csv_gz(path)?;
    let mut rows: Vec<(StopId, Transfer)> = Vec::new();
    let mut max_stop_id = 0usize;

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv { file: FILE, source })?;
        let from_stop: StopId = field(&record, 0, FILE, "from_stop_id")?;
        let to_stop: StopId = field(&record, 1, FILE, "to_stop_id")?;
        let duration: u32 = field(&record, 2, FILE, "min_transfer_time")?;

        max_stop_id = max_stop_id.max(from_stop).max(to_stop);
        rows.push((
            from_stop,
            Transfer {
                target_stop: to_stop,
                duration: Duration::from_secs(duration),
            },
        ));
    }

    let mut by_stop: Vec<Vec<Transfer>> = if rows.is_empty() {
        Vec::new()
    } else {
        vec![Vec::new(); max_stop_id + 1]
    };
    for (from_stop, transfer) in rows {
        by_stop[from_stop].push(transfer);
    }
    for transfers in &mut by_stop {
        transfers.sort_unstable_by_key(|t| (t.duration, t.target_stop));
    }

    Ok(TransfersTable {
        by_stop,
        max_stop_id,
    })
}
