//! Parses `in_hubs.gr.gz` / `out_hubs.gr.gz`, the `HLR` walking backend —
//! space-separated, headerless, read in place of `transfers.csv.gz`.
//!
//! `in_hubs.gr`: `hub_node stop_id distance`. `out_hubs.gr`: `stop_id
//! hub_node distance`. `distance` is in the walking graph's native units
//! and is converted to a `Duration` via `time::distance_to_time`.

use hashbrown::HashMap;

use crate::error::LoadError;
use crate::model::{HubEntry, NodeId, StopId};
use crate::time::distance_to_time;

use super::csv_source::{field, gr_gz};

pub(crate) struct HubsTable {
    /// Indexed by `StopId`, sorted ascending by `time`.
    pub(crate) out_hubs: Vec<Vec<HubEntry>>,
    /// Indexed by `StopId`, sorted ascending by `time`.
    pub(crate) in_hubs: Vec<Vec<HubEntry>>,
    pub(crate) inverse_in_hubs: HashMap<NodeId, Vec<(crate::time::Duration, StopId)>>,
    pub(crate) inverse_out_hubs: HashMap<NodeId, Vec<(crate::time::Duration, StopId)>>,
    pub(crate) max_stop_id: StopId,
    pub(crate) max_node_id: usize,
}

pub(crate) fn load_hubs(in_hubs_path: &std::path::Path, out_hubs_path: &std::path::Path) -> Result<HubsTable, LoadError> {
    const IN_FILE: &str = "in_hubs.gr.gz";
    const OUT_FILE: &str = "out_hubs.gr.gz";

    let mut max_stop_id = 0usize;
    let mut max_node_id = 0usize;

    let mut in_rows: Vec<(StopId, HubEntry)> = Vec::new();
    let mut reader = gr_gz(in_hubs_path)?;
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv { file: IN_FILE, source })?;
        let hub_node: NodeId = field(&record, 0, IN_FILE, "hub_node")?;
        let stop_id: StopId = field(&record, 1, IN_FILE, "stop_id")?;
        let distance: u32 = field(&record, 2, IN_FILE, "distance")?;
        max_stop_id = max_stop_id.max(stop_id);
        max_node_id = max_node_id.max(hub_node);
        in_rows.push((
            stop_id,
            HubEntry {
                time: distance_to_time(distance),
                node: hub_node,
            },
        ));
    }

    let mut out_rows: Vec<(StopId, HubEntry)> = Vec::new();
    let mut reader = gr_gz(out_hubs_path)?;
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv { file: OUT_FILE, source })?;
        let stop_id: StopId = field(&record, 0, OUT_FILE, "stop_id")?;
        let hub_node: NodeId = field(&record, 1, OUT_FILE, "hub_node")?;
        let distance: u32 = field(&record, 2, OUT_FILE, "distance")?;
        max_stop_id = max_stop_id.max(stop_id);
        max_node_id = max_node_id.max(hub_node);
        out_rows.push((
            stop_id,
            HubEntry {
                time: distance_to_time(distance),
                node: hub_node,
            },
        ));
    }

    let len = if in_rows.is_empty() && out_rows.is_empty() {
        0
    } else {
        max_stop_id + 1
    };
    let mut in_hubs: Vec<Vec<HubEntry>> = vec![Vec::new(); len];
    let mut out_hubs: Vec<Vec<HubEntry>> = vec![Vec::new(); len];
    let mut inverse_in_hubs: HashMap<NodeId, Vec<(crate::time::Duration, StopId)>> = HashMap::new();
    let mut inverse_out_hubs: HashMap<NodeId, Vec<(crate::time::Duration, StopId)>> = HashMap::new();

    for (stop_id, entry) in in_rows {
        in_hubs[stop_id].push(entry);
        inverse_in_hubs.entry(entry.node).or_default().push((entry.time, stop_id));
    }
    for (stop_id, entry) in out_rows {
        out_hubs[stop_id].push(entry);
        inverse_out_hubs.entry(entry.node).or_default().push((entry.time, stop_id));
    }

    for hubs in &mut in_hubs {
        hubs.sort_unstable_by_key(|h| (h.time, h.node));
    }
    for hubs in &mut out_hubs {
        hubs.sort_unstable_by_key(|h| (h.time, h.node));
    }
    for entries in inverse_in_hubs.values_mut() {
        entries.sort_unstable_by_key(|&(time, stop)| (time, stop));
    }
    for entries in inverse_out_hubs.values_mut() {
        entries.sort_unstable_by_key(|&(time, stop)| (time, stop));
    }

    Ok(HubsTable {
        out_hubs,
        in_hubs,
        inverse_in_hubs,
        inverse_out_hubs,
        max_stop_id,
        max_node_id,
    })
}
