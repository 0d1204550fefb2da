//! The hub-labelling walking backend (HL-RAPTOR).
//!
//! Replaces an explicit footpath graph with a precomputed 2-hop cover: every
//! stop stores a small set of "hubs" such that any two stops' walking
//! distance reduces to a sorted merge over their label sets. The labelling
//! itself is computed offline, by a separate preprocessing step; this store
//! only consumes and queries it.

use hashbrown::HashMap;

use crate::model::{HubEntry, NodeId, StopId};
use crate::time::{Duration, Time};

#[derive(Debug, Clone, Default)]
pub struct HubLabelStore {
    /// Per-stop out-hub list, sorted ascending by walking time.
    pub(crate) out_hubs: Vec<Vec<HubEntry>>,
    /// Per-stop in-hub list, sorted ascending by walking time.
    pub(crate) in_hubs: Vec<Vec<HubEntry>>,
    /// For each hub node, the stops that carry it as an in-hub, with their
    /// walking time, sorted ascending by time.
    pub(crate) inverse_in_hubs: HashMap<NodeId, Vec<(Duration, StopId)>>,
    /// For each hub node, the stops that carry it as an out-hub, with their
    /// walking time, sorted ascending by time.
    pub(crate) inverse_out_hubs: HashMap<NodeId, Vec<(Duration, StopId)>>,
}

impl HubLabelStore {
    #[must_use]
    pub fn out_hubs(&self, stop: StopId) -> &[HubEntry] {
        self.out_hubs.get(stop).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn in_hubs(&self, stop: StopId) -> &[HubEntry] {
        self.in_hubs.get(stop).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn inverse_in_hubs(&self, hub: NodeId) -> &[(Duration, StopId)] {
        self.inverse_in_hubs.get(&hub).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn inverse_out_hubs(&self, hub: NodeId) -> &[(Duration, StopId)] {
        self.inverse_out_hubs.get(&hub).map_or(&[], Vec::as_slice)
    }

    /// Distance-only walking time between two stops, combining
    /// `out_hubs(u)` and `in_hubs(v)` in `O(|out_hubs(u)| + |in_hubs(v)|)`
    /// by hashing the smaller label into a lookup table and scanning the
    /// other. Both lists are kept sorted by walking time for the relaxer's
    /// early-exit scans (see `routing::footpath`); matching on hub id here
    /// therefore goes through a hash lookup rather than a merge-join, since
    /// a time-ordered list is not also node-ordered.
    #[must_use]
    pub fn walking_time(&self, u: StopId, v: StopId) -> Option<Duration> {
        let out = self.out_hubs(u);
        let inn = self.in_hubs(v);
        if out.is_empty() || inn.is_empty() {
            return None;
        }
        let (small, large) = if out.len() <= inn.len() { (out, inn) } else { (inn, out) };
        let lookup: HashMap<NodeId, Duration> = small.iter().map(|e| (e.node, e.time)).collect();

        let mut best: Option<Duration> = None;
        for entry in large {
            if let Some(&other) = lookup.get(&entry.node) {
                let total = Duration::from_secs((other.as_secs() + entry.time.as_secs()) as u32);
                best = Some(best.map_or(total, |b| b.min(total)));
            }
        }
        best
    }

    /// Single-source walking distances from `source`, sorted ascending by
    /// distance. Propagates `out_hubs(source)` into a working map keyed by
    /// hub node, then for every stop `t` combines with `in_hubs(t)` to
    /// produce `(distance, stop)`. Used only by the query generator.
    #[must_use]
    pub fn single_source_distances(&self, source: StopId, num_stops: usize) -> Vec<(Duration, StopId)> {
        let mut hub_dist: HashMap<NodeId, Duration> = HashMap::new();
        for entry in self.out_hubs(source) {
            hub_dist
                .entry(entry.node)
                .and_modify(|d| *d = (*d).min(entry.time))
                .or_insert(entry.time);
        }

        let mut result = Vec::new();
        for t in 0..num_stops {
            let mut best: Option<Duration> = None;
            for entry in self.in_hubs(t) {
                if let Some(&d) = hub_dist.get(&entry.node) {
                    let total = Duration::from_secs((d.as_secs() + entry.time.as_secs()) as u32);
                    best = Some(best.map_or(total, |b| b.min(total)));
                }
            }
            if let Some(d) = best {
                result.push((d, t));
            }
        }
        result.sort_unstable_by_key(|&(d, s)| (d, s));
        result
    }

    /// Convenience: `walking_time` as a `Time` offset from `departure`,
    /// saturating to `Time::INFINITY` when unreachable.
    #[must_use]
    pub fn walking_arrival(&self, u: StopId, v: StopId, departure: Time) -> Time {
        match self.walking_time(u, v) {
            Some(d) => departure.saturating_add(d),
            None => Time::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(
        out: Vec<Vec<HubEntry>>,
        inn: Vec<Vec<HubEntry>>,
    ) -> HubLabelStore {
        HubLabelStore {
            out_hubs: out,
            in_hubs: inn,
            inverse_in_hubs: HashMap::new(),
            inverse_out_hubs: HashMap::new(),
        }
    }

    #[test]
    fn walking_time_finds_common_hub() {
        let store = store_with(
            vec![vec![HubEntry { time: Duration::from_secs(5), node: 10 }]],
            vec![vec![HubEntry { time: Duration::from_secs(7), node: 10 }]],
        );
        assert_eq!(store.walking_time(0, 0), Some(Duration::from_secs(12)));
    }

    #[test]
    fn walking_time_is_none_without_common_hub() {
        let store = store_with(
            vec![vec![HubEntry { time: Duration::from_secs(5), node: 10 }]],
            vec![vec![HubEntry { time: Duration::from_secs(7), node: 11 }]],
        );
        assert_eq!(store.walking_time(0, 0), None);
    }

    #[test]
    fn single_source_distances_sorted_ascending() {
        let store = store_with(
            vec![vec![HubEntry { time: Duration::from_secs(1), node: 1 }]],
            vec![
                vec![HubEntry { time: Duration::from_secs(10), node: 1 }],
                vec![HubEntry { time: Duration::from_secs(2), node: 1 }],
            ],
        );
        let dists = store.single_source_distances(0, 2);
        assert_eq!(dists, vec![(Duration::from_secs(3), 1), (Duration::from_secs(11), 0)]);
    }
}
