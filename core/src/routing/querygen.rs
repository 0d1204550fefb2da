//! Dijkstra-rank-stratified random query generation.
//!
//! Sources are sampled with probability proportional to how many trips
//! serve their routes (busier stops make more representative query
//! sources); for each sampled source, `single_source_distances` gives a
//! distance-sorted reachability list, and a target is drawn from the index
//! window for each not-yet-filled rank bucket.

use log::warn;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::model::StopId;
use crate::store::{HubLabelStore, TimetableStore};
use crate::time::Time;

/// Smallest rank bucket the generator fills — ranks below this correspond
/// to trivially close targets not useful for benchmarking.
const MIN_RANK: u32 = 4;

/// How many consecutive sampling attempts may fail to add a single query
/// before the generator gives up on an under-filled dataset.
const MAX_CONSECUTIVE_FAILURES: u32 = 200;

/// One generated `(rank, source, target, time)` query row.
#[derive(Debug, Clone, Copy)]
pub struct GeneratedQuery {
    pub rank: u32,
    pub source: StopId,
    pub target: StopId,
    pub departure: Time,
}

/// Generates up to `quota` queries per Dijkstra-rank bucket by sampling
/// sources weighted by trips-per-route and targets from each rank's index
/// window in that source's distance ordering.
pub fn generate_queries(
    timetable: &TimetableStore,
    hubs: &HubLabelStore,
    quota_per_rank: usize,
    rng: &mut impl Rng,
) -> Vec<GeneratedQuery> {
    let weights: Vec<u64> = (0..timetable.num_stops())
        .map(|s| stop_weight(timetable, s))
        .collect();
    let Ok(sampler) = WeightedIndex::new(&weights) else {
        warn!("query generator: no stop carries positive weight, nothing to sample");
        return Vec::new();
    };

    let max_bucket_rank = (usize::BITS - 1).saturating_sub(timetable.num_stops().max(1).leading_zeros());
    let mut buckets: Vec<Vec<GeneratedQuery>> = vec![Vec::new(); max_bucket_rank as usize + 1];
    let mut consecutive_failures = 0u32;

    while consecutive_failures < MAX_CONSECUTIVE_FAILURES {
        if buckets.iter().skip(MIN_RANK as usize).all(|b| b.len() >= quota_per_rank) {
            break;
        }

        let source = sampler.sample(rng);
        let distances = hubs.single_source_distances(source, timetable.num_stops());
        if distances.is_empty() {
            consecutive_failures += 1;
            continue;
        }

        let current_max_rank = rank_of(distances.len().saturating_sub(1));
        let mut added = false;
        for rank in MIN_RANK..=current_max_rank {
            if buckets[rank as usize].len() >= quota_per_rank {
                continue;
            }
            let lo = 1usize << rank;
            let hi = (1usize << (rank + 1)).min(distances.len());
            if lo >= hi {
                continue;
            }
            let index = rng.gen_range(lo..hi);
            let (_, target) = distances[index];
            if target == source {
                continue;
            }
            let departure = Time::from_secs(rng.gen_range(0..86_400));
            buckets[rank as usize].push(GeneratedQuery {
                rank,
                source,
                target,
                departure,
            });
            added = true;
        }

        if added {
            consecutive_failures = 0;
        } else {
            consecutive_failures += 1;
        }
    }

    if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
        warn!("query generator: stopped early after {MAX_CONSECUTIVE_FAILURES} unproductive attempts");
    }

    buckets.into_iter().flatten().collect()
}

fn rank_of(index: usize) -> u32 {
    (usize::BITS - 1).saturating_sub(index.max(1).leading_zeros())
}

fn stop_weight(timetable: &TimetableStore, stop: StopId) -> u64 {
    timetable
        .routes_for_stop(stop)
        .iter()
        .map(|&route| timetable.route(route).num_trips as u64)
        .sum()
}
