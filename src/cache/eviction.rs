//! Eviction Module
//!
//! Hit-count ranking used as a cheap stand-in for recency.
//!
//! Entries are ranked by ascending `hit_count`; ties go to the entry that was
//! inserted first. The bottom slice of that ranking is removed in one sweep.

use std::collections::HashMap;

use crate::cache::CacheEntry;

// == Evict Count ==
/// Number of entries removed by one sweep for the given capacity.
///
/// Never less than one, so tiny stores still make room. Percentages above
/// 100 count as 100.
pub fn evict_count(max_entries: usize, eviction_percent: usize) -> usize {
    (max_entries.saturating_mul(eviction_percent.min(100)) / 100).max(1)
}

// == Select Victims ==
/// Returns the keys of the `count` lowest-ranked entries, lowest first.
pub fn select_victims<V>(entries: &HashMap<String, CacheEntry<V>>, count: usize) -> Vec<String> {
    let mut ranked: Vec<(u64, u64, &String)> = entries
        .iter()
        .map(|(key, entry)| (entry.hit_count, entry.seq, key))
        .collect();

    // seq is unique per entry, so the ordering is total
    ranked.sort_unstable_by_key(|&(hits, seq, _)| (hits, seq));

    ranked
        .into_iter()
        .take(count)
        .map(|(_, _, key)| key.clone())
        .collect()
}
