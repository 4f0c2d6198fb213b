//! Cache Statistics Module
//!
//! Point-in-time occupancy figures plus running hit/miss/eviction counters.

use serde::Serialize;

// == Cache Counters ==
/// Running counters maintained by the store as operations happen.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    /// Entries removed by eviction sweeps
    pub evictions: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }
}

// == Cache Stats ==
/// Snapshot returned by `CacheStore::stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries physically present, expired or not
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Entries present but already past their expiry
    pub expired_count: usize,
    /// `round(size / max_size * 100)`
    pub utilization_percent: u32,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Builds a snapshot from occupancy figures and the running counters.
    pub fn new(size: usize, max_size: usize, expired_count: usize, counters: CacheCounters) -> Self {
        Self {
            size,
            max_size,
            expired_count,
            utilization_percent: utilization_percent(size, max_size),
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

fn utilization_percent(size: usize, max_size: usize) -> u32 {
    if max_size == 0 {
        return 0;
    }
    (size as f64 / max_size as f64 * 100.0).round() as u32
}
