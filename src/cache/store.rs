//! Cache Store Module
//!
//! Bounded key/value map with lazy TTL expiry and hit-count eviction.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::entry::current_timestamp_ms;
use crate::cache::eviction::{evict_count, select_victims};
use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheStats, DEFAULT_EVICTION_PERCENT, MAX_ENTRIES};

// == Cache Store ==
/// Process-local cache storage.
///
/// Expired entries are only reaped when read or when a sweep happens to pick
/// them; there is no background timer. Capacity is checked on `set` alone.
#[derive(Debug)]
pub struct CacheStore<V = Value> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Next insertion sequence number
    next_seq: u64,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Share of `max_entries` removed per eviction sweep
    eviction_percent: usize,
    counters: CacheCounters,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(MAX_ENTRIES)
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a store with the given capacity and the default 20% sweep.
    pub fn new(max_entries: usize) -> Self {
        Self::with_eviction_percent(max_entries, DEFAULT_EVICTION_PERCENT)
    }

    /// Creates a store with an explicit sweep size.
    pub fn with_eviction_percent(max_entries: usize, eviction_percent: usize) -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
            max_entries,
            eviction_percent,
            counters: CacheCounters::default(),
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_seconds`.
    ///
    /// Replacing a key resets its hit count but keeps its place in insertion
    /// order. Inserting a new key into a full store first runs an eviction
    /// sweep.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_seconds: i64) {
        let key = key.into();
        let existing_seq = self.entries.get(&key).map(|entry| entry.seq);

        let seq = match existing_seq {
            Some(seq) => seq,
            None => {
                if self.entries.len() >= self.max_entries {
                    self.evict();
                }
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };

        self.entries
            .insert(key, CacheEntry::new(value, ttl_seconds, seq));
    }

    // == Delete ==
    /// Removes the exact key, or every key starting with it when `is_prefix`.
    ///
    /// Returns how many entries were removed.
    pub fn delete(&mut self, key_or_prefix: &str, is_prefix: bool) -> usize {
        if !is_prefix {
            return usize::from(self.entries.remove(key_or_prefix).is_some());
        }

        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(key_or_prefix));
        let removed = before - self.entries.len();

        info!(prefix = key_or_prefix, removed, "invalidated cache prefix");
        removed
    }

    // == Stats ==
    /// Returns occupancy and counters; does not touch any entry.
    pub fn stats(&self) -> CacheStats {
        let now = current_timestamp_ms();
        let expired_count = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .count();

        CacheStats::new(
            self.entries.len(),
            self.max_entries,
            expired_count,
            self.counters,
        )
    }

    // == Hit Count ==
    /// Current hit count of a live entry, without counting as a read.
    pub fn hit_count(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.hit_count)
    }

    // == Contains ==
    /// True if a live entry exists for `key`, without counting as a read.
    pub fn contains_key(&self, key: &str) -> bool {
        self.hit_count(key).is_some()
    }

    // == Length ==
    /// Returns the number of entries physically present, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    // == Evict ==
    fn evict(&mut self) {
        let count = evict_count(self.max_entries, self.eviction_percent);
        let victims = select_victims(&self.entries, count);

        for key in &victims {
            self.entries.remove(key);
        }

        self.counters.record_evictions(victims.len());
        info!(
            evicted = victims.len(),
            remaining = self.entries.len(),
            "cache over capacity, evicted least-read entries"
        );
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Returns the value if present and unexpired, counting the read.
    ///
    /// An expired entry is removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = current_timestamp_ms();

        let Some(entry) = self.entries.get_mut(key) else {
            self.counters.record_miss();
            return None;
        };

        if entry.is_expired_at(now) {
            self.entries.remove(key);
            self.counters.record_miss();
            debug!(key, "cache entry expired");
            return None;
        }

        entry.record_hit();
        let value = entry.value.clone();
        self.counters.record_hit();
        Some(value)
    }

    // == Cache Through ==
    /// Returns the cached value, or computes, stores and returns a fresh one.
    ///
    /// A failed `compute` leaves the store untouched and its error is
    /// returned as-is.
    pub fn cache_through<F, E>(&mut self, key: &str, ttl_seconds: i64, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = compute()?;
        self.set(key, value.clone(), ttl_seconds);
        Ok(value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn store() -> CacheStore<String> {
        CacheStore::new(100)
    }

    #[test]
    fn test_store_new() {
        let store = store();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 100);
    }

    #[test]
    fn test_default_capacity() {
        let store: CacheStore = CacheStore::default();
        assert_eq!(store.max_entries(), 500);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store();

        store.set("key1", "value1".to_string(), 60);

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_get_increments_hit_count() {
        let mut store = store();
        store.set("k", "v".to_string(), 60);

        assert_eq!(store.hit_count("k"), Some(0));
        store.get("k");
        store.get("k");
        store.get("k");
        assert_eq!(store.hit_count("k"), Some(3));
    }

    #[test]
    fn test_overwrite_resets_hit_count() {
        let mut store = store();
        store.set("k", "v1".to_string(), 60);
        store.get("k");
        store.get("k");

        store.set("k", "v2".to_string(), 60);

        assert_eq!(store.hit_count("k"), Some(0));
        assert_eq!(store.get("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_expired_read_removes_entry() {
        let mut store = store();
        store.set("stale", "v".to_string(), 0);
        store.set("fresh", "v".to_string(), 60);

        assert_eq!(store.stats().size, 2);
        assert_eq!(store.stats().expired_count, 1);

        assert!(store.get("stale").is_none());

        let stats = store.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.expired_count, 0);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store();

        store.set("key1", "value1".to_string(), 1);
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(1100));

        assert!(store.get("key1").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_exact() {
        let mut store = store();
        store.set("catalog:1", "a".to_string(), 60);
        store.set("catalog:10", "b".to_string(), 60);

        assert_eq!(store.delete("catalog:1", false), 1);
        assert!(store.get("catalog:1").is_none());
        assert!(store.get("catalog:10").is_some());
    }

    #[test]
    fn test_delete_nonexistent_is_not_an_error() {
        let mut store = store();
        assert_eq!(store.delete("nonexistent", false), 0);
        assert_eq!(store.delete("nothing:", true), 0);
    }

    #[test]
    fn test_delete_prefix() {
        let mut store = store();
        store.set("catalog:1", "a".to_string(), 60);
        store.set("catalog:2", "b".to_string(), 60);
        store.set("profile:1", "c".to_string(), 60);

        assert_eq!(store.delete("catalog:", true), 2);

        assert_eq!(store.len(), 1);
        assert!(store.contains_key("profile:1"));
    }

    #[test]
    fn test_no_eviction_below_capacity() {
        let mut store = CacheStore::new(5);
        for i in 0..5 {
            store.set(format!("k{i}"), i, 60);
        }
        assert_eq!(store.len(), 5);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_eviction_removes_never_read_first() {
        let mut store = CacheStore::with_eviction_percent(5, 40);
        for i in 0..5 {
            store.set(format!("k{i}"), i, 60);
        }
        store.get("k0");
        store.get("k1");
        store.get("k3");

        store.set("k5", 5, 60);

        // 40% of 5 = 2 swept: the unread k2 and k4
        assert_eq!(store.len(), 4);
        assert!(!store.contains_key("k2"));
        assert!(!store.contains_key("k4"));
        assert!(store.contains_key("k0"));
        assert!(store.contains_key("k5"));
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(3);
        store.set("a", 1, 60);
        store.set("b", 2, 60);
        store.set("c", 3, 60);

        store.set("b", 20, 60);

        assert_eq!(store.len(), 3);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_overwrite_keeps_insertion_position() {
        let mut store = CacheStore::new(3);
        store.set("a", 1, 60);
        store.set("b", 2, 60);
        store.set("c", 3, 60);
        // a is replaced but stays the oldest
        store.set("a", 10, 60);

        store.set("d", 4, 60);

        assert!(!store.contains_key("a"));
        assert!(store.contains_key("b"));
    }

    #[test]
    fn test_stats_is_side_effect_free() {
        let mut store = store();
        store.set("gone", "v".to_string(), -1);
        store.set("live", "v".to_string(), 60);

        let first = store.stats();
        let second = store.stats();

        assert_eq!(first, second);
        assert_eq!(first.size, 2);
        assert_eq!(first.expired_count, 1);
        assert_eq!(store.hit_count("live"), Some(0));
    }

    #[test]
    fn test_stats_counters() {
        let mut store = store();
        store.set("key1", "value1".to_string(), 60);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.utilization_percent, 1);
    }

    #[test]
    fn test_cache_through_miss_then_hit() {
        let mut store = store();
        let mut calls = 0;

        let first: Result<String, ()> = store.cache_through("k", 60, || {
            calls += 1;
            Ok("computed".to_string())
        });
        assert_eq!(first.unwrap(), "computed");

        let second: Result<String, ()> = store.cache_through("k", 60, || {
            calls += 1;
            Ok("recomputed".to_string())
        });
        assert_eq!(second.unwrap(), "computed");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cache_through_error_not_cached() {
        let mut store = store();

        let result = store.cache_through("k", 60, || Err::<String, _>("db down"));

        assert_eq!(result, Err("db down"));
        assert!(store.is_empty());
        assert_eq!(store.stats().size, 0);
    }
}
