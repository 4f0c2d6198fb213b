//! Cache Entry Module
//!
//! Defines individual cache entries with an absolute expiry and a read counter.

use chrono::Utc;

// == Cache Entry ==
/// A single cached value plus the metadata the store needs for expiry and eviction.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload, opaque to the cache
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: i64,
    /// Number of successful, non-expired reads since insertion
    pub hit_count: u64,
    /// Position in the store's insertion order, used to break eviction ties
    pub(crate) seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now.
    ///
    /// A TTL of zero or less produces an entry that is already expired.
    pub fn new(value: V, ttl_seconds: i64, seq: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            value,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
            hit_count: 0,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks expiry against an explicit clock reading.
    ///
    /// Once `now` reaches `expires_at` the entry counts as gone, so a TTL of
    /// zero is expired on the very next read.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    // == Record Hit ==
    pub(crate) fn record_hit(&mut self) {
        self.hit_count += 1;
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), 60, 0);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.hit_count, 0);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value", 1, 0);

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("v", 0, 0);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let entry = CacheEntry::new("v", -30, 0);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_extreme_ttls_saturate() {
        let ancient = CacheEntry::new((), i64::MIN, 0);
        let forever = CacheEntry::new((), i64::MAX, 1);

        sleep(Duration::from_millis(5));

        assert!(ancient.expires_at < 0);
        assert!(ancient.is_expired());
        assert_eq!(forever.expires_at, i64::MAX);
        assert!(!forever.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: "test",
            expires_at: now,
            hit_count: 0,
            seq: 0,
        };

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(!entry.is_expired_at(now - 1));
    }

    #[test]
    fn test_record_hit() {
        let mut entry = CacheEntry::new(1u32, 60, 0);
        entry.record_hit();
        entry.record_hit();
        assert_eq!(entry.hit_count, 2);
    }
}
