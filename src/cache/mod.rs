//! Cache Module
//!
//! Process-local response cache: bounded size, lazy TTL expiry and
//! hit-count eviction. Each running instance owns its own store; nothing is
//! shared or persisted across processes.

mod entry;
mod eviction;
mod shared;
mod stats;
mod store;
pub mod ttl;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;
pub use ttl::TtlPreset;

// == Public Constants ==
/// Default capacity of a store
pub const MAX_ENTRIES: usize = 500;

/// Default share of capacity removed by one eviction sweep
pub const DEFAULT_EVICTION_PERCENT: usize = 20;
