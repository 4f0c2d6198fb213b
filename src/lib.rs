//! Stream Cache - process-local response caching for the streaming API
//!
//! A bounded, TTL-based key/value store with hit-count eviction, plus the
//! cache-control policies that tell browsers and the CDN how long to keep
//! responses.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;

pub use api::AppState;
pub use cache::{CacheStore, SharedCache};
pub use config::Config;
pub use policy::{apply_headers, CachePolicy, CachePreset};
