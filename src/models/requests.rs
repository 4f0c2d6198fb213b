//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::TtlPreset;
use crate::policy::CachePreset;

/// Request body for `PUT /cache`
///
/// An explicit `ttl` wins over `preset`; with neither, the configured
/// default applies.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key, usually `route:params`
    pub key: String,
    /// Any JSON payload
    pub value: Value,
    /// TTL in seconds; zero or negative stores an already expired entry
    #[serde(default)]
    pub ttl: Option<i64>,
    /// Named TTL category
    #[serde(default)]
    pub preset: Option<TtlPreset>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    /// Resolves the TTL to store with.
    pub fn effective_ttl(&self, default_ttl: i64) -> i64 {
        self.ttl
            .or_else(|| self.preset.map(TtlPreset::seconds))
            .unwrap_or(default_ttl)
    }
}

/// Query string for `GET /cache/:key`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// Policy applied to the response headers on a hit
    #[serde(default)]
    pub policy: CachePreset,
}

/// Query string for `DELETE /cache/:key`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    /// Treat the path key as a prefix
    #[serde(default)]
    pub prefix: bool,
}
