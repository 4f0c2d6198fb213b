//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint. Every response
//! carries explicit caching headers for the CDN in front of the instance.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::debug;

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteQuery, DeleteResponse, GetQuery, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};
use crate::policy::CachePolicy;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The instance's one cache store
    pub cache: SharedCache,
    /// TTL for writes that name neither a TTL nor a preset
    pub default_ttl: i64,
}

impl AppState {
    /// Creates a new AppState around an existing store.
    pub fn new(cache: CacheStore, default_ttl: i64) -> Self {
        Self {
            cache: SharedCache::new(cache),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::with_eviction_percent(config.max_entries, config.eviction_percent);
        Self::new(cache, config.default_ttl)
    }
}

/// Handler for `PUT /cache`
///
/// Malformed bodies are reported through `CacheError` so they carry
/// no-store headers like every other error.
pub async fn set_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<(CachePolicy, Json<SetResponse>)> {
    let Json(req) = body?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.effective_ttl(state.default_ttl);
    state.cache.set(req.key.clone(), req.value, ttl).await;

    Ok((CachePolicy::NO_CACHE, Json(SetResponse::new(req.key, ttl))))
}

/// Handler for `GET /cache/:key`
///
/// Hits are served with the headers of the requested policy.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    query: std::result::Result<Query<GetQuery>, QueryRejection>,
) -> Result<(CachePolicy, Json<GetResponse>)> {
    let Query(query) = query?;
    let value = state.cache.get(&key).await.ok_or_else(|| {
        debug!(key = %key, "cache miss");
        CacheError::NotFound(key.clone())
    })?;

    Ok((query.policy.policy(), Json(GetResponse::new(key, value))))
}

/// Handler for `DELETE /cache/:key`
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    query: std::result::Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<(CachePolicy, Json<DeleteResponse>)> {
    let Query(query) = query?;
    let removed = state.cache.delete(&key, query.prefix).await;

    Ok((
        CachePolicy::NO_CACHE,
        Json(DeleteResponse::new(key, query.prefix, removed)),
    ))
}

/// Handler for `GET /stats`
pub async fn stats_handler(State(state): State<AppState>) -> (CachePolicy, Json<StatsResponse>) {
    let stats = state.cache.stats().await;

    (CachePolicy::NO_CACHE, Json(StatsResponse::from(stats)))
}

/// Handler for `GET /health`
pub async fn health_handler() -> (CachePolicy, Json<HealthResponse>) {
    (CachePolicy::NO_CACHE, Json(HealthResponse::healthy()))
}
