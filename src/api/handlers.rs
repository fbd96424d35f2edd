//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::backend::{BackingStore, FileStore, MemoryStore};
use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, DurationQuery, GetResponse, HealthResponse,
    MaintenanceResponse, SetRequest, SetResponse, StatsResponse,
};

/// Cache type served over HTTP; the backing store is chosen at startup.
pub type SharedCache = Cache<Box<dyn BackingStore>>;

/// Application state shared across all handlers.
///
/// A single lock serializes every cache operation.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<SharedCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the file store; if it cannot be opened the cache runs memory-only.
    pub fn from_config(config: &Config) -> Self {
        let options = config.cache_options();
        let cache = match FileStore::open(&config.store_dir, config.quota()) {
            Ok(store) => Cache::new(Box::new(store) as Box<dyn BackingStore>, options),
            Err(e) => {
                warn!(
                    "Cannot open store at {}, running memory-only: {}",
                    config.store_dir.display(),
                    e
                );
                Cache::new(
                    Box::new(MemoryStore::new()) as Box<dyn BackingStore>,
                    options.use_persistence(false),
                )
            }
        };
        Self::new(cache)
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value with an optional lifetime. A non-positive lifetime
/// removes the key.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let duration = req.duration();
    let mut cache = state.cache.write().await;
    cache.set(&req.key, req.value, duration)?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// `?duration=secs` overrides the stored lifetime for this read.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<DurationQuery>,
) -> Result<Json<GetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    // Write lock: a hit refreshes usage time, a miss may remove the entry
    let mut cache = state.cache.write().await;
    match cache.get(&key, query.ttl())? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Removing an absent key succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.remove(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<MaintenanceResponse>> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear()?;

    Ok(Json(MaintenanceResponse::new(removed, false)))
}

/// Handler for POST /purge
pub async fn purge_handler(State(state): State<AppState>) -> Result<Json<MaintenanceResponse>> {
    let mut cache = state.cache.write().await;
    let removed = cache.purge()?;

    Ok(Json(MaintenanceResponse::new(removed, true)))
}

/// Handler for POST /clean
///
/// Purges only if the last purge is older than `?duration=secs`.
pub async fn clean_handler(
    State(state): State<AppState>,
    Query(query): Query<DurationQuery>,
) -> Result<Json<MaintenanceResponse>> {
    let mut cache = state.cache.write().await;
    let response = match cache.clean(query.ttl())? {
        Some(removed) => MaintenanceResponse::new(removed, true),
        None => MaintenanceResponse::new(0, false),
    };

    Ok(Json(response))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.persistence_enabled()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
