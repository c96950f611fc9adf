//! API Handlers
//!
//! HTTP request handlers exposing a string-valued once cache.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{OnceCache, OnceCacheOptions};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetOrSetRequest, GetResponse, HealthResponse, SetRequest, SetResponse,
    ShutdownResponse,
};

/// Application state shared across all handlers.
///
/// The cache handle is itself cheap to clone and internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub cache: OnceCache<String>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: OnceCache<String>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState, constructing the cache from options.
    pub fn from_options(options: OnceCacheOptions) -> Self {
        Self::new(OnceCache::new(options))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair; `ttl_ms` overrides the default key TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match req.ttl_ms {
        Some(ttl_ms) => {
            state
                .cache
                .set_expire(req.key.clone(), req.value, Duration::from_millis(ttl_ms))
                .await?
        }
        None => state.cache.set(req.key.clone(), req.value).await?,
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Includes the remaining TTL in milliseconds for expiring entries.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get_with_ttl(&key).await? {
        Some((value, ttl)) => Ok(Json(GetResponse::new(key, value).with_ttl(ttl))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deleting an absent key succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.del(&key).await?;
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for PUT /get_or_set
///
/// Returns the stored value, storing the request's value first on a miss.
pub async fn get_or_set_handler(
    State(state): State<AppState>,
    Json(req): Json<GetOrSetRequest>,
) -> Result<Json<GetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let candidate = req.value;
    let value = state
        .cache
        .get_or_set_func(&req.key, move || candidate)
        .await?;

    Ok(Json(GetResponse::new(req.key, value)))
}

/// Handler for GET /health
///
/// Reports the cache lifecycle state; answers 200 even once destroyed.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let entries = state.cache.len().await;
    Json(HealthResponse::new(state.cache.state().as_str(), entries))
}

/// Handler for POST /shutdown
///
/// Requests early destruction of the cache.
pub async fn shutdown_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ShutdownResponse>) {
    state.cache.shutdown();
    (StatusCode::ACCEPTED, Json(ShutdownResponse::requested()))
}
