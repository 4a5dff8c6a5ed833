//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::KeyValueCache;
use crate::error::{ApiError, Result};
use crate::models::requests::validate_key;
use crate::models::{
    DeleteResponse, EntryRequest, EntryResponse, FlushResponse, HealthResponse, KeysResponse,
    SetResponse, WhoAmIResponse,
};
use crate::session::{RequestContext, TokenService};

/// Application state shared across all handlers.
///
/// Holds one cache instance shared by every request and the token service
/// used to build each request's [`RequestContext`].
pub struct AppState<C> {
    /// Thread-safe cache shared across requests
    pub cache: Arc<C>,
    /// Session token validation
    pub tokens: TokenService,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            tokens: self.tokens.clone(),
        }
    }
}

impl<C: KeyValueCache<Value>> AppState<C> {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: C, tokens: TokenService) -> Self {
        Self {
            cache: Arc::new(cache),
            tokens,
        }
    }
}

/// Handler for PUT /set
///
/// Stores a value, overwriting any previous one.
pub async fn set_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
    Json(req): Json<EntryRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for PUT /setdefault
///
/// Stores a value only if the key is absent.
pub async fn set_default_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
    Json(req): Json<EntryRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.set_default(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for POST /getorset
///
/// Returns the stored value, storing the supplied one first on a miss.
pub async fn get_or_set_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
    Json(req): Json<EntryRequest>,
) -> Result<Json<EntryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let value = state.cache.get_or_set(&req.key, req.value);

    Ok(Json(EntryResponse::new(req.key, value)))
}

/// Handler for GET /get/:key
pub async fn get_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    Ok(Json(EntryResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Deleting an absent key succeeds.
pub async fn delete_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.delete(&key);

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /keys
pub async fn keys_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys()))
}

/// Handler for POST /flush
pub async fn flush_handler<C: KeyValueCache<Value>>(
    State(state): State<AppState<C>>,
) -> Json<FlushResponse> {
    state.cache.flush();
    info!("Cache flushed");

    Json(FlushResponse::new())
}

/// Handler for GET /whoami
///
/// Reads the caller from the request-scoped context.
pub async fn whoami_handler(
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<WhoAmIResponse>> {
    let caller_id = ctx.require_caller()?;
    debug!(caller_id, "resolved caller");

    Ok(Json(WhoAmIResponse { caller_id }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
