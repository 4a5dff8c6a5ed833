//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, flush_handler, get_handler, get_or_set_handler, health_handler, keys_handler,
    set_default_handler, set_handler, whoami_handler, AppState,
};
use super::middleware::attach_request_context;
use crate::cache::{ExclusiveCache, KeyValueCache, SharedCache};
use crate::config::{CacheKind, Config};
use crate::session::TokenService;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Request context: resolves the caller from `Authorization`
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: KeyValueCache<Value> + 'static,
{
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler::<C>))
        .route("/setdefault", put(set_default_handler::<C>))
        .route("/getorset", post(get_or_set_handler::<C>))
        .route("/get/:key", get(get_handler::<C>))
        .route("/del/:key", delete(delete_handler::<C>))
        .route("/keys", get(keys_handler::<C>))
        .route("/flush", post(flush_handler::<C>))
        .route("/whoami", get(whoami_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            attach_request_context::<C>,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the router for the cache variant selected in `config`.
pub fn build_router(config: &Config) -> Router {
    let tokens = TokenService::from_config(config);

    match config.cache_kind {
        CacheKind::Exclusive => {
            create_router(AppState::new(ExclusiveCache::<Value>::new(), tokens))
        }
        CacheKind::Shared => create_router(AppState::new(SharedCache::<Value>::new(), tokens)),
    }
}
