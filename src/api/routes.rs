//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, get_or_set_handler, health_handler, set_handler,
    shutdown_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `PUT /get_or_set` - Retrieve a value, storing one on a miss
/// - `GET /health` - Cache lifecycle state
/// - `POST /shutdown` - Destroy the cache early
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/get_or_set", put(get_or_set_handler))
        .route("/health", get(health_handler))
        .route("/shutdown", post(shutdown_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
