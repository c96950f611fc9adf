//! API Module
//!
//! HTTP handlers and routing for the once cache REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `PUT /get_or_set` - Retrieve a value, storing one on a miss
//! - `GET /health` - Cache lifecycle state
//! - `POST /shutdown` - Destroy the cache early

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
