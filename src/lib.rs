//! Once Cache - An in-memory cache with a bounded lifetime
//!
//! Provides a concurrency-safe key/value store whose whole contents are
//! destroyed after a fixed lifetime, with optional per-key expiration swept
//! out periodically. An HTTP front-end exposes a string-valued instance.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
mod tasks;

pub use api::AppState;
pub use cache::{OnceCache, OnceCacheOptions, StoreState};
pub use config::Config;
pub use error::CacheError;
