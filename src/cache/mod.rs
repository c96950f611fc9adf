//! Cache Module
//!
//! Provides the once cache: an in-memory store with per-item TTL sweeping
//! and a bounded total lifetime.

mod item;
mod options;
mod store;


// Re-export public types
pub use item::CacheItem;
pub use options::{OnDestroy, OnceCacheOptions};
pub use store::{OnceCache, StoreState};

pub(crate) use store::Shared;

// == Public Constants ==
/// Maximum allowed key length in bytes for the HTTP front-end
pub const MAX_KEY_LENGTH: usize = 256;
