//! Background Tasks Module
//!
//! Contains the background tasks each cache runs for its whole life.
//!
//! # Tasks
//! - Lifecycle: enforces the total lifetime and tears the cache down
//! - Sweep: removes expired entries at the configured interval

mod lifecycle;

pub(crate) use lifecycle::spawn_lifecycle;
