//! Cache Item Module
//!
//! Defines a single stored value together with its expiry metadata.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Item ==
/// A single cache entry with value and expiry metadata.
///
/// Expiry uses the tokio clock so that paused-time tests drive it.
#[derive(Debug, Clone)]
pub struct CacheItem<T> {
    /// The stored value
    pub value: T,
    /// Absolute expiration instant (meaningless when `can_expire` is false)
    pub expires_at: Instant,
    /// Whether the sweep may remove this item
    pub can_expire: bool,
}

impl<T> CacheItem<T> {
    // == Constructor ==
    /// Creates a new item expiring `ttl` from now.
    ///
    /// A zero TTL marks the item permanent. So does a TTL too large to be
    /// represented as an instant.
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();
        match now.checked_add(ttl) {
            Some(expires_at) if !ttl.is_zero() => Self {
                value,
                expires_at,
                can_expire: true,
            },
            _ => Self {
                value,
                expires_at: now,
                can_expire: false,
            },
        }
    }

    // == Is Expired ==
    /// Checks if the item has expired at `now`.
    ///
    /// An item is expired once `now` reaches its expiration instant.
    /// Permanent items never expire.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.can_expire && now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None for a permanent item.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the item has expired
    /// - `Some(remaining)` if the item has a TTL and hasn't expired
    /// - `None` if the item never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.can_expire
            .then(|| self.expires_at.saturating_duration_since(Instant::now()))
    }
}
