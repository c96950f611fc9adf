//! Cache Options Module
//!
//! Construction-time configuration of a [`OnceCache`](super::OnceCache).

use std::fmt;
use std::time::Duration;

/// Callback run once the cache has been torn down.
pub type OnDestroy = Box<dyn FnOnce() + Send + 'static>;

/// Options captured when a cache is constructed; immutable afterwards.
///
/// A zero duration disables the corresponding behavior: an unbounded
/// lifetime, permanent entries, or no periodic sweep.
#[derive(Default)]
pub struct OnceCacheOptions {
    /// Upper bound on the cache's existence
    pub lifetime: Duration,
    /// TTL applied by `set` and `get_or_set_func`
    pub default_key_ttl: Duration,
    /// Period between sweeps of expired entries
    pub sweep_interval: Duration,
    /// Invoked exactly once after the cache has fully stopped
    pub on_destroy: Option<OnDestroy>,
}

impl OnceCacheOptions {
    /// Creates options with every duration disabled and no callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total lifetime; zero means the cache lives until shut down.
    pub fn lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Sets the TTL used by `set` and `get_or_set_func`; zero means permanent.
    pub fn default_key_ttl(mut self, ttl: Duration) -> Self {
        self.default_key_ttl = ttl;
        self
    }

    /// Sets the period between sweeps; zero disables sweeping.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Sets the callback run once after teardown.
    ///
    /// A panic in the callback is logged; the cache still reports itself
    /// destroyed.
    pub fn on_destroy<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_destroy = Some(Box::new(callback));
        self
    }

    /// The total lifetime, or None when unbounded.
    pub(crate) fn bounded_lifetime(&self) -> Option<Duration> {
        (!self.lifetime.is_zero()).then_some(self.lifetime)
    }

    /// The sweep period, or None when sweeping is disabled.
    pub(crate) fn sweep_period(&self) -> Option<Duration> {
        (!self.sweep_interval.is_zero()).then_some(self.sweep_interval)
    }
}

impl fmt::Debug for OnceCacheOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceCacheOptions")
            .field("lifetime", &self.lifetime)
            .field("default_key_ttl", &self.default_key_ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("on_destroy", &self.on_destroy.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let opts = OnceCacheOptions::default();
        assert_eq!(opts.lifetime, Duration::ZERO);
        assert_eq!(opts.default_key_ttl, Duration::ZERO);
        assert!(opts.bounded_lifetime().is_none());
        assert!(opts.sweep_period().is_none());
        assert!(opts.on_destroy.is_none());
    }

    #[test]
    fn test_options_builder() {
        let opts = OnceCacheOptions::new()
            .lifetime(Duration::from_secs(1))
            .default_key_ttl(Duration::from_millis(10))
            .sweep_interval(Duration::from_millis(100))
            .on_destroy(|| {});

        assert_eq!(opts.bounded_lifetime(), Some(Duration::from_secs(1)));
        assert_eq!(opts.default_key_ttl, Duration::from_millis(10));
        assert_eq!(opts.sweep_period(), Some(Duration::from_millis(100)));

        let debug = format!("{:?}", opts);
        assert!(debug.contains("on_destroy: true"));
    }
}
