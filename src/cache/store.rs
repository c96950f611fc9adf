//! Cache Store Module
//!
//! The once cache itself: a HashMap of items behind a single tokio `RwLock`,
//! bound to a background lifecycle task that sweeps expired items and
//! destroys the whole store when its lifetime elapses.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::cache::{CacheItem, OnceCacheOptions};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_lifecycle;

// == Store State ==
/// Lifecycle state of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Constructed, lifecycle task not yet running
    Constructed,
    /// Lifecycle task running
    Alive,
    /// Torn down; terminal
    Destroyed,
}

impl StoreState {
    /// Returns the lowercase name used in health reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreState::Constructed => "constructed",
            StoreState::Alive => "alive",
            StoreState::Destroyed => "destroyed",
        }
    }
}

// == Slots ==
/// Everything guarded by the store lock.
pub(crate) struct Slots<T> {
    entries: HashMap<String, CacheItem<T>>,
    destroyed: bool,
}

impl<T> Slots<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            destroyed: false,
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(CacheError::Closed)
        } else {
            Ok(())
        }
    }
}

// == Shared ==
/// State shared between the handles and the background tasks.
///
/// The background tasks only hold weak references, so dropping the last
/// handle drops this and cancels the lifecycle.
pub(crate) struct Shared<T> {
    slots: RwLock<Slots<T>>,
    default_key_ttl: Duration,
    cancel: CancellationToken,
}

impl<T> Shared<T> {
    // == Sweep ==
    /// Removes every expired item, keeping permanent ones.
    ///
    /// Returns the number of items removed.
    pub(crate) async fn sweep(&self) -> usize {
        let mut slots = self.slots.write().await;
        if slots.destroyed {
            return 0;
        }

        let now = Instant::now();
        let before = slots.entries.len();
        slots.entries.retain(|_, item| !item.is_expired_at(now));
        before - slots.entries.len()
    }

    // == Destroy ==
    /// Drops all items and rejects every later operation.
    ///
    /// Returns the number of items dropped.
    pub(crate) async fn destroy(&self) -> usize {
        let mut slots = self.slots.write().await;
        slots.destroyed = true;
        std::mem::take(&mut slots.entries).len()
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// == Once Cache ==
/// In-memory key/value store destroyed after a fixed lifetime.
///
/// Cloning yields another handle to the same store. Lookups never check item
/// expiry: an expired item stays visible until the next sweep removes it.
///
/// Once the store is destroyed every operation returns
/// [`CacheError::Closed`].
pub struct OnceCache<T> {
    shared: Arc<Shared<T>>,
    state: watch::Receiver<StoreState>,
}

impl<T> OnceCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its lifecycle task.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    pub fn new(options: OnceCacheOptions) -> Self {
        let cancel = CancellationToken::new();
        let shared = Arc::new(Shared {
            slots: RwLock::new(Slots::new()),
            default_key_ttl: options.default_key_ttl,
            cancel: cancel.clone(),
        });
        let (state_tx, state_rx) = watch::channel(StoreState::Constructed);

        spawn_lifecycle(Arc::downgrade(&shared), options, cancel, state_tx);

        Self {
            shared,
            state: state_rx,
        }
    }

    /// Creates a cache with the given lifetime and otherwise default options.
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self::new(OnceCacheOptions::new().lifetime(lifetime))
    }

    // == Set ==
    /// Stores a value under `key` with the default key TTL.
    pub async fn set(&self, key: impl Into<String>, value: T) -> Result<()> {
        self.set_expire(key, value, self.shared.default_key_ttl)
            .await
    }

    // == Set Expire ==
    /// Stores a value under `key`, replacing any previous item.
    ///
    /// A zero `ttl` makes the item permanent: only `del` or the end of the
    /// store removes it.
    pub async fn set_expire(&self, key: impl Into<String>, value: T, ttl: Duration) -> Result<()> {
        let key = key.into();
        let mut slots = self.shared.slots.write().await;
        slots.ensure_alive()?;
        slots.entries.insert(key, CacheItem::new(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// The lookup itself neither allocates nor reads the clock, but the value
    /// is returned as a clone of `T`. For heavy values store an `Arc<V>`.
    pub async fn get(&self, key: &str) -> Result<Option<T>> {
        let slots = self.shared.slots.read().await;
        slots.ensure_alive()?;
        Ok(slots.entries.get(key).map(|item| item.value.clone()))
    }

    /// Retrieves the value under `key` together with its remaining TTL.
    ///
    /// # Returns
    /// - `Ok(None)` if the key is absent
    /// - `Ok(Some((value, None)))` for a permanent item
    /// - `Ok(Some((value, Some(remaining))))` otherwise; `remaining` is zero
    ///   for an item that has expired but not yet been swept
    pub async fn get_with_ttl(&self, key: &str) -> Result<Option<(T, Option<Duration>)>> {
        let slots = self.shared.slots.read().await;
        slots.ensure_alive()?;
        Ok(slots
            .entries
            .get(key)
            .map(|item| (item.value.clone(), item.ttl_remaining())))
    }

    // == Delete ==
    /// Removes `key`; a no-op when absent.
    pub async fn del(&self, key: &str) -> Result<()> {
        let mut slots = self.shared.slots.write().await;
        slots.ensure_alive()?;
        slots.entries.remove(key);
        Ok(())
    }

    // == Get Or Set ==
    /// Returns the value under `key`, computing and storing it on a miss.
    ///
    /// The producer runs under the write lock after a second lookup, so
    /// concurrent callers for the same absent key run it once and all get
    /// the same value. The producer must not call back into this cache.
    pub async fn get_or_set_func<F>(&self, key: &str, producer: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        {
            let slots = self.shared.slots.read().await;
            slots.ensure_alive()?;
            if let Some(item) = slots.entries.get(key) {
                return Ok(item.value.clone());
            }
        }

        let mut slots = self.shared.slots.write().await;
        slots.ensure_alive()?;
        if let Some(item) = slots.entries.get(key) {
            return Ok(item.value.clone());
        }

        let value = producer();
        slots.entries.insert(
            key.to_string(),
            CacheItem::new(value.clone(), self.shared.default_key_ttl),
        );
        Ok(value)
    }

    // == Length ==
    /// Returns the number of stored items; zero once destroyed.
    pub async fn len(&self) -> usize {
        self.shared.slots.read().await.entries.len()
    }

    /// Returns true if the cache holds no items.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Lifecycle ==
    /// Returns the current lifecycle state.
    pub fn state(&self) -> StoreState {
        *self.state.borrow()
    }

    /// Returns true once teardown has completed.
    pub fn is_destroyed(&self) -> bool {
        self.state() == StoreState::Destroyed
    }

    /// Destroys the store before its lifetime elapses.
    ///
    /// Idempotent; teardown happens on the lifecycle task, see
    /// [`destroyed`](Self::destroyed).
    pub fn shutdown(&self) {
        self.shared.cancel.cancel();
    }

    /// Waits until teardown has completed, including the destroy callback.
    pub async fn destroyed(&self) {
        let mut state = self.state.clone();
        // An Err means the lifecycle task is gone, which is also terminal.
        let _ = state
            .wait_for(|state| *state == StoreState::Destroyed)
            .await;
    }
}

impl<T> Clone for OnceCache<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            state: self.state.clone(),
        }
    }
}

impl<T> fmt::Debug for OnceCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceCache")
            .field("state", &*self.state.borrow())
            .field("default_key_ttl", &self.shared.default_key_ttl)
            .finish()
    }
}
