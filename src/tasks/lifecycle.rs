//! Cache Lifecycle Task
//!
//! Background tasks bound to a single cache: the lifecycle task, which
//! enforces the total lifetime and tears the cache down, and the optional
//! sweeper, which periodically removes expired items while the cache lives.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::{OnceCacheOptions, Shared, StoreState};

/// Spawns the lifecycle task of a cache.
///
/// The task publishes `Alive`, starts the sweeper when a sweep interval is
/// configured and then waits for the lifetime deadline or `cancel`. Teardown
/// runs in order: stop the sweeper and wait for it, destroy the store, run the
/// destroy callback, publish `Destroyed`. A panicking callback is logged and
/// does not prevent `Destroyed` from being published.
///
/// The deadline is measured from this call, not from the first poll.
pub(crate) fn spawn_lifecycle<T>(
    shared: Weak<Shared<T>>,
    options: OnceCacheOptions,
    cancel: CancellationToken,
    state: watch::Sender<StoreState>,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    let deadline = options
        .bounded_lifetime()
        .and_then(|lifetime| Instant::now().checked_add(lifetime));
    let sweep_period = options.sweep_period();
    let lifetime = options.lifetime;
    let on_destroy = options.on_destroy;

    tokio::spawn(async move {
        state.send_replace(StoreState::Alive);
        info!(?lifetime, ?sweep_period, "Once cache alive");

        let sweeper =
            sweep_period.map(|period| spawn_sweeper(shared.clone(), period, cancel.clone()));

        match deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(deadline) => {
                        info!("Once cache lifetime elapsed");
                    }
                    _ = cancel.cancelled() => {
                        info!("Once cache cancelled before its deadline");
                    }
                }
            }
            None => {
                cancel.cancelled().await;
                info!("Once cache cancelled");
            }
        }

        // Stop the sweeper and wait until no sweep is in flight.
        cancel.cancel();
        if let Some(handle) = sweeper {
            if let Err(e) = handle.await {
                warn!("Sweeper task ended abnormally: {}", e);
            }
        }

        if let Some(shared) = shared.upgrade() {
            let dropped = shared.destroy().await;
            info!("Once cache destroyed, dropped {} entries", dropped);
        } else {
            debug!("Once cache released by all handles before teardown");
        }

        // `Destroyed` must be published even when the callback panics.
        if let Some(on_destroy) = on_destroy {
            if panic::catch_unwind(AssertUnwindSafe(on_destroy)).is_err() {
                warn!("Once cache destroy callback panicked");
            }
        }

        state.send_replace(StoreState::Destroyed);
    })
}

/// Spawns a task sweeping expired items every `period` until cancelled.
///
/// The first sweep runs one period after start. The task also stops once the
/// store has been released by all handles.
fn spawn_sweeper<T>(
    shared: Weak<Shared<T>>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        debug!("Starting sweeper with interval of {:?}", period);

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let Some(shared) = shared.upgrade() else {
                        break;
                    };
                    let removed = shared.sweep().await;

                    if removed > 0 {
                        info!("Sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Sweep: no expired entries found");
                    }
                }
            }
        }

        debug!("Sweeper stopped");
    })
}
