//! Integration Tests for the once cache lifecycle
//!
//! Exercises the public library API with real and paused clocks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cache::{CacheError, OnceCache, OnceCacheOptions, StoreState};
use tokio::time::sleep;

#[tokio::test]
async fn test_sweep_scenario_real_clock() {
    let cache = OnceCache::new(
        OnceCacheOptions::new()
            .lifetime(Duration::from_secs(1))
            .default_key_ttl(Duration::ZERO)
            .sweep_interval(Duration::from_millis(100)),
    );

    cache
        .set_expire("a", 1, Duration::from_millis(50))
        .await
        .unwrap();
    cache.set("b", 2).await.unwrap();

    sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get("a").await.unwrap(), None);
    assert_eq!(cache.get("b").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_destruction_fires_callback_once() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let cache: OnceCache<&'static str> = OnceCache::new(
        OnceCacheOptions::new()
            .lifetime(Duration::from_millis(50))
            .sweep_interval(Duration::from_millis(10))
            .on_destroy(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
    );
    cache.set("k", "v").await.unwrap();

    sleep(Duration::from_millis(100)).await;

    assert_eq!(cache.state(), StoreState::Destroyed);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(cache.get("k").await, Err(CacheError::Closed));
}

#[tokio::test(start_paused = true)]
async fn test_entries_live_until_deadline() {
    let cache = OnceCache::with_lifetime(Duration::from_secs(10));
    cache.set("k", 1u8).await.unwrap();

    sleep(Duration::from_millis(9_900)).await;
    assert_eq!(cache.get("k").await.unwrap(), Some(1));

    sleep(Duration::from_millis(200)).await;
    assert!(cache.is_destroyed());
    assert_eq!(cache.get("k").await, Err(CacheError::Closed));
}

#[tokio::test(start_paused = true)]
async fn test_zero_sweep_interval_never_removes() {
    let cache = OnceCache::new(OnceCacheOptions::new().default_key_ttl(Duration::from_millis(1)));
    cache.set("k", 1u8).await.unwrap();

    sleep(Duration::from_secs(60)).await;

    assert_eq!(cache.get("k").await.unwrap(), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_and_readers() {
    let cache = OnceCache::new(
        OnceCacheOptions::new()
            .lifetime(Duration::from_secs(30))
            .sweep_interval(Duration::from_millis(1)),
    );

    let mut handles = Vec::new();
    for worker in 0..8u32 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..200u32 {
                let key = format!("{}-{}", worker, i % 10);
                cache.set(key.clone(), i).await.unwrap();
                let seen = cache.get(&key).await.unwrap();
                assert!(seen.is_some());
                if i % 7 == 0 {
                    cache.del(&key).await.unwrap();
                }
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert!(cache.len().await <= 80);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_get_or_set_func_many_callers_one_producer() {
    let cache: OnceCache<String> = OnceCache::with_lifetime(Duration::from_secs(30));
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for i in 0..32 {
        let cache = cache.clone();
        let calls = calls.clone();
        handles.push(tokio::spawn(async move {
            cache
                .get_or_set_func("report", move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    format!("computed by {}", i)
                })
                .await
                .unwrap()
        }));
    }

    let mut values = Vec::new();
    for handle in handles {
        values.push(handle.await.unwrap());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(values.iter().all(|v| v == &values[0]));
}
