//! Once Cache - HTTP server
//!
//! Serves a single once cache over HTTP until the cache is destroyed or the
//! process receives a shutdown signal.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use once_cache::api::create_router;
use once_cache::{AppState, Config, OnceCache};

/// Main entry point for the once cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache; its destroy callback stops the server
/// 4. Create Axum router with all endpoints
/// 5. Serve until the cache is destroyed or SIGINT/SIGTERM arrives
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "once_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Once Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: lifetime={}ms, default_key_ttl={}ms, sweep_interval={}ms, port={}",
        config.lifetime_ms, config.default_key_ttl_ms, config.sweep_interval_ms, config.server_port
    );

    let destroyed = Arc::new(Notify::new());
    let notify = destroyed.clone();
    let options = config
        .cache_options()
        .on_destroy(move || notify.notify_one());

    let state = AppState::from_options(options);
    let cache = state.cache.clone();
    info!("Cache initialized");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cache, destroyed))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for the cache to be destroyed or for Ctrl+C / SIGTERM.
///
/// On a signal the cache is shut down first and its teardown awaited.
async fn shutdown_signal(cache: OnceCache<String>, destroyed: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
        _ = destroyed.notified() => {
            info!("Cache lifetime ended, stopping server");
            return;
        }
    }

    cache.shutdown();
    cache.destroyed().await;
    info!("Cache destroyed on shutdown");
}
