//! Product API - a REST backend for products and users
//!
//! Serves CRUD endpoints with a read-through response cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_api::{
    create_router, spawn_cleanup_task, AppState, Config, KvStore, MemoryStore, RedisStore,
};

/// Main entry point for the API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache store (Redis, or in-memory fallback)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, redis={}, cache_expiration={}s",
        config.server_port,
        config.redis_url.as_deref().unwrap_or("<in-memory>"),
        config.cache_expiration
    );

    let (store, cleanup_handle) = connect_store(&config).await;

    let state = AppState::from_config(&config, store);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Picks the cache store for this process.
///
/// Uses Redis when `REDIS_URL` is set and reachable. Otherwise falls back to
/// the in-memory store and starts its expiry sweep.
async fn connect_store(config: &Config) -> (Arc<dyn KvStore>, Option<JoinHandle<()>>) {
    if let Some(url) = &config.redis_url {
        match RedisStore::connect(url).await {
            Ok(store) => return (Arc::new(store), None),
            Err(err) => warn!(
                "Redis unavailable ({}), falling back to in-memory cache store",
                err
            ),
        }
    }

    let store = Arc::new(MemoryStore::new());
    let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
    info!("In-memory cache store initialized");
    (store, Some(handle))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
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
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
