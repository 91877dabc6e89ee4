//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, state wiring and the Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::RedirectRepository;
use crate::infrastructure::persistence::{MemoryRedirectRepository, RedisRedirectRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the configured redirect store.
///
/// # Errors
///
/// Returns an error if the Redis backend is selected and cannot be reached.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn RedirectRepository>> {
    let repository: Arc<dyn RedirectRepository> = match config.store_backend {
        StoreBackend::Redis => Arc::new(
            RedisRedirectRepository::connect(&config.redis_url)
                .await
                .context("Failed to connect to Redis")?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; redirects are lost on restart");
            Arc::new(MemoryRedirectRepository::new())
        }
    };

    tracing::info!(backend = %config.store_backend, "Store ready");
    Ok(repository)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes the store, the Axum router and serves until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if:
/// - The store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = connect_store(&config).await?;

    let state = AppState::new(repository, config.public_url.clone());

    let app = app_router(state, &config.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
