//! # Storefront API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup:  tracing → ApiConfig::load → Database::new (migrations)       │
//! │            → AppState → axum::serve                                     │
//! │  shutdown: Ctrl+C / SIGTERM → drain connections → close pool            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_api::{build_router, ApiConfig, AppState};
use storefront_db::{Database, DbConfig};

const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Storefront API server...");

    // Load configuration
    let config = ApiConfig::load().context("invalid configuration")?;
    info!(
        addr = %config.bind_address(),
        db_path = %config.database_path.display(),
        "Configuration loaded"
    );

    // Open database (runs migrations)
    let db_config = DbConfig::new(&config.database_path)
        .max_connections(config.db_max_connections)
        .connect_timeout(config.db_connect_timeout());
    let db = Database::new(db_config)
        .await
        .context("failed to open database")?;

    let addr = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
