//! # Storefront API
//!
//! REST + WebSocket server for users, stores, categories and products.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront API                                  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes::users │  │ routes::stores │  │  routes::categories        ││
//! │  │                │  │                │  │  routes::products          ││
//! │  │ • list/get     │  │ • list/get     │  │                            ││
//! │  │ • create ──────┼──┼────────────────┼──┼──► EventBus.publish        ││
//! │  │ • update/delete│  │ • update/delete│  │ • list/get/update/delete   ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Shared state (AppState)                      │  │
//! │  │                                                                   │  │
//! │  │  ┌──────────────┐  ┌──────────────────┐  ┌─────────────────────┐ │  │
//! │  │  │  Database    │  │  EventBus        │  │  ApiConfig          │ │  │
//! │  │  │  (SQLite)    │  │  /ws/notifications/ │  (env vars)        │ │  │
//! │  │  └──────────────┘  └──────────────────┘  └─────────────────────┘ │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_HOST` / `HTTP_PORT` - Listen address (default: 0.0.0.0:8000)
//! - `DATABASE_PATH` - SQLite file (default: ./storefront.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Seconds to wait for a pooled connection (default: 30)
//! - `NOTIFY_BUFFER` - Per-subscriber notification buffer (default: 64)

pub mod config;
pub mod error;
pub mod notify;
pub mod password;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use storefront_db::Database;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use notify::EventBus;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub bus: EventBus,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            bus: EventBus::new(config.notify_buffer),
            config: Arc::new(config),
        }
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .route("/ws/notifications/", get(notify::ws::notifications))
        .with_state(state)
}
