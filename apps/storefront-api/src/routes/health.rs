//! Health check route.
//!
//! ```json
//! { "status": "ok", "database": true, "migrations": { "total": 1, "applied": 1 } }
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    database: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<MigrationsInfo>,
}

#[derive(Debug, Serialize)]
pub struct MigrationsInfo {
    total: usize,
    applied: usize,
}

/// GET /health - liveness plus a database round trip
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await;
    let migrations = match state.db.migration_status().await {
        Ok(status) if database => Some(MigrationsInfo {
            total: status.total,
            applied: status.applied,
        }),
        _ => None,
    };

    let healthy = database && migrations.as_ref().is_some_and(|m| m.applied >= m.total);
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database,
            migrations,
        }),
    )
}
