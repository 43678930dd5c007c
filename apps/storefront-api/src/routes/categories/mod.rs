//! Category API module

mod handler;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/v1/category", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/create", post(handler::create))
        .route("/update/{id}", put(handler::update).patch(handler::update))
        .route("/delete/{id}", delete(handler::delete))
}
