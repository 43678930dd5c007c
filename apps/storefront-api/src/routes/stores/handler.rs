//! Store API Handlers
//!
//! Store ids are UUIDs. A path id that is not a UUID cannot name a store and
//! is answered like any other unknown id.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use tracing::info;

use storefront_core::validation::{validate_store, validate_uuid};
use storefront_core::{Store, StoreDraft, StoreInput, ValidationError, WriteMode};

use crate::error::{ApiError, ApiResult};
use crate::routes::update_mode;
use crate::AppState;

const NOT_FOUND: &str = "Store not found";

/// Canonical store id from a path segment.
fn store_id(raw: &str) -> ApiResult<String> {
    validate_uuid("id", raw).map_err(|_| ApiError::not_found(NOT_FOUND))
}

/// The manager must be an existing user.
async fn check_manager(state: &AppState, draft: &StoreDraft) -> ApiResult<()> {
    if !state.db.users().exists(draft.manager).await? {
        return Err(ValidationError::unknown_reference("manager", draft.manager).into());
    }
    Ok(())
}

/// GET /api/v1/store - list all stores
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Store>>> {
    Ok(Json(state.db.stores().list().await?))
}

/// GET /api/v1/store/{id} - retrieve one store
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Store>> {
    let id = store_id(&id)?;
    let store = state
        .db
        .stores()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(store))
}

/// POST /api/v1/store/create - create a store
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<StoreInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Store>)> {
    let Json(input) = body?;
    let draft = validate_store(&input, WriteMode::Create, None)?;
    check_manager(&state, &draft).await?;

    let store = state.db.stores().insert(&draft).await?;

    info!(id = %store.id, manager = %store.manager, "Store created");
    Ok((StatusCode::CREATED, Json(store)))
}

/// PUT|PATCH /api/v1/store/update/{id} - replace or patch a store
pub async fn update(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    body: Result<Json<StoreInput>, JsonRejection>,
) -> ApiResult<Json<Store>> {
    let id = store_id(&id)?;

    let existing = state
        .db
        .stores()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let Json(input) = body?;

    let draft = validate_store(&input, update_mode(&method), Some(&existing))?;
    check_manager(&state, &draft).await?;

    let store = state.db.stores().update(&id, &draft).await?;

    info!(id = %store.id, "Store updated");
    Ok(Json(store))
}

/// DELETE /api/v1/store/delete/{id} - delete a store and its products
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = store_id(&id)?;
    state.db.stores().delete(&id).await?;

    info!(id = %id, "Store deleted");
    Ok(StatusCode::NO_CONTENT)
}
