//! Category API Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use tracing::info;

use storefront_core::validation::validate_category;
use storefront_core::{Category, CategoryInput, WriteMode};

use crate::error::{ApiError, ApiResult};
use crate::routes::{parse_id, update_mode};
use crate::AppState;

const NOT_FOUND: &str = "Category not found";

/// GET /api/v1/category - list all categories
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

/// POST /api/v1/category/create - create a category
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = body?;
    let draft = validate_category(&input, WriteMode::Create, None)?;

    let category = state.db.categories().insert(&draft).await?;

    info!(id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT|PATCH /api/v1/category/update/{id} - replace or patch a category
pub async fn update(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id, NOT_FOUND)?;

    let existing = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let Json(input) = body?;

    let draft = validate_category(&input, update_mode(&method), Some(&existing))?;
    let category = state.db.categories().update(id, &draft).await?;

    info!(id = %category.id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/category/delete/{id} - delete a category (products keep existing)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.db.categories().delete(id).await?;

    info!(id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
