//! Product API Handlers
//!
//! Every response embeds the product's resolved categories:
//!
//! ```json
//! {
//!   "id": 3,
//!   "name": "Green Tea",
//!   "price": "4.50",
//!   "categories": [{ "id": 1, "name": "Tea", "description": "Leaves" }],
//!   "store": "550e8400-e29b-41d4-a716-446655440000",
//!   ...
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use tracing::info;

use storefront_core::validation::validate_product;
use storefront_core::{FieldErrors, Product, ProductDraft, ProductInput, ValidationError, WriteMode};

use crate::error::{ApiError, ApiResult};
use crate::routes::{parse_id, update_mode};
use crate::AppState;

const NOT_FOUND: &str = "Product not found";

/// The store and every category must exist; all misses are reported together.
async fn check_references(state: &AppState, draft: &ProductDraft) -> ApiResult<()> {
    let mut errors = FieldErrors::new();

    if !state.db.stores().exists(&draft.store).await? {
        errors.push(ValidationError::unknown_reference("store", &draft.store));
    }

    for id in state.db.categories().missing_ids(&draft.categories).await? {
        errors.push(ValidationError::unknown_reference("categories", id));
    }

    errors.into_result()?;
    Ok(())
}

/// GET /api/v1/product - list all products
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

/// GET /api/v1/product/{id} - retrieve one product
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, NOT_FOUND)?;
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(product))
}

/// POST /api/v1/product/create - create a product
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = body?;
    let draft = validate_product(&input, WriteMode::Create, None)?;
    check_references(&state, &draft).await?;

    let product = state.db.products().insert(&draft).await?;

    info!(id = %product.id, store = %product.store, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT|PATCH /api/v1/product/update/{id} - replace or patch a product
///
/// `categories` replaces the whole set when present; `[]` clears it.
pub async fn update(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, NOT_FOUND)?;

    let existing = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let Json(input) = body?;

    let draft = validate_product(&input, update_mode(&method), Some(&existing))?;
    check_references(&state, &draft).await?;

    let product = state.db.products().update(id, &draft).await?;

    info!(id = %product.id, categories = product.categories.len(), "Product updated");
    Ok(Json(product))
}

/// DELETE /api/v1/product/delete/{id} - delete a product
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.db.products().delete(id).await?;

    info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
