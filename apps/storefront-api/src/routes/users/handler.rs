//! User API Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use tracing::{debug, info};

use storefront_core::validation::validate_user;
use storefront_core::{
    Notification, User, UserInput, ValidationError, WriteMode, USER_NOTIFICATIONS_TOPIC,
};
use storefront_db::DbError;

use crate::error::{ApiError, ApiResult};
use crate::password::{hash_or_unusable, hash_password};
use crate::routes::{parse_id, update_mode};
use crate::AppState;

const NOT_FOUND: &str = "User not found";

/// GET /api/v1/user - list all users
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.db.users().list().await?))
}

/// GET /api/v1/user/{id} - retrieve one user
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id, NOT_FOUND)?;
    let user = state
        .db
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(user))
}

/// POST /api/v1/user/create - create a user and announce it
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(input) = body?;
    let draft = validate_user(&input, WriteMode::Create, None)?;

    if state.db.users().email_taken(&draft.email, None).await? {
        return Err(ValidationError::duplicate("email", &draft.email).into());
    }

    let password_hash = hash_or_unusable(draft.password.as_deref())?;
    let user = state
        .db
        .users()
        .insert(&draft, &password_hash)
        .await
        .map_err(|e| email_conflict(e, &draft.email))?;

    info!(id = %user.id, email = %user.email, "User created");

    let delivered = state
        .bus
        .publish(USER_NOTIFICATIONS_TOPIC, Notification::new_user())
        .await;
    debug!(delivered, "new_user notification sent");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT|PATCH /api/v1/user/update/{id} - replace or patch a user
pub async fn update(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id, NOT_FOUND)?;

    let existing = state
        .db
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    // An unknown id wins over a bad body
    let Json(input) = body?;

    let draft = validate_user(&input, update_mode(&method), Some(&existing))?;

    if state.db.users().email_taken(&draft.email, Some(id)).await? {
        return Err(ValidationError::duplicate("email", &draft.email).into());
    }

    let password_hash = draft.password.as_deref().map(hash_password).transpose()?;
    let user = state
        .db
        .users()
        .update(id, &draft, password_hash.as_deref())
        .await
        .map_err(|e| email_conflict(e, &draft.email))?;

    info!(id = %user.id, "User updated");
    Ok(Json(user))
}

/// DELETE /api/v1/user/delete/{id} - delete a user and everything they manage
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.db.users().delete(id).await?;

    info!(id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// A unique violation that slipped past the pre-check still names the email.
fn email_conflict(err: DbError, email: &str) -> ApiError {
    match err {
        DbError::UniqueViolation { field, .. } => ValidationError::duplicate(&field, email).into(),
        other => other.into(),
    }
}
