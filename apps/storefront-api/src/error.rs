//! # API Error Types
//!
//! What HTTP clients see when a request fails.
//!
//! ## Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                          ApiError        HTTP                   │
//! │  ─────────────────────────────   ────────────    ──────────────────────│
//! │  FieldErrors / ValidationError   Validation      400 {field: [msgs]}    │
//! │  malformed JSON body             Validation      400 {body: [msg]}      │
//! │  DbError::NotFound / bad path id NotFound        404 {"message": ...}   │
//! │  DbError::UniqueViolation        Validation      400 {field: [msg]}     │
//! │  anything else                   Unhandled       400 {"message": ...}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! NotFound is logged at warn, Unhandled at error, both before responding.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use storefront_core::{CoreError, FieldErrors, ValidationError};
use storefront_db::DbError;

/// Storefront API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Carries the fixed per-entity message (e.g. "Store not found").
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unhandled(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Unhandled(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Conversions
// =============================================================================

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.into())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::Validation(errors),
            other => ApiError::Unhandled(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::NotFound(format!("{entity} not found")),
            DbError::UniqueViolation { field, value } => {
                ApiError::from(ValidationError::duplicate(&field, value))
            }
            other => ApiError::Unhandled(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::from(ValidationError::InvalidFormat {
            field: "body".to_string(),
            reason: rejection.body_text(),
        })
    }
}

// =============================================================================
// Response
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::NotFound(message) => {
                warn!(%message, "Resource not found");
                (status, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Unhandled(message) => {
                error!(%message, "Request failed");
                (status, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_uses_entity_message() {
        let err = ApiError::from(DbError::not_found("Store", "abc"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Store not found");
    }

    #[test]
    fn test_unique_violation_is_validation() {
        let err = ApiError::from(DbError::duplicate("email", "a@b.com"));
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(
                    errors.get("email"),
                    Some(&["email 'a@b.com' already exists".to_string()][..])
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_other_db_errors_are_bad_request() {
        let err = ApiError::from(DbError::QueryFailed("CHECK constraint failed".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::Unhandled(_)));
    }
}
