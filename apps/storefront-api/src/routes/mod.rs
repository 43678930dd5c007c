//! HTTP routes.
//!
//! | Resource  | List               | Retrieve               | Create                        | Update (PUT/PATCH)                   | Delete                               |
//! |-----------|--------------------|------------------------|-------------------------------|--------------------------------------|--------------------------------------|
//! | user      | GET /api/v1/user   | GET /api/v1/user/{id}  | POST /api/v1/user/create      | /api/v1/user/update/{id}             | DELETE /api/v1/user/delete/{id}      |
//! | store     | GET /api/v1/store  | GET /api/v1/store/{id} | POST /api/v1/store/create     | /api/v1/store/update/{id}            | DELETE /api/v1/store/delete/{id}     |
//! | category  | GET /api/v1/category | -                    | POST /api/v1/category/create  | /api/v1/category/update/{id}         | DELETE /api/v1/category/delete/{id}  |
//! | product   | GET /api/v1/product | GET /api/v1/product/{id} | POST /api/v1/product/create | /api/v1/product/update/{id}          | DELETE /api/v1/product/delete/{id}   |
//!
//! PUT replaces, PATCH applies only the fields present in the body.

mod categories;
mod health;
mod products;
mod stores;
mod users;

use axum::http::Method;
use axum::Router;

use storefront_core::WriteMode;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// All REST routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(stores::router())
        .merge(categories::router())
        .merge(products::router())
}

/// Parses an integer path id; anything else names no resource.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::not_found(not_found))
}

/// PUT replaces the whole entity, PATCH only what the body carries.
pub(crate) fn update_mode(method: &Method) -> WriteMode {
    if method == Method::PATCH {
        WriteMode::Partial
    } else {
        WriteMode::Replace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "User not found").unwrap(), 42);
        let err = parse_id("abc", "User not found").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "User not found"));
    }

    #[test]
    fn test_update_mode() {
        assert_eq!(update_mode(&Method::PUT), WriteMode::Replace);
        assert_eq!(update_mode(&Method::PATCH), WriteMode::Partial);
    }
}
