//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │      User       │ 1 │      Store      │                              │
//! │  │  ─────────────  │───│  ─────────────  │                              │
//! │  │  id (integer)   │ n │  id (UUID)      │                              │
//! │  │  email (unique) │   │  manager (FK)   │                              │
//! │  │  role           │   └────────┬────────┘                              │
//! │  └─────────────────┘            │ 1                                     │
//! │                                 │ n                                     │
//! │  ┌─────────────────┐   ┌────────┴────────┐                              │
//! │  │    Category     │ n │     Product     │                              │
//! │  │  ─────────────  │───│  ─────────────  │                              │
//! │  │  id (integer)   │ n │  id (integer)   │                              │
//! │  │  name           │   │  price (Price)  │                              │
//! │  └─────────────────┘   │  store (FK)     │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Cascade: User ──delete──► Stores ──delete──► Products                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Types vs. Inputs vs. Drafts
//! - Read types (`User`, `Store`, ...) are what the API returns.
//! - Inputs (`UserInput`, ...) are raw request bodies; every field is optional.
//! - Drafts (`UserDraft`, ...) are validated inputs ready to be written.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Price, PriceInput};

// =============================================================================
// Role
// =============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Manager, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::User => "user",
        }
    }

    /// Parses the wire form (`"manager"` / `"user"`).
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account. The password hash never leaves the database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub role: Option<Role>,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
}

/// Raw user request body.
///
/// `role` stays a string here so an unknown role becomes a field error
/// rather than a body rejection. Absent means "leave as is", `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct UserInput {
    #[ts(optional)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[ts(optional)]
    pub role: Option<Option<String>>,
    #[ts(optional)]
    pub is_staff: Option<bool>,
    #[ts(optional)]
    pub is_active: Option<bool>,
    #[ts(optional)]
    pub password: Option<String>,
}

/// Validated user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub role: Option<Role>,
    pub is_staff: bool,
    pub is_active: bool,
    /// Plain-text password to hash, when the request carried one.
    pub password: Option<String>,
}

/// Marks a field that was present in the body, even as `null`.
///
/// Paired with `#[serde(default)]` so a missing field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Store
// =============================================================================

/// A store owned by one manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Store {
    /// UUID v4 in hyphenated form.
    pub id: String,
    pub name: String,
    pub locations: String,
    /// Id of the managing user.
    pub manager: i64,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct StoreInput {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub locations: Option<String>,
    #[ts(optional)]
    pub manager: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDraft {
    pub name: String,
    pub locations: String,
    pub manager: i64,
}

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInput {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product with its categories resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[ts(type = "string")]
    pub price: Price,
    pub quantity_in_stock: i64,
    pub availability_status: bool,
    pub categories: Vec<Category>,
    /// Id of the owning store.
    pub store: String,
}

/// Raw product request body. `categories` carries category ids.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub description: Option<String>,
    #[ts(type = "string | number | null")]
    pub price: Option<PriceInput>,
    #[ts(optional)]
    pub quantity_in_stock: Option<i64>,
    #[ts(optional)]
    pub availability_status: Option<bool>,
    #[ts(optional)]
    pub categories: Option<Vec<i64>>,
    #[ts(optional)]
    pub store: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity_in_stock: i64,
    pub availability_status: bool,
    /// Category ids, deduplicated, in request order.
    pub categories: Vec<i64>,
    pub store: String,
}

// =============================================================================
// Write Mode
// =============================================================================

/// How a request body maps onto an entity.
///
/// ```text
/// Create   POST    required fields must be present, others take defaults
/// Replace  PUT     required fields must be present, others keep stored values
/// Partial  PATCH   nothing required, absent fields keep stored values
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Replace,
    Partial,
}

impl WriteMode {
    /// Whether required fields must be present in the body.
    pub fn requires_all(&self) -> bool {
        !matches!(self, WriteMode::Partial)
    }
}

// =============================================================================
// Notification
// =============================================================================

/// Message pushed to websocket subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl Notification {
    /// The announcement fired after every successful user creation.
    pub fn new_user() -> Self {
        Notification {
            kind: "new_user".to_string(),
            message: "New user has been created!".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::from_name("manager"), Some(Role::Manager));
        assert_eq!(Role::from_name("user"), Some(Role::User));
        assert_eq!(Role::from_name("admin"), None);
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
    }

    #[test]
    fn test_user_serializes_without_password() {
        let user = User {
            id: 7,
            role: Some(Role::User),
            email: "a@b.com".to_string(),
            is_staff: false,
            is_active: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["role"], "user");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_user_input_tells_null_role_from_missing() {
        let missing: UserInput = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(missing.role, None);

        let null: UserInput = serde_json::from_str(r#"{"role": null}"#).unwrap();
        assert_eq!(null.role, Some(None));

        let set: UserInput = serde_json::from_str(r#"{"role": "user"}"#).unwrap();
        assert_eq!(set.role, Some(Some("user".to_string())));
    }

    #[test]
    fn test_new_user_notification_shape() {
        let json = serde_json::to_value(Notification::new_user()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "new_user", "message": "New user has been created!"})
        );
    }

    #[test]
    fn test_product_price_serializes_as_string() {
        let product = Product {
            id: 1,
            name: "Tea".to_string(),
            description: "Green".to_string(),
            price: Price::from_cents(350),
            quantity_in_stock: 4,
            availability_status: true,
            categories: vec![],
            store: "0f6b3c52-8f43-4a8c-9a0c-3f1d2b7e9a10".to_string(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], "3.50");
        assert_eq!(json["categories"], serde_json::json!([]));
    }

    #[test]
    fn test_write_mode_requirements() {
        assert!(WriteMode::Create.requires_all());
        assert!(WriteMode::Replace.requires_all());
        assert!(!WriteMode::Partial.requires_all());
    }
}
