//! # storefront-core: Pure Domain Logic for Storefront
//!
//! This crate holds the domain model of the Storefront backend: entity
//! types, request bodies, price handling and input validation. It has zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                HTTP / WebSocket clients                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                storefront-api (axum)                            │   │
//! │  │    /api/v1/user, /store, /category, /product, /ws/notifications │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  User     │  │   Price   │  │   rules   │                  │   │
//! │  │   │  Product  │  │           │  │   drafts  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Store, Category, Product, Notification)
//! - [`money`] - Fixed-point `Price` (no floating point)
//! - [`error`] - Domain error types and per-field error maps
//! - [`validation`] - Request body validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::validation::validate_product;
//! use storefront_core::{PriceInput, ProductInput, WriteMode};
//!
//! let input = ProductInput {
//!     name: Some("Green Tea".to_string()),
//!     description: Some("Sencha".to_string()),
//!     price: Some(PriceInput::Text("4.5".to_string())),
//!     quantity_in_stock: Some(10),
//!     store: Some("550e8400-e29b-41d4-a716-446655440000".to_string()),
//!     ..ProductInput::default()
//! };
//!
//! let draft = validate_product(&input, WriteMode::Create, None).unwrap();
//! assert_eq!(draft.price.to_string(), "4.50");
//! assert!(draft.availability_status);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use money::{Price, PriceInput};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of store, category and product names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a store's `locations` text.
pub const MAX_LOCATIONS_LENGTH: usize = 255;

/// Maximum length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Largest accepted `quantity_in_stock` (fits a 32-bit INTEGER column).
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

/// Broadcast topic that user-creation announcements are published on.
pub const USER_NOTIFICATIONS_TOPIC: &str = "user_notifications";
