//! # Validation Module
//!
//! Input validation for Storefront request bodies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler                                                 │
//! │  └── Body must be JSON with the right field types                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure, no I/O)                                   │
//! │  ├── Required fields, lengths, formats                                 │
//! │  └── Returns every failure at once as FieldErrors                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reference checks (API layer, needs the database)             │
//! │  ├── Email uniqueness                                                  │
//! │  └── manager / store / category ids exist                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign keys with ON DELETE CASCADE                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::validate_category;
//! use storefront_core::{CategoryInput, WriteMode};
//!
//! let input = CategoryInput {
//!     name: Some("Tea".to_string()),
//!     description: Some("Loose leaf".to_string()),
//! };
//! let draft = validate_category(&input, WriteMode::Create, None).unwrap();
//! assert_eq!(draft.name, "Tea");
//! ```

use crate::error::{FieldErrors, ValidationError};
use crate::money::Price;
use crate::types::{
    Category, CategoryDraft, CategoryInput, Product, ProductDraft, ProductInput, Role, Store,
    StoreDraft, StoreInput, User, UserDraft, UserInput, WriteMode,
};
use crate::{MAX_EMAIL_LENGTH, MAX_LOCATIONS_LENGTH, MAX_NAME_LENGTH, MAX_QUANTITY};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - Exactly one `@`, non-empty local part, dotted domain, no whitespace
///
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("a@b.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "enter a valid email address".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a required, length-limited text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `max` characters (when given)
pub fn validate_text(field: &str, value: &str, max: Option<usize>) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max,
            });
        }
    }

    Ok(())
}

/// Validates an account role. An empty string means "no role".
pub fn validate_role(role: &str) -> ValidationResult<Option<Role>> {
    let role = role.trim();
    if role.is_empty() {
        return Ok(None);
    }

    Role::from_name(role)
        .map(Some)
        .ok_or_else(|| ValidationError::NotAllowed {
            field: "role".to_string(),
            allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        })
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Price) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative
/// - Must fit a 32-bit column
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity_in_stock".to_string(),
            min: 0,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a UUID string format and returns it in canonical form.
///
/// ```rust
/// use storefront_core::validation::validate_uuid;
///
/// assert!(validate_uuid("store", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("store", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<String> {
    if id.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    let parsed = uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(parsed.hyphenated().to_string())
}

/// Picks the request value, the stored value, or reports a missing field.
///
/// ```text
/// body has value            → body value
/// Partial and stored value  → stored value
/// otherwise                 → Required error
/// ```
fn pick<T: Clone>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<T>,
    stored: Option<T>,
    mode: WriteMode,
) -> Option<T> {
    if value.is_some() {
        return value;
    }

    if !mode.requires_all() && stored.is_some() {
        return stored;
    }

    errors.push(ValidationError::required(field));
    None
}

/// Picks an optional field: body value, else stored value (update), else default.
fn pick_or<T>(value: Option<T>, stored: Option<T>, default: T) -> T {
    value.or(stored).unwrap_or(default)
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a user body.
///
/// `existing` is the stored user for `Replace` / `Partial`; absent fields that
/// are not required fall back to it, or to the defaults
/// (`is_staff = false`, `is_active = true`, no role) on create.
///
/// Email uniqueness needs the database and is checked by the caller.
pub fn validate_user(
    input: &UserInput,
    mode: WriteMode,
    existing: Option<&User>,
) -> Result<UserDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = pick(
        &mut errors,
        "email",
        input.email.clone(),
        existing.map(|u| u.email.clone()),
        mode,
    )
    .and_then(|email| {
        errors
            .collect(validate_email(&email))
            .map(|_| email.trim().to_string())
    });

    let role = match &input.role {
        Some(Some(role)) => errors.collect(validate_role(role)).flatten(),
        Some(None) => None,
        None => existing.and_then(|u| u.role),
    };

    if let Some(password) = &input.password {
        errors.collect(validate_text("password", password, Some(128)));
    }

    errors.into_result()?;

    Ok(UserDraft {
        email: email.unwrap_or_default(),
        role,
        is_staff: pick_or(input.is_staff, existing.map(|u| u.is_staff), false),
        is_active: pick_or(input.is_active, existing.map(|u| u.is_active), true),
        password: input.password.clone(),
    })
}

/// Validates a store body. Whether `manager` exists is checked by the caller.
pub fn validate_store(
    input: &StoreInput,
    mode: WriteMode,
    existing: Option<&Store>,
) -> Result<StoreDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = pick(
        &mut errors,
        "name",
        input.name.clone(),
        existing.map(|s| s.name.clone()),
        mode,
    )
    .and_then(|name| {
        errors
            .collect(validate_text("name", &name, Some(MAX_NAME_LENGTH)))
            .map(|_| name)
    });

    let locations = pick(
        &mut errors,
        "locations",
        input.locations.clone(),
        existing.map(|s| s.locations.clone()),
        mode,
    )
    .and_then(|locations| {
        errors
            .collect(validate_text(
                "locations",
                &locations,
                Some(MAX_LOCATIONS_LENGTH),
            ))
            .map(|_| locations)
    });

    let manager = pick(
        &mut errors,
        "manager",
        input.manager,
        existing.map(|s| s.manager),
        mode,
    );

    errors.into_result()?;

    Ok(StoreDraft {
        name: name.unwrap_or_default(),
        locations: locations.unwrap_or_default(),
        manager: manager.unwrap_or_default(),
    })
}

/// Validates a category body.
pub fn validate_category(
    input: &CategoryInput,
    mode: WriteMode,
    existing: Option<&Category>,
) -> Result<CategoryDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = pick(
        &mut errors,
        "name",
        input.name.clone(),
        existing.map(|c| c.name.clone()),
        mode,
    )
    .and_then(|name| {
        errors
            .collect(validate_text("name", &name, Some(MAX_NAME_LENGTH)))
            .map(|_| name)
    });

    let description = pick(
        &mut errors,
        "description",
        input.description.clone(),
        existing.map(|c| c.description.clone()),
        mode,
    )
    .and_then(|description| {
        errors
            .collect(validate_text("description", &description, None))
            .map(|_| description)
    });

    errors.into_result()?;

    Ok(CategoryDraft {
        name: name.unwrap_or_default(),
        description: description.unwrap_or_default(),
    })
}

/// Validates a product body.
///
/// `categories` is optional in every mode: absent means "none" on create and
/// "unchanged" on update; an empty list clears them. Whether the store and
/// categories exist is checked by the caller.
pub fn validate_product(
    input: &ProductInput,
    mode: WriteMode,
    existing: Option<&Product>,
) -> Result<ProductDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = pick(
        &mut errors,
        "name",
        input.name.clone(),
        existing.map(|p| p.name.clone()),
        mode,
    )
    .and_then(|name| {
        errors
            .collect(validate_text("name", &name, Some(MAX_NAME_LENGTH)))
            .map(|_| name)
    });

    let description = pick(
        &mut errors,
        "description",
        input.description.clone(),
        existing.map(|p| p.description.clone()),
        mode,
    )
    .and_then(|description| {
        errors
            .collect(validate_text("description", &description, None))
            .map(|_| description)
    });

    let price = match &input.price {
        Some(raw) => match raw.parse() {
            Ok(price) => errors.collect(validate_price(price)).map(|_| price),
            Err(e) => {
                errors.push(ValidationError::InvalidFormat {
                    field: "price".to_string(),
                    reason: e.to_string(),
                });
                None
            }
        },
        None => pick(&mut errors, "price", None, existing.map(|p| p.price), mode),
    };

    let quantity = pick(
        &mut errors,
        "quantity_in_stock",
        input.quantity_in_stock,
        existing.map(|p| p.quantity_in_stock),
        mode,
    )
    .and_then(|qty| errors.collect(validate_quantity(qty)).map(|_| qty));

    let store = pick(
        &mut errors,
        "store",
        input.store.clone(),
        existing.map(|p| p.store.clone()),
        mode,
    )
    .and_then(|store| errors.collect(validate_uuid("store", &store)));

    let categories = match &input.categories {
        Some(ids) => {
            let mut unique = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(id) {
                    unique.push(*id);
                }
            }
            unique
        }
        None => existing
            .map(|p| p.categories.iter().map(|c| c.id).collect())
            .unwrap_or_default(),
    };

    errors.into_result()?;

    Ok(ProductDraft {
        name: name.unwrap_or_default(),
        description: description.unwrap_or_default(),
        price: price.unwrap_or_default(),
        quantity_in_stock: quantity.unwrap_or_default(),
        availability_status: pick_or(
            input.availability_status,
            existing.map(|p| p.availability_status),
            true,
        ),
        categories,
        store: store.unwrap_or_default(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::PriceInput;

    const STORE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn stored_user() -> User {
        User {
            id: 1,
            role: Some(Role::Manager),
            email: "boss@shop.io".to_string(),
            is_staff: true,
            is_active: true,
        }
    }

    fn product_input() -> ProductInput {
        ProductInput {
            name: Some("Green Tea".to_string()),
            description: Some("Sencha, 100g".to_string()),
            price: Some(PriceInput::Text("4.5".to_string())),
            quantity_in_stock: Some(12),
            availability_status: None,
            categories: Some(vec![3, 1, 3]),
            store: Some(STORE_ID.to_string()),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@@b.com").is_err());
        assert!(validate_email("a b@c.com").is_err());
        assert!(validate_email("a@b..com").is_err());
        assert!(validate_email(&format!("{}@b.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_validate_role() {
        assert_eq!(validate_role("manager").unwrap(), Some(Role::Manager));
        assert_eq!(validate_role("").unwrap(), None);
        assert!(validate_role("admin").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_uuid_canonicalizes() {
        let id = validate_uuid("store", "550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id, STORE_ID);
        assert!(validate_uuid("store", "").is_err());
        assert!(validate_uuid("store", "123").is_err());
    }

    #[test]
    fn test_user_create_defaults() {
        let input = UserInput {
            email: Some(" a@b.com ".to_string()),
            role: Some(Some("user".to_string())),
            ..UserInput::default()
        };
        let draft = validate_user(&input, WriteMode::Create, None).unwrap();
        assert_eq!(draft.email, "a@b.com");
        assert_eq!(draft.role, Some(Role::User));
        assert!(!draft.is_staff);
        assert!(draft.is_active);
        assert_eq!(draft.password, None);
    }

    #[test]
    fn test_user_create_collects_all_errors() {
        let input = UserInput {
            email: None,
            role: Some(Some("owner".to_string())),
            ..UserInput::default()
        };
        let errors = validate_user(&input, WriteMode::Create, None).unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("role").is_some());
    }

    #[test]
    fn test_user_replace_requires_email() {
        let stored = stored_user();
        let input = UserInput {
            is_staff: Some(false),
            ..UserInput::default()
        };
        let errors = validate_user(&input, WriteMode::Replace, Some(&stored)).unwrap_err();
        assert_eq!(errors.get("email").map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_user_partial_keeps_stored_fields() {
        let stored = stored_user();
        let input = UserInput {
            is_active: Some(false),
            ..UserInput::default()
        };
        let draft = validate_user(&input, WriteMode::Partial, Some(&stored)).unwrap();
        assert_eq!(draft.email, "boss@shop.io");
        assert_eq!(draft.role, Some(Role::Manager));
        assert!(draft.is_staff);
        assert!(!draft.is_active);
    }

    #[test]
    fn test_user_empty_role_clears_role() {
        let stored = stored_user();
        let input = UserInput {
            role: Some(Some(String::new())),
            ..UserInput::default()
        };
        let draft = validate_user(&input, WriteMode::Partial, Some(&stored)).unwrap();
        assert_eq!(draft.role, None);
    }

    #[test]
    fn test_user_null_role_clears_and_missing_role_keeps() {
        let stored = stored_user();

        let cleared = UserInput {
            email: Some("boss@shop.io".to_string()),
            role: Some(None),
            ..UserInput::default()
        };
        let draft = validate_user(&cleared, WriteMode::Replace, Some(&stored)).unwrap();
        assert_eq!(draft.role, None);

        let kept = UserInput {
            email: Some("boss@shop.io".to_string()),
            ..UserInput::default()
        };
        let draft = validate_user(&kept, WriteMode::Replace, Some(&stored)).unwrap();
        assert_eq!(draft.role, Some(Role::Manager));
    }

    #[test]
    fn test_store_requires_manager() {
        let input = StoreInput {
            name: Some("Corner Shop".to_string()),
            locations: Some("Main St 1".to_string()),
            manager: None,
        };
        let errors = validate_store(&input, WriteMode::Create, None).unwrap_err();
        assert!(errors.get("manager").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_store_name_length() {
        let input = StoreInput {
            name: Some("x".repeat(MAX_NAME_LENGTH + 1)),
            locations: Some("Main St 1".to_string()),
            manager: Some(1),
        };
        let errors = validate_store(&input, WriteMode::Create, None).unwrap_err();
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn test_category_requires_both_fields() {
        let errors =
            validate_category(&CategoryInput::default(), WriteMode::Create, None).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_product_create() {
        let draft = validate_product(&product_input(), WriteMode::Create, None).unwrap();
        assert_eq!(draft.price.cents(), 450);
        assert!(draft.availability_status);
        assert_eq!(draft.categories, vec![3, 1]);
        assert_eq!(draft.store, STORE_ID);
    }

    #[test]
    fn test_product_rejects_bad_fields() {
        let input = ProductInput {
            price: Some(PriceInput::Text("1.999".to_string())),
            quantity_in_stock: Some(-4),
            store: Some("nope".to_string()),
            ..product_input()
        };
        let errors = validate_product(&input, WriteMode::Create, None).unwrap_err();
        assert!(errors.get("price").is_some());
        assert!(errors.get("quantity_in_stock").is_some());
        assert!(errors.get("store").is_some());
    }

    #[test]
    fn test_product_negative_price() {
        let input = ProductInput {
            price: Some(PriceInput::Text("-1.00".to_string())),
            ..product_input()
        };
        let errors = validate_product(&input, WriteMode::Create, None).unwrap_err();
        assert!(errors.get("price").is_some());
    }

    #[test]
    fn test_product_partial_keeps_categories_unless_given() {
        let stored = Product {
            id: 9,
            name: "Green Tea".to_string(),
            description: "Sencha".to_string(),
            price: Price::from_cents(450),
            quantity_in_stock: 3,
            availability_status: false,
            categories: vec![Category {
                id: 2,
                name: "Tea".to_string(),
                description: "Leaves".to_string(),
            }],
            store: STORE_ID.to_string(),
        };

        let keep = ProductInput {
            quantity_in_stock: Some(10),
            ..ProductInput::default()
        };
        let draft = validate_product(&keep, WriteMode::Partial, Some(&stored)).unwrap();
        assert_eq!(draft.categories, vec![2]);
        assert_eq!(draft.quantity_in_stock, 10);
        assert!(!draft.availability_status);

        let clear = ProductInput {
            categories: Some(vec![]),
            ..ProductInput::default()
        };
        let draft = validate_product(&clear, WriteMode::Partial, Some(&stored)).unwrap();
        assert!(draft.categories.is_empty());
    }
}
