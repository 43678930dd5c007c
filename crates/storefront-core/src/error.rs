//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - One input validation failure                   │
//! │  └── FieldErrors      - All failures of one request, keyed by field    │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront-api errors (in app)                                        │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → ApiError → HTTP 400             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Price text could not be parsed as a fixed-point decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Validation error (wraps the collected field errors).
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single input validation failure.
///
/// Every variant names the offending field so failures can be grouped into
/// a [`FieldErrors`] map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid email, invalid UUID, bad decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate email).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Referenced entity does not exist (e.g., unknown manager id).
    #[error("Invalid pk \"{id}\" - object does not exist.")]
    UnknownReference { field: String, id: String },
}

impl ValidationError {
    /// Returns the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::Duplicate { field, .. }
            | ValidationError::UnknownReference { field, .. } => field,
        }
    }

    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub fn unknown_reference(field: &str, id: impl ToString) -> Self {
        ValidationError::UnknownReference {
            field: field.to_string(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: &str, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Validation failures for one request, grouped by field.
///
/// ## Serialization
/// This is the body of every HTTP 400 validation response:
/// ```json
/// {
///   "email": ["email 'a@b.com' already exists"],
///   "name": ["name is required"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Records a validation failure under its field.
    pub fn push(&mut self, err: ValidationError) {
        self.0
            .entry(err.field().to_string())
            .or_default()
            .push(err.to_string());
    }

    /// Records the error of a `Result`, returning the success value if any.
    pub fn collect<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(err: ValidationError) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(err);
        errors
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for messages in self.0.values() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("email");
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::unknown_reference("manager", 42);
        assert_eq!(err.to_string(), "Invalid pk \"42\" - object does not exist.");
        assert_eq!(err.field(), "manager");
    }

    #[test]
    fn test_field_errors_group_by_field() {
        let mut errors = FieldErrors::new();
        errors.push(ValidationError::required("name"));
        errors.push(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
        errors.push(ValidationError::required("store"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name").map(<[String]>::len), Some(2));

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["store"][0], "store is required");
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_field_errors_convert_to_core_error() {
        let errors: FieldErrors = ValidationError::required("email").into();
        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
