//! # Money Module
//!
//! Provides the `Price` type for handling product prices safely.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-point cents                                        │
//! │    "19.99" ──parse──► Price(1999) ──store──► INTEGER 1999               │
//! │    Price(1999) ──serialize──► "19.99"                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Prices go over JSON as decimal strings with exactly two fraction digits
//! (`"19.99"`, `"5.00"`). Incoming prices may be strings or JSON numbers.
//!
//! ## Limits
//! At most [`MAX_INTEGER_DIGITS`] digits before the decimal point and
//! [`FRACTION_DIGITS`] after it (ten significant digits in total).
//!
//! ```rust
//! use storefront_core::money::Price;
//!
//! let price = Price::parse("19.9").unwrap();
//! assert_eq!(price.cents(), 1990);
//! assert_eq!(price.to_string(), "19.90");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Digits allowed after the decimal point.
pub const FRACTION_DIGITS: usize = 2;

/// Digits allowed before the decimal point.
pub const MAX_INTEGER_DIGITS: usize = 8;

// =============================================================================
// Price Type
// =============================================================================

/// A product price in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Parsing accepts a sign; validation rejects negatives
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Stored as INTEGER cents** in SQLite via the `sqlx` feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents.
    ///
    /// ```rust
    /// use storefront_core::money::Price;
    ///
    /// assert_eq!(Price::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal string such as `"12"`, `"12.5"` or `"-0.99"`.
    ///
    /// ## Rules
    /// - Optional leading sign
    /// - At most 8 digits before the point, at most 2 after it (trailing
    ///   zeros count)
    /// - No exponent, no grouping separators
    ///
    /// ```rust
    /// use storefront_core::money::Price;
    ///
    /// assert_eq!(Price::parse("12.5").unwrap().cents(), 1250);
    /// assert!(Price::parse("1.999").is_err());
    /// assert!(Price::parse("abc").is_err());
    /// ```
    pub fn parse(text: &str) -> CoreResult<Self> {
        let text = text.trim();
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (digits, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CoreError::InvalidPrice(
                "a valid number is required".to_string(),
            ));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(CoreError::InvalidPrice(
                "a valid number is required".to_string(),
            ));
        }

        let int_part = int_part.trim_start_matches('0');
        if int_part.len() > MAX_INTEGER_DIGITS {
            return Err(CoreError::InvalidPrice(format!(
                "no more than {} digits before the decimal point",
                MAX_INTEGER_DIGITS
            )));
        }

        // Counted as written: "1.500" has three decimal places
        if frac_part.len() > FRACTION_DIGITS {
            return Err(CoreError::InvalidPrice(format!(
                "no more than {} decimal places",
                FRACTION_DIGITS
            )));
        }

        let units: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| CoreError::InvalidPrice("a valid number is required".to_string()))?
        };

        let mut cents: i64 = 0;
        for (i, b) in frac_part.bytes().enumerate() {
            let digit = i64::from(b - b'0');
            cents += if i == 0 { digit * 10 } else { digit };
        }

        let total = units * 100 + cents;
        Ok(Price(if negative { -total } else { total }))
    }
}

// =============================================================================
// Wire Representation
// =============================================================================

/// A price as it arrives in a request body: either `"12.50"` or `12.5`.
///
/// Kept separate from [`Price`] so validation can report a bad price as a
/// field error instead of rejecting the whole body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    pub fn parse(&self) -> CoreResult<Price> {
        match self {
            PriceInput::Text(text) => Price::parse(text),
            PriceInput::Number(number) => Price::parse(&number.to_string()),
        }
    }
}

impl From<Price> for PriceInput {
    fn from(price: Price) -> Self {
        PriceInput::Text(price.to_string())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the canonical two-fraction-digit decimal, e.g. `"-5.50"`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl FromStr for Price {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PriceInput::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
