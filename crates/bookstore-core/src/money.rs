//! # Money Module
//!
//! Provides the `Money` type for handling prices and totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing cart lines as floats:                                         │
//! │    9.99 × 2 + 5.00 = 24.979999999999997  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    999 × 2 + 500 = 2498 cents = $24.98  ✅                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The backend services expose decimals either as JSON strings (`"9.99"`)
//! or numbers (`9.99`). `Money` accepts both and always writes a JSON
//! number with at most two decimals, which is also the shape persisted in
//! the `cart` storage entry.
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.to_string(), "$21.98");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::ValidationError;

/// Relative tolerance for float-to-cents conversion.
const WIRE_EPSILON: f64 = 1e-6;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Book.price ──► BookDescriptor.price ──► LineItem.price ──► line total
///                                                               │
///                    CartStore::get_total() ◄───────────────────┘
///                              │
///                              ▼
///                    NewPayment.amount ──► payments service
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount. Arithmetic saturates here instead of
    /// overflowing.
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal string such as `"9.99"`, `"10"`, or `"-3.5"`.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, optionally followed by `.` and one or two digits
    /// - Surrounding whitespace is ignored
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("9.99").unwrap().cents(), 999);
    /// assert_eq!(Money::parse_decimal("5").unwrap().cents(), 500);
    /// assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
    /// assert!(Money::parse_decimal("abc").is_err());
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("must be a decimal number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a decimal number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(|| invalid("is too large"))?
        };

        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("must be a decimal number"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid("must be a decimal number"))?,
        };

        let cents = whole_cents
            .checked_add(fraction_cents)
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Converts a floating point amount received on the wire.
    ///
    /// Follows the same rules as [`Money::parse_decimal`]: at most two
    /// decimal places, and the amount must fit in cents. Only the binary
    /// representation error of the float (`9.99` is `998.999..` cents) is
    /// rounded away.
    pub fn from_wire_f64(amount: f64) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        if !amount.is_finite() {
            return Err(invalid("must be a finite number"));
        }

        let scaled = amount * 100.0;
        let cents = scaled.round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(invalid("is too large"));
        }
        if (scaled - cents).abs() > WIRE_EPSILON * cents.abs().max(1.0) {
            return Err(invalid("must have at most two decimal places"));
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at [`Money::MAX`].
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(999);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 1998);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns the amount as a float, for the JSON wire format only.
    fn to_wire_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_wire_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Accepts `9.99`, `10`, and `"9.99"`.
struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a number or string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_wire_f64(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("amount is too large"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom("amount is too large"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse_decimal(v).map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
