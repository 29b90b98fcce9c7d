//! # Validation Module
//!
//! Input validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront arguments (clap)                                  │
//! │  └── Type parsing (ids, quantities, ratings)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Prices are numeric and non-negative before they reach the cart    │
//! │  └── Forms are complete before they reach a service                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend services                                             │
//! │  └── Authoritative checks; failures come back as a single message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Registration;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price: zero is allowed, negative is not.
///
/// ```rust
/// use bookstore_core::money::Money;
/// use bookstore_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }
    Ok(price)
}

/// Validates a stock count reported by the books service.
pub fn validate_stock(stock: i64) -> ValidationResult<i64> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }
    Ok(stock)
}

/// Parses and validates a loosely-typed price string.
///
/// This is the only way a textual price becomes a cart price.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    validate_price(Money::parse_decimal(input)?)
}

/// Validates a quantity the user asked for.
///
/// The cart store itself treats `<= 0` as "remove"; this check is for
/// places where a non-positive number is a user mistake (e.g. `--qty 0`).
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(qty)
}

/// Validates a star rating (1-5).
pub fn validate_rating(rating: u8) -> ValidationResult<u8> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING as i64,
            max: MAX_RATING as i64,
        });
    }
    Ok(rating)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a shipping address and returns it trimmed.
pub fn validate_shipping_address(address: &str) -> ValidationResult<String> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "shipping address".to_string(),
        });
    }
    Ok(address.to_string())
}

/// Validates a free-text book search.
///
/// The search endpoint rejects requests without a query, so blank input is
/// caught here instead.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Normalizes an optional review comment: blank becomes `None`.
pub fn normalize_comment(comment: Option<&str>) -> Option<String> {
    comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a registration form before it is sent.
///
/// ## Rules
/// - username and password are required
/// - both password fields must match
pub fn validate_registration(form: &Registration) -> ValidationResult<()> {
    if form.username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if form.password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if form.password != form.password2 {
        return Err(ValidationError::Mismatch {
            field: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(0)).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(-100)),
            Err(ValidationError::MustNotBeNegative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap().cents(), 999);
        assert!(parse_price("-9.99").is_err());
        assert!(parse_price("nine").is_err());
        assert!(parse_price("").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(50).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert_eq!(validate_stock(0), Ok(0));
        assert_eq!(validate_stock(12), Ok(12));
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_rating() {
        for r in 1..=5 {
            assert!(validate_rating(r).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_shipping_address() {
        assert_eq!(
            validate_shipping_address("  12 Baker St  ").unwrap(),
            "12 Baker St"
        );
        assert!(validate_shipping_address("   ").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(" dune ").unwrap(), "dune");
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_normalize_comment() {
        assert_eq!(normalize_comment(Some("  great  ")), Some("great".to_string()));
        assert_eq!(normalize_comment(Some("   ")), None);
        assert_eq!(normalize_comment(None), None);
    }

    #[test]
    fn test_validate_registration() {
        let mut form = Registration {
            username: "ada".to_string(),
            password: "s3cret".to_string(),
            password2: "s3cret".to_string(),
            ..Default::default()
        };
        assert!(validate_registration(&form).is_ok());

        form.password2 = "other".to_string();
        assert_eq!(
            validate_registration(&form),
            Err(ValidationError::Mismatch {
                field: "password".to_string()
            })
        );

        form.username = " ".to_string();
        assert!(validate_registration(&form).is_err());
    }
}
