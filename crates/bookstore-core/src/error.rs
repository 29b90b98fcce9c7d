//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bookstore-core::checkout                                              │
//! │  └── CheckoutError    - Checkout preconditions                         │
//! │                                                                         │
//! │  bookstore-client                                                      │
//! │  └── ApiError         - Any failed request, flattened to a message     │
//! │                                                                         │
//! │  Flow: Core/Validation/Checkout/Api → storefront → printed message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Local store operations never return these: storage faults are not
//! observable. Errors only arise when untrusted input (a price string, a
//! rating, an address) crosses into the domain.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book is not present in the cart.
    #[error("Book {0} is not in the cart")]
    NotInCart(i64),

    /// Requested quantity would go past the stock snapshot taken at add time.
    ///
    /// ## When This Occurs
    /// Only the storefront raises this; the cart store itself never clamps
    /// against `stock`.
    #[error("Only {available} of book {book_id} in stock, requested {requested}")]
    InsufficientStock {
        book_id: i64,
        available: i64,
        requested: i64,
    },

    /// A persisted entry could not be decoded.
    #[error("Stored {key} entry is corrupt: {reason}")]
    CorruptEntry { key: String, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user or service input doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Two fields that must agree do not.
    #[error("{field} does not match")]
    Mismatch { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
