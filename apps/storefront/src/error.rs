//! # Storefront Error Type
//!
//! Everything a command can fail with, collapsed to one printable message.
//!
//! ```text
//!   ApiError ─────────┐   401/403 → SessionExpired
//!   CoreError ────────┤
//!   CheckoutError ────┼──► StorefrontError ──► main(): "Error: <message>", exit 1
//!   ValidationError ──┤
//!   ConfigError ──────┤
//!   StorageError ─────┘
//! ```

use bookstore_client::ApiError;
use bookstore_core::{BookId, CheckoutError, CoreError, ValidationError};
use bookstore_storage::StorageError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The command needs a logged-in user.
    #[error("Please log in first")]
    NotLoggedIn,

    /// A service refused the stored token.
    #[error("Your session has expired, please log in again")]
    SessionExpired(#[source] ApiError),

    #[error("Book {0} was not found")]
    BookNotFound(BookId),

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StorefrontError {
    /// Maps a failed book lookup, naming the book when it does not exist.
    pub fn book_lookup(book_id: BookId, err: ApiError) -> Self {
        if err.is_not_found() {
            StorefrontError::BookNotFound(book_id)
        } else {
            err.into()
        }
    }
}

/// Authenticated calls that are refused mean the stored token is no longer
/// good. Login and registration map their errors with
/// [`StorefrontError::Api`] directly, so bad credentials keep the service's
/// message.
impl From<ApiError> for StorefrontError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            StorefrontError::SessionExpired(err)
        } else {
            StorefrontError::Api(err)
        }
    }
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;
