//! # bookstore-client: REST Client for the Bookstore Services
//!
//! Typed async access to the users, books, orders, payments and reviews
//! services.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront command                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                bookstore-client (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   Api ─┬─ UsersService ────┐                                    │   │
//! │  │        ├─ BooksService ────┤                                    │   │
//! │  │        ├─ OrdersService ───┼──► ServiceClient ──► reqwest       │   │
//! │  │        ├─ PaymentsService ─┤        ▲                           │   │
//! │  │        └─ ReviewsService ──┘        │ Bearer token              │   │
//! │  │                              TokenProvider (SessionStore)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  :8001 users  :8002 books  :8003 orders  :8004 payments  :8005 reviews │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Base URLs and timeout
//! - [`error`] - The single [`ApiError`] shape
//! - [`http`] - Shared request/response handling
//! - [`services`] - One wrapper per service
//! - [`token`] - Bearer token sources
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookstore_client::{Api, ApiConfig};
//! use bookstore_core::{MemoryStorage, SessionStore};
//!
//! # async fn run() -> bookstore_client::ApiResult<()> {
//! let session = SessionStore::new(Arc::new(MemoryStorage::new()));
//! let api = Api::new(&ApiConfig::default(), Arc::new(session))?;
//! let books = api.books.search_books("dune").await?;
//! println!("{} matches", books.len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod services;
pub mod token;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::Api;
pub use config::{parse_base_url, ApiConfig, Service, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use http::{ListResponse, ServiceClient};
pub use token::{Anonymous, TokenProvider};
