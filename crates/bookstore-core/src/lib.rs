//! # bookstore-core: Pure Client Logic for the Bookstore Storefront
//!
//! This crate holds everything the storefront does without touching the
//! network or the disk: money arithmetic, backend record types, input
//! validation, and the two persisted stores (session and cart).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (CLI "views")                   │   │
//! │  │   books ──► book <id> ──► cart ──► checkout ──► orders          │   │
//! │  └───────────────┬──────────────────────────────┬──────────────────┘   │
//! │                  │                              │                       │
//! │  ┌───────────────▼───────────────┐  ┌───────────▼──────────────────┐   │
//! │  │  ★ bookstore-core (THIS) ★    │  │  bookstore-client            │   │
//! │  │                               │  │  users / books / orders /    │   │
//! │  │  SessionStore   CartStore     │  │  payments / reviews (REST)   │   │
//! │  │  Money  types  validation     │  └──────────────────────────────┘   │
//! │  │  checkout drafts              │                                     │
//! │  └───────────────┬───────────────┘                                     │
//! │                  │ KeyValueStore (get / set / remove)                   │
//! │  ┌───────────────▼───────────────┐                                     │
//! │  │  bookstore-storage (files)    │                                     │
//! │  └───────────────────────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Backend records and request payloads
//! - [`validation`] - Input validation at the store/API boundary
//! - [`storage`] - The `KeyValueStore` seam plus an in-memory backend
//! - [`session`] - Persisted identity and bearer token
//! - [`cart`] - Persisted shopping cart
//! - [`checkout`] - Order/payment drafts built from the cart
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bookstore_core::cart::{BookDescriptor, CartStore};
//! use bookstore_core::money::Money;
//! use bookstore_core::storage::MemoryStorage;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let cart = CartStore::new(storage);
//!
//! let book = BookDescriptor::new(1, "Dune", "Frank Herbert", Money::from_cents(999), 3)
//!     .expect("valid price and stock");
//! cart.add_to_cart(&book);
//! cart.add_to_cart(&book);
//!
//! assert_eq!(cart.get_item_count(), 2);
//! assert_eq!(cart.get_total().cents(), 1998);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod session;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{BookDescriptor, CartStore, LineItem};
pub use checkout::{CheckoutDraft, CheckoutError};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use session::SessionStore;
pub use storage::{KeyValueStore, MemoryStorage, SharedStorage};
pub use types::*;
