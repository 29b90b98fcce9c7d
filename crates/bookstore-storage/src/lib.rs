//! # bookstore-storage: Persistent Key-Value Storage
//!
//! A filesystem [`KeyValueStore`](bookstore_core::KeyValueStore) so the
//! session and cart survive between storefront runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  storefront command                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionStore / CartStore (bookstore-core)                             │
//! │       │ get / set / remove                                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                bookstore-storage (THIS CRATE)                   │   │
//! │  │   FileStorage ──► <data_dir>/user                               │   │
//! │  │                   <data_dir>/token                              │   │
//! │  │                   <data_dir>/cart                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookstore_core::CartStore;
//! use bookstore_storage::{FileStorage, StorageConfig};
//!
//! let config = StorageConfig::default_location()?;
//! let storage = Arc::new(FileStorage::open(&config)?);
//! let cart = CartStore::new(storage);
//! println!("{} items", cart.get_item_count());
//! # Ok::<(), bookstore_storage::StorageError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use file::{FileStorage, StorageConfig};
