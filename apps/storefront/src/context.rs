//! # Application Context
//!
//! The stores and clients a command works with, built once per run.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StorefrontConfig                                                      │
//! │       │                                                                 │
//! │       ├──► FileStorage (data dir) ──┬──► SessionStore ──┐               │
//! │       │                             └──► CartStore      │ token         │
//! │       │                                                 ▼               │
//! │       └──► ApiConfig ──────────────────────────────────► Api            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Session and cart share one storage backend, and the API reads its bearer
//! token from the same session, so a login is visible to the next request.

use std::sync::Arc;

use bookstore_client::{Api, ApiConfig};
use bookstore_core::{CartStore, SessionStore, SharedStorage, User};
use bookstore_storage::{FileStorage, StorageConfig};
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, StorefrontResult};

/// Stores and API clients for one storefront run.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub cart: CartStore,
    pub api: Api,
}

impl AppContext {
    /// Opens file storage and builds the clients from configuration.
    pub fn open(config: &StorefrontConfig) -> StorefrontResult<Self> {
        let storage_config = match config.storage_config() {
            Some(storage) => storage,
            None => StorageConfig::default_location()?,
        };
        let storage = FileStorage::open(&storage_config)?;
        debug!(path = %storage.path().display(), "Using local state directory");

        Self::new(Arc::new(storage), &config.api_config()?)
    }

    /// Builds the context over any storage backend.
    pub fn new(storage: SharedStorage, api_config: &ApiConfig) -> StorefrontResult<Self> {
        let session = SessionStore::new(storage.clone());
        let cart = CartStore::new(storage);
        let api = Api::new(api_config, Arc::new(session.clone()))?;

        Ok(AppContext { session, cart, api })
    }

    /// The logged-in user, or [`StorefrontError::NotLoggedIn`].
    pub fn require_user(&self) -> StorefrontResult<User> {
        self.session.get_user().ok_or(StorefrontError::NotLoggedIn)
    }
}
