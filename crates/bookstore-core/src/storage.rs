//! # Storage Seam
//!
//! The session and cart stores persist through a tiny string key-value
//! interface, the same shape as browser local storage.
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐
//! │ SessionStore │  │  CartStore   │
//! └──────┬───────┘  └──────┬───────┘
//!        │ "user" "token"   │ "cart"
//!        ▼                  ▼
//! ┌─────────────────────────────────────┐
//! │      dyn KeyValueStore              │
//! │  get(key) / set(key, v) / remove    │
//! └──────┬───────────────────┬──────────┘
//!        ▼                   ▼
//!   MemoryStorage       FileStorage
//!   (tests, this crate) (bookstore-storage)
//! ```
//!
//! Implementations swallow their own I/O failures: a failed read looks like
//! an absent key and a failed write is logged and dropped. Absence of a key
//! is the canonical "empty/unset" state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{CoreError, CoreResult};

/// Storage key holding the serialized [`User`](crate::types::User).
pub const USER_KEY: &str = "user";

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized line-item sequence.
pub const CART_KEY: &str = "cart";

/// A string key-value store.
///
/// All methods are synchronous and infallible from the caller's view.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Shared handle the stores hold on to.
pub type SharedStorage = Arc<dyn KeyValueStore>;

// =============================================================================
// JSON Helpers
// =============================================================================

/// Decodes a JSON entry.
pub(crate) fn decode_entry<T: DeserializeOwned>(key: &str, raw: &str) -> CoreResult<T> {
    serde_json::from_str(raw).map_err(|e| CoreError::CorruptEntry {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Reads and decodes a JSON entry. Absent and corrupt entries both yield
/// `None`; corruption is logged.
pub(crate) fn read_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match decode_entry(key, &raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable storage entry");
            None
        }
    }
}

/// Encodes and writes a JSON entry.
pub(crate) fn write_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => warn!(key, error = %e, "Failed to encode storage entry"),
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// In-memory key-value store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
