//! # Session Store
//!
//! Tracks who is logged in and the bearer token to send with requests.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐  login / register   ┌──────────────────────────────┐   │
//! │   │ Anonymous │ ──────────────────► │ Authenticated                │   │
//! │   │           │                     │ "user" = {...}               │   │
//! │   │ no "user" │ ◄────────────────── │ "token" = "..." (optional)   │   │
//! │   └───────────┘       logout        └──────────────────────────────┘   │
//! │                                                                         │
//! │   No TTL: a session lasts until logout.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `is_authenticated()` looks only at the identity. A token without a user
//! is not a session; a user without a token is.

use tracing::debug;

use crate::storage::{read_json, write_json, SharedStorage, TOKEN_KEY, USER_KEY};
use crate::types::User;

/// Persisted identity and bearer token.
#[derive(Clone)]
pub struct SessionStore {
    storage: SharedStorage,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: SharedStorage) -> Self {
        SessionStore { storage }
    }

    /// Persists `user` as the current identity, replacing any prior value.
    pub fn set_user(&self, user: &User) {
        debug!(user_id = user.id, username = %user.username, "Storing session user");
        write_json(self.storage.as_ref(), USER_KEY, user);
    }

    /// Returns the persisted identity, if any.
    pub fn get_user(&self) -> Option<User> {
        read_json(self.storage.as_ref(), USER_KEY)
    }

    /// Persists the bearer token, replacing any prior value.
    pub fn set_token(&self, token: &str) {
        debug!("Storing session token");
        self.storage.set(TOKEN_KEY, token);
    }

    /// Returns the persisted bearer token, if any.
    pub fn get_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// True iff an identity is persisted. The token is not checked.
    pub fn is_authenticated(&self) -> bool {
        self.storage.get(USER_KEY).is_some()
    }

    /// Stores the outcome of a successful login or registration.
    pub fn login(&self, user: &User, token: Option<&str>) {
        self.set_user(user);
        if let Some(token) = token {
            self.set_token(token);
        }
    }

    /// Forgets identity and token. Idempotent.
    pub fn logout(&self) {
        debug!("Clearing session");
        self.storage.remove(USER_KEY);
        self.storage.remove(TOKEN_KEY);
    }
}
