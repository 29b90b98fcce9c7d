//! # Token Providers
//!
//! Where the client gets the bearer token for each request.
//!
//! The token is looked up per request, so logging in or out through the
//! [`SessionStore`] takes effect on the next call without rebuilding the
//! client.

use bookstore_core::SessionStore;

/// Supplies the bearer token, if any, for an outgoing request.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Reads the token persisted by the session store.
impl TokenProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.get_token()
    }
}

/// Never sends a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenProvider for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_session_store_provides_token() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(TokenProvider::token(&session).is_none());

        session.set_token("abc");
        assert_eq!(TokenProvider::token(&session).as_deref(), Some("abc"));

        session.logout();
        assert!(TokenProvider::token(&session).is_none());
    }

    #[test]
    fn test_anonymous() {
        assert!(Anonymous.token().is_none());
    }
}
