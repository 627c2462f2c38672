//! Logged-in user session.
//!
//! A session is a single serialized `User` record stored under a key derived
//! from the session token. No expiry, no refresh, no schema versioning: a
//! record that no longer deserializes is dropped and the user is logged out.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::{AuthError, User};

/// Storage key prefix for the serialized user record.
pub const SESSION_KEY: &str = "stonedesk.user";

/// Opaque bearer token handed to the client at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn storage_key(&self) -> String {
        format!("{SESSION_KEY}:{}", self.0)
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key/value session storage abstraction.
pub trait SessionStore: Send + Sync {
    fn save(&self, token: &SessionToken, user: &User) -> Result<(), AuthError>;
    fn load(&self, token: &SessionToken) -> Option<User>;
    /// Returns whether a session existed.
    fn remove(&self, token: &SessionToken) -> bool;
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn save(&self, token: &SessionToken, user: &User) -> Result<(), AuthError> {
        (**self).save(token, user)
    }

    fn load(&self, token: &SessionToken) -> Option<User> {
        (**self).load(token)
    }

    fn remove(&self, token: &SessionToken) -> bool {
        (**self).remove(token)
    }
}

/// In-memory session store (lost on restart).
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized record, as stored.
    pub fn raw(&self, token: &SessionToken) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(&token.storage_key()).cloned()
    }

    /// Overwrite the raw record (used to simulate a stale/corrupted entry).
    pub fn put_raw(&self, token: &SessionToken, raw: impl Into<String>) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(token.storage_key(), raw.into());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, token: &SessionToken, user: &User) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| AuthError::SessionCorrupted(e.to_string()))?;
        let mut map = self
            .inner
            .write()
            .map_err(|_| AuthError::SessionCorrupted("session store poisoned".to_string()))?;
        map.insert(token.storage_key(), raw);
        Ok(())
    }

    fn load(&self, token: &SessionToken) -> Option<User> {
        let raw = self.raw(token)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unreadable session record");
                self.remove(token);
                None
            }
        }
    }

    fn remove(&self, token: &SessionToken) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(&token.storage_key()).is_some(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserDirectory;

    #[test]
    fn save_load_remove() {
        let store = InMemorySessionStore::new();
        let user = UserDirectory::demo().users()[1].clone();
        let token = SessionToken::new();

        store.save(&token, &user).unwrap();
        assert_eq!(store.load(&token), Some(user));

        assert!(store.remove(&token));
        assert!(!store.remove(&token));
        assert_eq!(store.load(&token), None);
    }

    #[test]
    fn record_is_a_single_json_document_under_the_session_key() {
        let store = InMemorySessionStore::new();
        let user = UserDirectory::demo().users()[0].clone();
        let token = SessionToken::from_raw("abc");
        store.save(&token, &user).unwrap();

        let raw = store.raw(&token).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["email"], user.email);
        assert_eq!(token.storage_key(), "stonedesk.user:abc");
    }

    #[test]
    fn corrupted_record_logs_the_user_out() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::new();
        store.put_raw(&token, "{not json");

        assert_eq!(store.load(&token), None);
        assert!(store.is_empty());
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(SessionToken::new(), SessionToken::new());
    }
}
