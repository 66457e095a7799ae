//! The storage seam: where the persisted session entries live.
//!
//! The persisted layout is tiny: two scalar entries, `token`
//! and `role`, each of which may be absent. [`StoredSession`] is that
//! layout as a Rust value, and [`SessionStore`] is anything that can load,
//! save, and clear it.

use std::sync::Arc;

use parking_lot::Mutex;
use rentgate_protocol::{Role, Session};
use serde::{Deserialize, Serialize};

use crate::SessionError;

// ---------------------------------------------------------------------------
// StoredSession
// ---------------------------------------------------------------------------

/// The two persisted entries, exactly as they sit in storage.
///
/// No schema version is stored. Both fields are optional because storage
/// may legitimately hold neither, either, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl StoredSession {
    /// The entries to persist for a signed-in principal.
    pub fn signed_in(session: &Session) -> Self {
        Self {
            token: Some(session.token.clone()),
            role: Some(session.role.clone()),
        }
    }

    /// Interprets the raw entries as a session.
    ///
    /// The token decides presence; the role is only looked at once a token
    /// is known to exist. A token with no role entry is a principal with no
    /// recognized role, not a client.
    pub fn into_session(self) -> Option<Session> {
        let token = self.token.filter(|t| !t.is_empty())?;
        let role = self.role.unwrap_or_else(|| Role::Unknown(String::new()));
        Some(Session { token, role })
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Persisted storage for the session entries.
///
/// # Trait bounds
///
/// - `Send + Sync` → one store can back a session service shared across
///   threads. Implementations synchronize internally.
/// - `'static` → stores live as long as the application shell.
pub trait SessionStore: Send + Sync + 'static {
    /// Reads both entries. An empty store is `Ok(StoredSession::default())`,
    /// not an error.
    fn load(&self) -> Result<StoredSession, SessionError>;

    /// Replaces both entries. The write is committed when this returns.
    fn save(&self, record: &StoredSession) -> Result<(), SessionError>;

    /// Removes both entries. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Sharing a store: two services (say, two views of the same app) built
/// over clones of one `Arc` see each other's sign-in and sign-out.
impl<S: SessionStore> SessionStore for Arc<S> {
    fn load(&self) -> Result<StoredSession, SessionError> {
        (**self).load()
    }

    fn save(&self, record: &StoredSession) -> Result<(), SessionError> {
        (**self).save(record)
    }

    fn clear(&self) -> Result<(), SessionError> {
        (**self).clear()
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// An in-process store. State lives for the lifetime of the value.
///
/// The cell is guarded by a `parking_lot::Mutex`, so concurrent readers
/// and writers on different threads always see a whole record.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cell: Mutex<StoredSession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with raw entries. Mostly useful in tests that
    /// need storage in a state the service itself would never write.
    pub fn with_entries(record: StoredSession) -> Self {
        Self {
            cell: Mutex::new(record),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<StoredSession, SessionError> {
        Ok(self.cell.lock().clone())
    }

    fn save(&self, record: &StoredSession) -> Result<(), SessionError> {
        *self.cell.lock() = record.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.cell.lock() = StoredSession::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_session_without_token_is_absent() {
        let record = StoredSession {
            token: None,
            role: Some(Role::Manager),
        };
        assert_eq!(record.into_session(), None);
    }

    #[test]
    fn test_into_session_with_empty_token_is_absent() {
        let record = StoredSession {
            token: Some(String::new()),
            role: Some(Role::Client),
        };
        assert_eq!(record.into_session(), None);
    }

    #[test]
    fn test_into_session_token_without_role_has_no_recognized_role() {
        let record = StoredSession {
            token: Some("abc".into()),
            role: None,
        };

        let session = record.into_session().expect("token is present");
        assert_eq!(session.role, Role::Unknown(String::new()));
        assert!(!session.role.is_known());
    }

    #[test]
    fn test_signed_in_copies_both_entries() {
        let session = Session::new("abc", Role::Accountant);
        let record = StoredSession::signed_in(&session);

        assert_eq!(record.token.as_deref(), Some("abc"));
        assert_eq!(record.role, Some(Role::Accountant));
        assert_eq!(record.into_session(), Some(session));
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), StoredSession::default());
    }

    #[test]
    fn test_memory_store_save_then_load() {
        let store = MemoryStore::new();
        let record = StoredSession::signed_in(&Session::new("t", Role::Operator));

        store.save(&record).unwrap();

        assert_eq!(store.load().unwrap(), record);
    }

    #[test]
    fn test_memory_store_clear_removes_both_entries() {
        let store = MemoryStore::new();
        store
            .save(&StoredSession::signed_in(&Session::new("t", Role::Operator)))
            .unwrap();

        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), StoredSession::default());
    }

    #[test]
    fn test_arc_store_shares_state_between_clones() {
        let a = Arc::new(MemoryStore::new());
        let b = Arc::clone(&a);

        a.save(&StoredSession::signed_in(&Session::new("t", Role::Client)))
            .unwrap();

        assert_eq!(b.load().unwrap().token.as_deref(), Some("t"));
    }

    #[test]
    fn test_stored_session_json_layout() {
        let record = StoredSession::signed_in(&Session::new("abc", Role::Manager));
        let json = serde_json_value(&record);

        assert_eq!(json, r#"{"token":"abc","role":"manager"}"#);
    }

    fn serde_json_value(record: &StoredSession) -> String {
        use rentgate_protocol::{Codec, JsonCodec};
        String::from_utf8(JsonCodec.encode(record).unwrap()).unwrap()
    }
}
