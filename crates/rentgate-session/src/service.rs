//! The session service: get, set, and clear the current principal.
//!
//! Every caller that needs to know "who is signed in" goes through a
//! [`SessionService`] instead of touching storage directly. The service
//! owns the two policies that matter:
//!
//! - **Explicit role default.** A sign-in response without a role is
//!   persisted as [`Role::Client`], never as "nothing".
//! - **Fail closed.** Any store failure reads as "no session".
//!
//! # No caching
//!
//! `get_session()` hits the store on every call. Another view (or another
//! service over the same store) may have signed out in the meantime, and
//! an authorization decision made from a cached copy would be stale.

use rentgate_protocol::{Role, Session};

use crate::{MemoryStore, SessionStore, StoredSession};

/// Injectable session abstraction over a [`SessionStore`].
///
/// Cheap to share: wrap it in an `Arc` if several components need it. The
/// store does its own locking, so the service is `Sync` whenever the store
/// is.
pub struct SessionService<S: SessionStore = MemoryStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the current session from storage.
    ///
    /// Returns `None` when no token is stored, when the token is empty, or
    /// when storage can't be read at all.
    pub fn get_session(&self) -> Option<Session> {
        match self.store.load() {
            Ok(record) => record.into_session(),
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable, treating as signed out");
                None
            }
        }
    }

    /// Returns `true` if a session is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }

    /// Persists a new session.
    ///
    /// `role` is what the backend reported. When it reported nothing the
    /// principal is stored as a [`Role::Client`].
    ///
    /// The write is committed before this returns, so a navigation issued
    /// right after observes the new session. Returns the session exactly
    /// as stored, or `None` if it could not be stored (in which case any
    /// previous session is cleared as well).
    pub fn set_session(&self, token: impl Into<String>, role: Option<Role>) -> Option<Session> {
        let token = token.into();
        if token.is_empty() {
            tracing::warn!("refusing to store an empty session token");
            self.clear_session();
            return None;
        }

        let role = match role {
            Some(role) => role,
            None => {
                tracing::debug!("no role reported, defaulting to client");
                Role::Client
            }
        };

        let session = Session::new(token, role);
        match self.store.save(&StoredSession::signed_in(&session)) {
            Ok(()) => {
                tracing::info!(role = %session.role, "session stored");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to store session");
                self.clear_session();
                None
            }
        }
    }

    /// Removes the stored session.
    ///
    /// If the store can't clear, an empty record is written over it
    /// instead. Failures are logged, never returned.
    pub fn clear_session(&self) {
        match self.store.clear() {
            Ok(()) => tracing::info!("session cleared"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to clear session, overwriting instead");
                if let Err(e) = self.store.save(&StoredSession::default()) {
                    tracing::error!(error = %e, "session could not be cleared");
                }
            }
        }
    }
}

impl SessionService<MemoryStore> {
    /// A service over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Default for SessionService<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

// =========================================================================
// Tests
// =========================================================================
