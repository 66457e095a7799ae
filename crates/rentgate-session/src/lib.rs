//! Session state for Rentgate.
//!
//! This crate is the single place that answers "is a principal signed in,
//! and with what role?":
//!
//! 1. **Storage**: where the two persisted entries (`token`, `role`) live
//!    ([`SessionStore`] trait, [`MemoryStore`], [`FileStore`])
//! 2. **Service**: the get/set/clear operations every other layer calls
//!    ([`SessionService`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Router / Shell (above)  ← read the session on every navigation
//!     ↕
//! Session Layer (this crate)  ← persisted (token, role) pair
//!     ↕
//! Protocol Layer (below)  ← provides Role, Session, JsonCodec
//! ```
//!
//! # Failure policy
//!
//! Stores report failures as [`SessionError`]. The service never does: a
//! store that cannot be read or written is treated as "signed out", so a
//! corrupted or inaccessible session fails closed.

mod error;
mod file;
mod service;
mod store;

pub use error::SessionError;
pub use file::FileStore;
pub use service::SessionService;
pub use store::{MemoryStore, SessionStore, StoredSession};
