//! Error types for the session layer.

use std::path::PathBuf;

use rentgate_protocol::ProtocolError;

/// Errors a [`SessionStore`](crate::SessionStore) can report.
///
/// These never escape [`SessionService`](crate::SessionService); it logs
/// them and treats the session as absent.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading, writing, or removing the backing file failed.
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document exists but can't be decoded.
    #[error("persisted session is corrupt: {0}")]
    Corrupt(#[source] ProtocolError),

    /// The session could not be serialized for storage.
    #[error("session could not be encoded: {0}")]
    Encode(#[source] ProtocolError),

    /// The store is unavailable for some other reason (e.g. a host
    /// storage API refused access).
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
