//! Error types for the protocol layer.
//!
//! Each crate in Rentgate defines its own error enum. A `ProtocolError`
//! always means the problem is in serialization or payload shape, never
//! in storage or networking.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, wrong field types, or a truncated
    /// body.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload decoded fine but violates a protocol rule, e.g. a
    /// sign-in response with an empty token.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
