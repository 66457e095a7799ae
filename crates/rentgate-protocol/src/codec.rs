//! Codec trait and implementations for serializing/deserializing payloads.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The session store writes its document through a codec, and the HTTP
//! client decodes response bodies through one, so neither layer cares which
//! format is in use.
//!
//! Currently we provide [`JsonCodec`], which matches both the auth API
//! (JSON bodies) and the persisted session layout (a small JSON document).

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → safe to share between threads. The session service
///   may be shared behind an `Arc` by a multi-threaded host.
/// - `'static` → the codec owns everything it needs and can be stored in
///   long-lived values.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use rentgate_protocol::{Codec, Credentials, JsonCodec};
///
/// let codec = JsonCodec;
/// let creds = Credentials::new("alice", "secret");
///
/// let bytes = codec.encode(&creds).unwrap();
/// let decoded: Credentials = codec.decode(&bytes).unwrap();
/// assert_eq!(creds, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Role, SignInResponse};

    #[test]
    fn test_json_codec_decodes_sign_in_response() {
        let body = br#"{"token":"abc123","user":{"role":"operator"}}"#;

        let resp: SignInResponse = JsonCodec.decode(body).expect("should decode");

        assert_eq!(resp.token.as_deref(), Some("abc123"));
        assert_eq!(resp.role(), Some(Role::Operator));
    }

    #[test]
    fn test_json_codec_decode_garbage_returns_decode_error() {
        let result: Result<SignInResponse, _> = JsonCodec.decode(b"not json {");

        assert!(
            matches!(result, Err(ProtocolError::Decode(_))),
            "malformed input should be a Decode error"
        );
    }

    #[test]
    fn test_json_codec_decode_empty_input_returns_error() {
        let result: Result<SignInResponse, _> = JsonCodec.decode(b"");
        assert!(result.is_err());
    }
}
