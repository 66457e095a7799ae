//! Unified error type for Rentgate.

use rentgate_client::ClientError;
use rentgate_protocol::ProtocolError;
use rentgate_router::RouterError;
use rentgate_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `rentgate` facade crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RentgateError {
    /// A protocol-level error (encode, decode, invalid payload).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session could not be stored.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A route table could not be built.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The auth API refused or failed (bad credentials, server down).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Registration went through but the follow-up sign-in did not. The
    /// account exists; send the user to the sign-in page.
    #[error("registered, but signing in failed: {0}")]
    AutoSignInFailed(#[source] Box<RentgateError>),
}

impl RentgateError {
    /// The auth API error underneath, if that is what this is.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(e) => Some(e),
            Self::AutoSignInFailed(inner) => inner.client_error(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidPayload("bad".into());
        let rentgate_err: RentgateError = err.into();
        assert!(matches!(rentgate_err, RentgateError::Protocol(_)));
        assert!(rentgate_err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Unavailable("disk full".into());
        let rentgate_err: RentgateError = err.into();
        assert!(matches!(rentgate_err, RentgateError::Session(_)));
    }

    #[test]
    fn test_from_router_error() {
        let err = RouterError::DuplicateRoute("/cars".into());
        let rentgate_err: RentgateError = err.into();
        assert!(matches!(rentgate_err, RentgateError::Router(_)));
    }

    #[test]
    fn test_from_client_error() {
        let err = ClientError::Server;
        let rentgate_err: RentgateError = err.into();
        assert!(matches!(rentgate_err, RentgateError::Client(_)));
        assert!(matches!(rentgate_err.client_error(), Some(ClientError::Server)));
    }

    #[test]
    fn test_auto_sign_in_failed_exposes_inner_client_error() {
        let inner = RentgateError::from(ClientError::InvalidCredentials("nope".into()));
        let err = RentgateError::AutoSignInFailed(Box::new(inner));

        assert!(err.to_string().contains("nope"));
        assert!(matches!(
            err.client_error(),
            Some(ClientError::InvalidCredentials(_))
        ));
    }
}
