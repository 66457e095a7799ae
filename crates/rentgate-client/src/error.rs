use std::collections::BTreeMap;

use rentgate_protocol::ProtocolError;

/// Field name → validation messages, as returned by a rejected registration.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors that can occur talking to the auth API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Username or password was empty. No request was sent.
    #[error("username and password are required")]
    MissingCredentials,

    /// The server rejected the credentials (HTTP 400).
    #[error("{0}")]
    InvalidCredentials(String),

    /// The server failed (HTTP 500).
    #[error("server error, try again later")]
    Server,

    /// Any other non-success status.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// No response at all: connection refused, DNS, timeout.
    #[error("no response from server: {0}")]
    Unreachable(String),

    /// The request was never sent because it could not be built, e.g. a
    /// stored token that isn't a valid header value.
    #[error("request could not be built: {0}")]
    InvalidRequest(String),

    /// A success status with a body we can't use.
    #[error("unexpected response from server: {0}")]
    MalformedResponse(String),

    /// Password and confirmation differ. No request was sent.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The server refused the registration (HTTP 400).
    #[error("registration rejected: {}", describe(.fields))]
    Rejected { fields: FieldErrors },

    /// The HTTP client could not be built from its configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Encoding a request body failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

fn describe(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("username".into(), vec!["already taken".into()]);
        fields.insert("password".into(), vec!["too short".into(), "too common".into()]);

        let err = ClientError::Rejected { fields };

        assert_eq!(
            err.to_string(),
            "registration rejected: password: too short, too common; username: already taken"
        );
    }

    #[test]
    fn test_invalid_credentials_display_is_server_message() {
        let err = ClientError::InvalidCredentials("bad password".into());
        assert_eq!(err.to_string(), "bad password");
    }
}
