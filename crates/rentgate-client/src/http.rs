//! HTTP implementation of [`AuthApi`] using `reqwest`.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use rentgate_protocol::{
    ApiErrorBody, Codec, Credentials, JsonCodec, Session, SignInResponse, UserInfo,
};
use rentgate_session::{SessionService, SessionStore};
use serde::de::DeserializeOwned;

use crate::{AuthApi, ClientConfig, ClientError, FieldErrors, endpoints};

const DEFAULT_INVALID_CREDENTIALS: &str = "invalid username or password";
const DEFAULT_STATUS_MESSAGE: &str = "something went wrong";

/// An [`AuthApi`] backed by the car-rental REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    config: ClientConfig,
    codec: JsonCodec,
}

impl HttpAuthApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            config,
            codec: JsonCodec,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {base}{path}`, decoding a JSON body.
    ///
    /// When `session` is present the request carries
    /// `Authorization: Token <token>`. Whatever the outcome, the session
    /// itself is left alone.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<T, ClientError> {
        let mut request = self.client.get(self.config.endpoint(path));
        if let Some(session) = session {
            request = request.header(AUTHORIZATION, session.authorization());
        }

        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(self.status_error(status, &body));
        }
        self.codec
            .decode(&body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    fn post_json(&self, path: &str, body: Vec<u8>) -> RequestBuilder {
        self.client
            .post(self.config.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                tracing::warn!(error = %e, "request could not be built");
                return ClientError::InvalidRequest(e.to_string());
            }
            tracing::warn!(error = %e, "auth API unreachable");
            ClientError::Unreachable(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;
        Ok((status, body.to_vec()))
    }

    /// The server's own explanation, if the body carries one.
    fn error_message(&self, body: &[u8]) -> Option<String> {
        let parsed: ApiErrorBody = self.codec.decode(body).ok()?;
        parsed.message().map(str::to_string)
    }

    fn status_error(&self, status: StatusCode, body: &[u8]) -> ClientError {
        if status.as_u16() == 500 {
            return ClientError::Server;
        }
        ClientError::Status {
            status: status.as_u16(),
            message: self
                .error_message(body)
                .unwrap_or_else(|| DEFAULT_STATUS_MESSAGE.to_string()),
        }
    }

    /// Reads a 400 registration payload: `{"username": ["taken"]}`,
    /// `{"error": "..."}`, or anything else under `error`.
    fn field_errors(&self, body: &[u8]) -> FieldErrors {
        let mut fields = FieldErrors::new();
        match self.codec.decode::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => {
                for (field, value) in map {
                    let messages = match value {
                        serde_json::Value::Array(items) => items
                            .into_iter()
                            .map(|item| match item {
                                serde_json::Value::String(s) => s,
                                other => other.to_string(),
                            })
                            .collect(),
                        serde_json::Value::String(s) => vec![s],
                        other => vec![other.to_string()],
                    };
                    fields.insert(field, messages);
                }
            }
            Ok(other) => {
                fields.insert("error".into(), vec![other.to_string()]);
            }
            Err(_) if body.is_empty() => {}
            Err(_) => {
                fields.insert(
                    "error".into(),
                    vec![String::from_utf8_lossy(body).into_owned()],
                );
            }
        }
        fields
    }
}

impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, ClientError> {
        if !credentials.is_complete() {
            return Err(ClientError::MissingCredentials);
        }

        tracing::debug!(username = %credentials.username, "signing in");
        let body = self.codec.encode(credentials)?;
        let (status, body) = self.send(self.post_json(endpoints::SIGN_IN, body)).await?;

        if status.is_success() {
            let response: SignInResponse = self
                .codec
                .decode(&body)
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
            response
                .require_token()
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
            return Ok(response);
        }

        match status.as_u16() {
            400 => Err(ClientError::InvalidCredentials(
                self.error_message(&body)
                    .unwrap_or_else(|| DEFAULT_INVALID_CREDENTIALS.to_string()),
            )),
            _ => Err(self.status_error(status, &body)),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        if !credentials.is_complete() {
            return Err(ClientError::MissingCredentials);
        }

        tracing::debug!(username = %credentials.username, "registering");
        let body = self.codec.encode(credentials)?;
        let (status, body) = self.send(self.post_json(endpoints::REGISTER, body)).await?;

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            400 => Err(ClientError::Rejected {
                fields: self.field_errors(&body),
            }),
            _ => Err(self.status_error(status, &body)),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthorizedClient
// ---------------------------------------------------------------------------

/// Authenticated requests against the REST API.
///
/// Reads the session from the session service on every request, so a
/// sign-out elsewhere takes effect on the very next call.
pub struct AuthorizedClient<S: SessionStore> {
    api: HttpAuthApi,
    sessions: Arc<SessionService<S>>,
}

impl<S: SessionStore> AuthorizedClient<S> {
    pub fn new(api: HttpAuthApi, sessions: Arc<SessionService<S>>) -> Self {
        Self { api, sessions }
    }

    /// `GET {base}{path}` with the current session's credential attached.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let session = self.sessions.get_session();
        self.api.get_json(path, session.as_ref()).await
    }

    /// The signed-in principal's profile.
    pub async fn profile(&self) -> Result<UserInfo, ClientError> {
        self.get(endpoints::PROFILE).await
    }
}
