//! Session and auth-API payload types.
//!
//! These are the only shapes of the remote REST API that the front-end
//! depends on. Everything else the backend returns (cars, rentals,
//! penalties, reports) is opaque to this workspace.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{ProtocolError, Role};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A signed-in principal: the credential token plus the role it holds.
///
/// There is no "session without a token" value. Code that may or may not
/// have a principal works with `Option<Session>`, so the role of an absent
/// session cannot be consulted by construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque credential issued by the backend on sign-in.
    pub token: String,

    /// The single role this principal holds.
    pub role: Role,
}

impl Session {
    /// Creates a session from a token and role.
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    /// The value for an `Authorization` header: `Token <token>`.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }
}

/// The token is a bearer secret, so `Debug` (and therefore `tracing`
/// output) never prints it.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of the sign-in and registration requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are filled in. Sign-in is never attempted otherwise.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// The `user` object inside a sign-in response.
///
/// Every field is optional: the backend is allowed to omit the role, and
/// the front-end must then fall back to [`Role::Client`] explicitly.
///
/// `role` is read leniently. A string is parsed as usual, `null` is "not
/// reported", and any other JSON value (a number, an object) becomes a
/// [`Role::Unknown`] instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_role"
    )]
    pub role: Option<Role>,
}

/// Successful sign-in response: `{ "token": "...", "user": { "role": "..." } }`.
///
/// `token` is optional at the type level so that a 200 response without a
/// token decodes cleanly and can be reported as a malformed response
/// instead of a decode failure.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub token: Option<String>,

    /// A `user` that isn't an object is treated as absent.
    #[serde(default, deserialize_with = "lenient_user")]
    pub user: Option<UserInfo>,
}

impl SignInResponse {
    /// The role the backend reported, if any.
    ///
    /// An empty role string counts as "not reported".
    pub fn role(&self) -> Option<Role> {
        self.user
            .as_ref()?
            .role
            .clone()
            .filter(|role| !role.as_str().trim().is_empty())
    }

    /// The issued token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Like [`token`](Self::token), but a missing token is an error.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidPayload`] if the token is absent or empty.
    pub fn require_token(&self) -> Result<&str, ProtocolError> {
        self.token()
            .ok_or_else(|| ProtocolError::InvalidPayload("sign-in response carried no token".into()))
    }
}

impl fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInResponse")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Lenient decoding
// ---------------------------------------------------------------------------

/// Accepts any value for a role. Only `null` means "no role".
struct RoleVisitor;

impl<'de> Visitor<'de> for RoleVisitor {
    type Value = Option<Role>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a role name")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(Role::parse(v)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(Role::Unknown(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Role::Unknown(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Role::Unknown(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(Role::Unknown(v.to_string())))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Some(Role::Unknown("[array]".into())))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Some(Role::Unknown("[object]".into())))
    }
}

fn lenient_role<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Role>, D::Error> {
    d.deserialize_any(RoleVisitor)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeUser {
    User(UserInfo),
    Other(IgnoredAny),
}

fn lenient_user<'de, D: Deserializer<'de>>(d: D) -> Result<Option<UserInfo>, D::Error> {
    Ok(match Option::<MaybeUser>::deserialize(d)? {
        Some(MaybeUser::User(user)) => Some(user),
        Some(MaybeUser::Other(_)) | None => None,
    })
}

/// Error body the backend sends with 4xx/5xx responses.
///
/// The API is not consistent: some endpoints send `error`, others
/// (framework-generated) send `detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// The most specific human-readable message in the body.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().or(self.detail.as_deref())
    }
}
