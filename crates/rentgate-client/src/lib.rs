//! The auth API collaborator for Rentgate.
//!
//! Provides the [`AuthApi`] trait, the seam between the application shell
//! and whatever backend issues session credentials, and an HTTP
//! implementation for the car-rental REST API.
//!
//! # Feature Flags
//!
//! - `http` (default): [`HttpAuthApi`] and [`AuthorizedClient`] via `reqwest`

#![allow(async_fn_in_trait)]

mod config;
mod error;
#[cfg(feature = "http")]
mod http;

pub use config::{ClientConfig, ENV_API_TIMEOUT_SECS, ENV_API_URL};
pub use error::{ClientError, FieldErrors};
#[cfg(feature = "http")]
pub use http::{AuthorizedClient, HttpAuthApi};

use std::sync::Arc;

use rentgate_protocol::{Credentials, SignInResponse};

/// REST endpoint paths, relative to [`ClientConfig::base_url`].
pub mod endpoints {
    pub const SIGN_IN: &str = "/auth/login/";
    pub const REGISTER: &str = "/auth/register/";
    pub const PROFILE: &str = "/auth/profile/";
}

/// Issues session credentials.
///
/// Implementations do not touch the session store. Persisting whatever
/// `sign_in` returns is the caller's job, so a test double here never
/// needs a store of its own.
pub trait AuthApi: Send + Sync + 'static {
    /// Exchanges credentials for a token and (maybe) a role.
    ///
    /// On `Ok`, the response carries a non-empty token.
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, ClientError>;

    /// Creates an account. Does not sign in.
    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError>;
}

impl<A: AuthApi> AuthApi for Arc<A> {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, ClientError> {
        (**self).sign_in(credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        (**self).register(credentials).await
    }
}
