//! `Shell` builder and the sign-in / sign-out / navigate flow.
//!
//! The shell ties the layers together: the auth API issues a credential,
//! the session service persists it, and the router decides what each
//! navigation shows. It holds no session of its own. Every call reads the
//! session service afresh, so two shells over one store always agree.

use std::sync::Arc;

use rentgate_client::{AuthApi, ClientError};
use rentgate_protocol::{Credentials, Session};
use rentgate_router::{GuardPolicy, NavBar, NavItem, Navigation, RouteTable, Router};
use rentgate_session::{MemoryStore, SessionError, SessionService, SessionStore};

use crate::RentgateError;

/// The outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// The session exactly as it was persisted.
    pub session: Session,
    /// Where the principal should go next.
    pub landing: String,
}

// ---------------------------------------------------------------------------
// ShellBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring a [`Shell`].
///
/// Starts with an in-memory session store, the standard route table, and
/// the default guard policy. An auth API must be supplied before
/// [`build`](ShellBuilder::build) is available.
///
/// # Example
///
/// ```rust,ignore
/// use rentgate::prelude::*;
///
/// let shell = Shell::builder()
///     .session_store(FileStore::new("session.json"))
///     .auth_api(HttpAuthApi::new(ClientConfig::from_env())?)
///     .build();
/// ```
pub struct ShellBuilder<S = MemoryStore, A = ()> {
    store: S,
    api: A,
    policy: GuardPolicy,
    routes: RouteTable,
}

impl ShellBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            api: (),
            policy: GuardPolicy::default(),
            routes: RouteTable::standard(),
        }
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> ShellBuilder<S, A> {
    /// Sets where the session is persisted.
    ///
    /// Pass clones of one `Arc<impl SessionStore>` to several builders to
    /// get shells that see each other's sign-in and sign-out.
    pub fn session_store<S2: SessionStore>(self, store: S2) -> ShellBuilder<S2, A> {
        ShellBuilder {
            store,
            api: self.api,
            policy: self.policy,
            routes: self.routes,
        }
    }

    /// Sets the backend that issues credentials.
    pub fn auth_api<A2: AuthApi>(self, api: A2) -> ShellBuilder<S, A2> {
        ShellBuilder {
            store: self.store,
            api,
            policy: self.policy,
            routes: self.routes,
        }
    }

    /// Sets the guard policy.
    pub fn guard_policy(mut self, policy: GuardPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the standard route table.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }
}

impl<S: SessionStore, A: AuthApi> ShellBuilder<S, A> {
    pub fn build(self) -> Shell<S, A> {
        Shell {
            sessions: Arc::new(SessionService::new(self.store)),
            api: self.api,
            router: Router::new(self.routes, self.policy),
        }
    }
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

/// The application shell.
pub struct Shell<S: SessionStore = MemoryStore, A = ()> {
    sessions: Arc<SessionService<S>>,
    api: A,
    router: Router,
}

impl Shell {
    /// Creates a new builder.
    pub fn builder() -> ShellBuilder {
        ShellBuilder::new()
    }
}

impl<S: SessionStore, A: AuthApi> Shell<S, A> {
    /// Signs in and persists the resulting session.
    ///
    /// The session is committed to the store before this returns, so a
    /// navigation issued right after sees it. A response without a role
    /// is stored as a client.
    ///
    /// # Errors
    /// [`ClientError::MissingCredentials`] if either field is empty (no
    /// request is sent), any other [`ClientError`] from the API, or
    /// [`SessionError`] if the session could not be stored.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, RentgateError> {
        if !credentials.is_complete() {
            return Err(ClientError::MissingCredentials.into());
        }

        let response = self.api.sign_in(credentials).await?;
        let token = response
            .require_token()
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        let session = self
            .sessions
            .set_session(token, response.role())
            .ok_or_else(|| SessionError::Unavailable("session could not be stored".into()))?;

        let landing = self.router.landing(Some(&session)).to_string();
        tracing::info!(role = %session.role, %landing, "signed in");
        Ok(SignedIn { session, landing })
    }

    /// Creates an account, then signs in with the same credentials.
    ///
    /// # Errors
    /// [`ClientError::PasswordMismatch`] if `confirm_password` differs (no
    /// request is sent), the API's error if registration fails, or
    /// [`RentgateError::AutoSignInFailed`] if the account was created but
    /// signing in afterwards failed.
    pub async fn register(
        &self,
        credentials: &Credentials,
        confirm_password: &str,
    ) -> Result<SignedIn, RentgateError> {
        if !credentials.is_complete() {
            return Err(ClientError::MissingCredentials.into());
        }
        if credentials.password != confirm_password {
            return Err(ClientError::PasswordMismatch.into());
        }

        self.api.register(credentials).await?;
        tracing::info!(username = %credentials.username, "registered");

        self.sign_in(credentials).await.map_err(|e| {
            tracing::warn!(error = %e, "registered but could not sign in");
            RentgateError::AutoSignInFailed(Box::new(e))
        })
    }
}

impl<S: SessionStore, A> Shell<S, A> {
    /// Clears the session and returns the route to show next.
    pub fn sign_out(&self) -> &str {
        self.sessions.clear_session();
        tracing::info!("signed out");
        &self.router.policy().sign_in_route
    }

    /// The session as stored right now.
    pub fn session(&self) -> Option<Session> {
        self.sessions.get_session()
    }

    /// Resolves and authorizes `path` against the current session.
    pub fn navigate(&self, path: &str) -> Navigation {
        let session = self.sessions.get_session();
        self.router.navigate(path, session.as_ref())
    }

    /// Where the current principal belongs.
    pub fn landing(&self) -> String {
        let session = self.sessions.get_session();
        self.router.landing(session.as_ref()).to_string()
    }

    /// Navigation actions for the current session.
    pub fn nav_items(&self) -> Vec<NavItem> {
        rentgate_router::nav_items(self.sessions.get_session().as_ref())
    }

    /// The navigation bar for `path`, or `None` on the sign-in and
    /// register pages.
    pub fn nav_bar(&self, path: &str) -> Option<NavBar> {
        rentgate_router::nav_bar(path, self.sessions.get_session().as_ref())
    }

    pub fn sign_in_route(&self) -> &str {
        &self.router.policy().sign_in_route
    }

    /// The shared session service, e.g. for an
    /// [`AuthorizedClient`](rentgate_client::AuthorizedClient).
    pub fn sessions(&self) -> &Arc<SessionService<S>> {
        &self.sessions
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
