//! Integration tests for the application shell.
//!
//! A scripted `AuthApi` stands in for the backend so these tests exercise
//! the whole sign-in → persist → navigate path without a network.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rentgate::prelude::*;
use rentgate_protocol::{SignInResponse, UserInfo};

// -- Helpers ----------------------------------------------------------------

/// An `AuthApi` with a fixed user table. Records how many requests it saw.
#[derive(Default)]
struct ScriptedApi {
    users: Mutex<HashMap<String, (String, Option<Role>)>>,
    fail_sign_in: Mutex<bool>,
    calls: Mutex<usize>,
}

impl ScriptedApi {
    fn with_user(self, username: &str, token: &str, role: Option<Role>) -> Self {
        self.users
            .lock()
            .insert(username.to_string(), (token.to_string(), role));
        self
    }

    fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl AuthApi for ScriptedApi {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, ClientError> {
        *self.calls.lock() += 1;
        if *self.fail_sign_in.lock() {
            return Err(ClientError::Server);
        }
        if credentials.password != "secret" {
            return Err(ClientError::InvalidCredentials("Invalid credentials".into()));
        }
        let users = self.users.lock();
        let (token, role) = users
            .get(&credentials.username)
            .ok_or_else(|| ClientError::InvalidCredentials("Invalid credentials".into()))?;
        Ok(SignInResponse {
            token: Some(token.clone()),
            user: Some(UserInfo {
                username: Some(credentials.username.clone()),
                role: role.clone(),
            }),
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        *self.calls.lock() += 1;
        let mut users = self.users.lock();
        if users.contains_key(&credentials.username) {
            let mut fields = rentgate_client::FieldErrors::new();
            fields.insert("username".into(), vec!["already exists".into()]);
            return Err(ClientError::Rejected { fields });
        }
        users.insert(
            credentials.username.clone(),
            (format!("{}-tok", credentials.username), None),
        );
        Ok(())
    }
}

fn shell(api: ScriptedApi) -> Shell<MemoryStore, ScriptedApi> {
    Shell::builder().auth_api(api).build()
}

fn alice() -> ScriptedApi {
    ScriptedApi::default().with_user("alice", "abc123", Some(Role::Operator))
}

fn routes(items: &[NavItem]) -> Vec<&'static str> {
    items.iter().map(|i| i.route).collect()
}

// =========================================================================
// sign_in()
// =========================================================================

#[tokio::test]
async fn test_sign_in_operator_persists_session_and_lands_on_fleet() {
    let shell = shell(alice());

    let signed_in = shell
        .sign_in(&Credentials::new("alice", "secret"))
        .await
        .expect("sign-in should succeed");

    assert_eq!(signed_in.session, Session::new("abc123", Role::Operator));
    assert_eq!(signed_in.landing, "/operator/fleet");
    assert_eq!(shell.session(), Some(Session::new("abc123", Role::Operator)));
    assert_eq!(
        routes(&shell.nav_items()),
        ["/operator/fleet", "/operator/requests"]
    );
}

#[tokio::test]
async fn test_sign_in_then_navigate_to_landing_renders_immediately() {
    let shell = shell(alice());

    let signed_in = shell.sign_in(&Credentials::new("alice", "secret")).await.unwrap();

    assert!(matches!(
        shell.navigate(&signed_in.landing),
        Navigation::Render { .. }
    ));
}

#[tokio::test]
async fn test_sign_in_without_role_stores_client() {
    let shell = shell(ScriptedApi::default().with_user("bob", "bob-tok", None));

    let signed_in = shell.sign_in(&Credentials::new("bob", "secret")).await.unwrap();

    assert_eq!(signed_in.session.role, Role::Client);
    assert_eq!(signed_in.landing, "/cars");
    assert_eq!(shell.session().map(|s| s.role), Some(Role::Client));
}

#[tokio::test]
async fn test_sign_in_unknown_role_gets_empty_nav_and_fallback_landing() {
    let shell = shell(ScriptedApi::default().with_user("eve", "t", Some(Role::from("auditor"))));

    let signed_in = shell.sign_in(&Credentials::new("eve", "secret")).await.unwrap();

    assert_eq!(signed_in.landing, "/");
    assert!(shell.nav_items().is_empty());
    assert_eq!(
        shell.navigate("/"),
        Navigation::Redirect {
            to: "/login".into(),
            reason: RedirectReason::Root
        }
    );
}

#[tokio::test]
async fn test_sign_in_bad_password_stores_nothing() {
    let shell = shell(alice());

    let err = shell
        .sign_in(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.client_error(),
        Some(ClientError::InvalidCredentials(_))
    ));
    assert_eq!(shell.session(), None);
}

#[tokio::test]
async fn test_sign_in_empty_token_is_malformed_and_stores_nothing() {
    let shell = shell(ScriptedApi::default().with_user("ghost", "", Some(Role::Client)));

    let err = shell.sign_in(&Credentials::new("ghost", "secret")).await.unwrap_err();

    assert!(
        matches!(err.client_error(), Some(ClientError::MalformedResponse(_))),
        "got {err:?}"
    );
    assert_eq!(shell.session(), None);
}

#[tokio::test]
async fn test_sign_in_empty_field_sends_no_request() {
    let shell = shell(alice());

    let err = shell.sign_in(&Credentials::new("", "secret")).await.unwrap_err();

    assert!(matches!(err.client_error(), Some(ClientError::MissingCredentials)));
    assert_eq!(shell.api().calls(), 0);
}

// =========================================================================
// register()
// =========================================================================

#[tokio::test]
async fn test_register_then_signs_in_as_client() {
    let shell = shell(ScriptedApi::default());

    let signed_in = shell
        .register(&Credentials::new("carol", "secret"), "secret")
        .await
        .expect("registration should sign in");

    assert_eq!(signed_in.session, Session::new("carol-tok", Role::Client));
    assert_eq!(signed_in.landing, "/cars");
}

#[tokio::test]
async fn test_register_password_mismatch_sends_no_request() {
    let shell = shell(ScriptedApi::default());

    let err = shell
        .register(&Credentials::new("carol", "secret"), "secrets")
        .await
        .unwrap_err();

    assert!(matches!(err.client_error(), Some(ClientError::PasswordMismatch)));
    assert_eq!(shell.api().calls(), 0);
}

#[tokio::test]
async fn test_register_taken_username_is_rejected() {
    let shell = shell(alice());

    let err = shell
        .register(&Credentials::new("alice", "secret"), "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, RentgateError::Client(ClientError::Rejected { .. })));
    assert_eq!(shell.session(), None);
}

#[tokio::test]
async fn test_register_sign_in_failure_is_auto_sign_in_failed() {
    let api = ScriptedApi::default();
    *api.fail_sign_in.lock() = true;
    let shell = shell(api);

    let err = shell
        .register(&Credentials::new("carol", "secret"), "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, RentgateError::AutoSignInFailed(_)), "got {err:?}");
    assert_eq!(shell.session(), None);
    assert_eq!(shell.sign_in_route(), "/login");
}

// =========================================================================
// sign_out() and shared sessions
// =========================================================================

#[tokio::test]
async fn test_sign_out_then_protected_route_redirects_to_sign_in() {
    let shell = shell(alice());
    shell.sign_in(&Credentials::new("alice", "secret")).await.unwrap();

    let next = shell.sign_out().to_string();

    assert_eq!(next, "/login");
    assert_eq!(shell.session(), None);
    assert_eq!(
        shell.navigate("/operator/fleet"),
        Navigation::Redirect {
            to: "/login".into(),
            reason: RedirectReason::MissingSession
        }
    );
    assert_eq!(routes(&shell.nav_items()), ["/login", "/register"]);
}

#[tokio::test]
async fn test_sign_out_in_one_shell_is_seen_by_another() {
    let store = Arc::new(MemoryStore::new());
    let api = Arc::new(alice());
    let view_a = Shell::builder()
        .session_store(Arc::clone(&store))
        .auth_api(Arc::clone(&api))
        .build();
    let view_b = Shell::builder()
        .session_store(Arc::clone(&store))
        .auth_api(Arc::clone(&api))
        .build();

    view_a.sign_in(&Credentials::new("alice", "secret")).await.unwrap();
    assert!(matches!(view_b.navigate("/operator/requests"), Navigation::Render { .. }));

    view_a.sign_out();

    assert_eq!(view_b.navigate("/operator/requests").target(), Some("/login"));
}

#[tokio::test]
async fn test_nav_bar_follows_session() {
    let shell = shell(alice());
    assert_eq!(shell.nav_bar("/login"), None);
    assert!(!shell.nav_bar("/cars").unwrap().show_sign_out);

    shell.sign_in(&Credentials::new("alice", "secret")).await.unwrap();

    let bar = shell.nav_bar("/operator/fleet").unwrap();
    assert!(bar.show_sign_out);
    assert_eq!(bar.items.len(), 2);
}

// =========================================================================
// Configuration
// =========================================================================

#[tokio::test]
async fn test_fixed_wrong_role_policy_redirects_to_root() {
    let shell = Shell::builder()
        .guard_policy(GuardPolicy::default().wrong_role_redirect(WrongRoleRedirect::Fixed("/".into())))
        .auth_api(alice())
        .build();
    shell.sign_in(&Credentials::new("alice", "secret")).await.unwrap();

    assert_eq!(
        shell.navigate("/cars"),
        Navigation::Redirect {
            to: "/".into(),
            reason: RedirectReason::WrongRole
        }
    );
}

#[tokio::test]
async fn test_file_store_session_survives_a_new_shell() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = Shell::builder()
        .session_store(FileStore::new(&path))
        .auth_api(alice())
        .build();
    first.sign_in(&Credentials::new("alice", "secret")).await.unwrap();
    drop(first);

    let second = Shell::builder()
        .session_store(FileStore::new(&path))
        .auth_api(alice())
        .build();

    assert_eq!(second.session(), Some(Session::new("abc123", Role::Operator)));
    assert_eq!(second.landing(), "/operator/fleet");
}
