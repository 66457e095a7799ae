//! `Router`: resolve a path and run the guard in one step.

use std::fmt;

use rentgate_protocol::Session;

use crate::{
    DenyReason, GuardOutcome, GuardPolicy, GuardState, Resolution, RouteParams, RouteTable,
    authorize,
};

/// Why a navigation was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// The guard found no session.
    MissingSession,
    /// The guard found a session whose role isn't allowed.
    WrongRole,
    /// The bare root path, which always goes to sign-in.
    Root,
}

impl From<DenyReason> for RedirectReason {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::MissingSession => Self::MissingSession,
            DenyReason::WrongRole => Self::WrongRole,
        }
    }
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSession => write!(f, "missing session"),
            Self::WrongRole => write!(f, "wrong role"),
            Self::Root => write!(f, "root"),
        }
    }
}

/// The result of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show the view registered under `route`.
    Render { route: String, params: RouteParams },

    /// Silently go to `to` instead.
    Redirect { to: String, reason: RedirectReason },

    /// No view is registered for the requested path.
    NotFound,
}

impl Navigation {
    /// The route that ends up on screen, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Render { route, .. } => Some(route),
            Self::Redirect { to, .. } => Some(to),
            Self::NotFound => None,
        }
    }
}

/// A route table plus the guard policy that applies to it.
///
/// The router holds no session and no cached decisions. Every call to
/// [`navigate`](Self::navigate) takes the session as it is at that moment.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
    policy: GuardPolicy,
}

impl Router {
    pub fn new(table: RouteTable, policy: GuardPolicy) -> Self {
        Self { table, policy }
    }

    /// The application's routes with the default policy.
    pub fn standard() -> Self {
        Self::new(RouteTable::standard(), GuardPolicy::default())
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Where a principal should land: sign-in without a session, the
    /// role's landing route with one.
    pub fn landing(&self, session: Option<&Session>) -> &str {
        match session {
            None => &self.policy.sign_in_route,
            Some(session) => self.policy.landing_for(&session.role),
        }
    }

    /// Resolves `path` and, for protected routes, runs the guard.
    pub fn navigate(&self, path: &str, session: Option<&Session>) -> Navigation {
        let navigation = match self.table.resolve(path) {
            Resolution::RootRedirect => Navigation::Redirect {
                to: self.policy.sign_in_route.clone(),
                reason: RedirectReason::Root,
            },
            Resolution::Public(pattern) => Navigation::Render {
                route: pattern.as_str().to_string(),
                params: RouteParams::new(),
            },
            Resolution::Protected { rule, params } => {
                // Each call is a fresh attempt; it starts unchecked and the
                // guard moves it to exactly one terminal state.
                let attempt = GuardState::default();
                let outcome = authorize(rule, session, &self.policy);
                let state = outcome.state();
                debug_assert!(attempt.can_transition_to(state));
                tracing::trace!(%path, from = %attempt, to = %state, "guard decided");

                match outcome {
                    GuardOutcome::Render => Navigation::Render {
                        route: rule.pattern().as_str().to_string(),
                        params,
                    },
                    GuardOutcome::Redirect { to, reason } => Navigation::Redirect {
                        to,
                        reason: reason.into(),
                    },
                }
            }
            Resolution::NotFound => Navigation::NotFound,
        };

        match &navigation {
            Navigation::Redirect { to, reason } => {
                tracing::debug!(%path, %to, %reason, "navigation redirected");
            }
            Navigation::Render { route, .. } => {
                tracing::debug!(%path, %route, "navigation rendered");
            }
            Navigation::NotFound => tracing::debug!(%path, "no route"),
        }

        navigation
    }
}

#[cfg(test)]
mod tests {
    use rentgate_protocol::Role;

    use super::*;
    use crate::{WrongRoleRedirect, paths};

    fn session(role: Role) -> Session {
        Session::new("tok", role)
    }

    #[test]
    fn test_navigate_root_redirects_to_sign_in() {
        let router = Router::standard();

        for s in [None, Some(session(Role::Manager))] {
            assert_eq!(
                router.navigate("/", s.as_ref()),
                Navigation::Redirect {
                    to: "/login".into(),
                    reason: RedirectReason::Root
                }
            );
        }
    }

    #[test]
    fn test_navigate_public_route_renders_without_session() {
        let router = Router::standard();

        let nav = router.navigate("/register", None);

        assert_eq!(nav.target(), Some("/register"));
        assert!(matches!(nav, Navigation::Render { .. }));
    }

    #[test]
    fn test_navigate_protected_route_passes_params_through() {
        let router = Router::standard();

        let nav = router.navigate("/rent/42", Some(&session(Role::Client)));

        match nav {
            Navigation::Render { route, params } => {
                assert_eq!(route, paths::RENT);
                assert_eq!(params["car_id"], "42");
            }
            other => panic!("expected Render, got {other:?}"),
        }
    }

    #[test]
    fn test_navigate_unmatched_path_is_not_found() {
        let router = Router::standard();
        assert_eq!(router.navigate("/admin", None), Navigation::NotFound);
        assert_eq!(Navigation::NotFound.target(), None);
    }

    #[test]
    fn test_navigate_wrong_role_with_root_policy_lands_on_root() {
        let policy = GuardPolicy::default().wrong_role_redirect(WrongRoleRedirect::Fixed("/".into()));
        let router = Router::new(RouteTable::standard(), policy);

        let nav = router.navigate(paths::ACCOUNTING, Some(&session(Role::Client)));

        assert_eq!(
            nav,
            Navigation::Redirect {
                to: "/".into(),
                reason: RedirectReason::WrongRole
            }
        );
    }

    #[test]
    fn test_navigate_protected_outcome_follows_guard_state() {
        let router = Router::standard();
        let sessions: Vec<Option<Session>> = std::iter::once(None)
            .chain(Role::KNOWN.iter().cloned().map(session).map(Some))
            .collect();

        for rule in router.table().rules() {
            let path = rule.pattern().as_str().replace(":car_id", "7");
            for s in &sessions {
                let state = authorize(rule, s.as_ref(), router.policy()).state();
                assert!(GuardState::Unchecked.can_transition_to(state));

                match (router.navigate(&path, s.as_ref()), state) {
                    (Navigation::Render { .. }, GuardState::Rendered)
                    | (
                        Navigation::Redirect { reason: RedirectReason::MissingSession, .. },
                        GuardState::RedirectedToSignIn,
                    )
                    | (
                        Navigation::Redirect { reason: RedirectReason::WrongRole, .. },
                        GuardState::RedirectedToDefault,
                    ) => {}
                    (nav, state) => panic!("{path}: {nav:?} does not match {state}"),
                }
            }
        }
    }

    #[test]
    fn test_landing_without_session_is_sign_in() {
        let router = Router::standard();
        assert_eq!(router.landing(None), "/login");
        assert_eq!(router.landing(Some(&session(Role::Technician))), "/technician/maintenance");
        assert_eq!(router.landing(Some(&session(Role::Unknown("auditor".into())))), "/");
    }
}
