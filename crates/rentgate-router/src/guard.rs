//! The route authorization guard.
//!
//! The guard answers one question per navigation attempt: may this
//! protected view render for the current session? It is a pure function
//! of (rule, session, policy), so it is re-run on every route change
//! rather than remembered.

use std::fmt;

use rentgate_protocol::{Role, Session};
use serde::{Deserialize, Serialize};

use crate::{RouteAccessRule, landing_route, paths};

// ---------------------------------------------------------------------------
// GuardPolicy
// ---------------------------------------------------------------------------

/// Where an authenticated principal goes when their role isn't allowed on
/// the requested route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrongRoleRedirect {
    /// To the principal's own landing route (see [`landing_route`]).
    /// Never loops: a role's landing route is always allowed for it.
    RoleLanding,

    /// Always to one fixed path.
    Fixed(String),
}

/// Guard configuration.
///
/// The defaults send unauthenticated principals to `/login`, wrong-role
/// principals to their own landing page, and principals with an
/// unrecognized role to `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardPolicy {
    /// Where an absent session is sent.
    pub sign_in_route: String,

    /// Where a wrong-role principal is sent.
    pub wrong_role_redirect: WrongRoleRedirect,

    /// Landing route for a role outside the known set.
    pub fallback_landing: String,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            sign_in_route: paths::SIGN_IN.to_string(),
            wrong_role_redirect: WrongRoleRedirect::RoleLanding,
            fallback_landing: paths::ROOT.to_string(),
        }
    }
}

impl GuardPolicy {
    pub fn sign_in_route(mut self, route: impl Into<String>) -> Self {
        self.sign_in_route = route.into();
        self
    }

    pub fn wrong_role_redirect(mut self, redirect: WrongRoleRedirect) -> Self {
        self.wrong_role_redirect = redirect;
        self
    }

    pub fn fallback_landing(mut self, route: impl Into<String>) -> Self {
        self.fallback_landing = route.into();
        self
    }

    /// The landing route for `role` under this policy.
    pub fn landing_for<'a>(&'a self, role: &Role) -> &'a str {
        landing_route(role, &self.fallback_landing)
    }

    /// The redirect target for a principal with `role` who was refused.
    pub fn wrong_role_target<'a>(&'a self, role: &Role) -> &'a str {
        match &self.wrong_role_redirect {
            WrongRoleRedirect::RoleLanding => self.landing_for(role),
            WrongRoleRedirect::Fixed(path) => path.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Why the guard refused a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session: nobody is signed in.
    MissingSession,
    /// Signed in, but the role isn't allowed on this route.
    WrongRole,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSession => write!(f, "missing session"),
            Self::WrongRole => write!(f, "wrong role"),
        }
    }
}

/// The guard's decision for one navigation attempt.
///
/// Redirects are silent: the principal simply lands somewhere else. The
/// reason is carried for logging, not for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested view unmodified.
    Render,
    /// Go somewhere else instead.
    Redirect { to: String, reason: DenyReason },
}

impl GuardOutcome {
    /// The terminal [`GuardState`] this outcome corresponds to.
    pub fn state(&self) -> GuardState {
        match self {
            Self::Render => GuardState::Rendered,
            Self::Redirect {
                reason: DenyReason::MissingSession,
                ..
            } => GuardState::RedirectedToSignIn,
            Self::Redirect {
                reason: DenyReason::WrongRole,
                ..
            } => GuardState::RedirectedToDefault,
        }
    }
}

/// Decides whether `rule`'s view may render for `session`.
///
/// 1. No session → sign-in, whatever the rule allows. The role is never
///    looked at.
/// 2. Role not permitted → the policy's wrong-role target (never sign-in).
/// 3. Otherwise → render.
pub fn authorize(
    rule: &RouteAccessRule,
    session: Option<&Session>,
    policy: &GuardPolicy,
) -> GuardOutcome {
    let Some(session) = session else {
        return GuardOutcome::Redirect {
            to: policy.sign_in_route.clone(),
            reason: DenyReason::MissingSession,
        };
    };

    if !rule.permits(&session.role) {
        return GuardOutcome::Redirect {
            to: policy.wrong_role_target(&session.role).to_string(),
            reason: DenyReason::WrongRole,
        };
    }

    GuardOutcome::Render
}

// ---------------------------------------------------------------------------
// GuardState
// ---------------------------------------------------------------------------

/// The guard's state for a single navigation attempt.
///
/// ```text
///              ┌──→ RedirectedToSignIn
/// Unchecked ───┼──→ RedirectedToDefault
///              └──→ Rendered
/// ```
///
/// Every state other than `Unchecked` is terminal. A refused navigation is
/// never retried; the principal has to do something new (sign in, or go
/// elsewhere), which starts a fresh attempt at `Unchecked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Unchecked,
    RedirectedToSignIn,
    RedirectedToDefault,
    Rendered,
}

impl GuardState {
    /// Returns `true` once the attempt has been decided.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unchecked)
    }

    /// Returns `true` if moving from `self` to `target` is a legal step.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(self, Self::Unchecked) && target.is_terminal()
    }
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchecked => write!(f, "Unchecked"),
            Self::RedirectedToSignIn => write!(f, "Redirected(sign-in)"),
            Self::RedirectedToDefault => write!(f, "Redirected(default)"),
            Self::Rendered => write!(f, "Rendered"),
        }
    }
}
