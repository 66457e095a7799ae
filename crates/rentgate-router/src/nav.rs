//! Role-to-navigation projection.
//!
//! Pure lookups from the current session to what the navigation bar shows
//! and where a freshly signed-in principal lands. Recomputed on every
//! render from the session as it is now; nothing is memoized, so sign-in
//! and sign-out show up immediately.

use rentgate_protocol::{Role, Session};
use serde::Serialize;

use crate::{paths, route};

/// One navigation action: a label and the route it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
}

const fn item(label: &'static str, route: &'static str) -> NavItem {
    NavItem { label, route }
}

const SIGNED_OUT: &[NavItem] = &[item("Sign in", paths::SIGN_IN), item("Register", paths::REGISTER)];

const CLIENT: &[NavItem] = &[
    item("Cars", paths::CARS),
    item("Terms", paths::TERMS),
    item("My rentals", paths::RENTALS),
    item("Profile", paths::PROFILE),
];

const OPERATOR: &[NavItem] = &[
    item("Fleet", paths::OPERATOR_FLEET),
    item("Requests", paths::OPERATOR_REQUESTS),
];

const TECHNICIAN: &[NavItem] = &[item("Maintenance", paths::TECHNICIAN_MAINTENANCE)];

const ACCOUNTANT: &[NavItem] = &[item("Accounting", paths::ACCOUNTING)];

const MANAGER: &[NavItem] = &[
    item("Statistics", paths::MANAGER_STATISTICS),
    item("Fleet overview", paths::MANAGER_FLEET),
];

/// The static navigation table for a role. Unknown roles get nothing.
pub fn role_nav(role: &Role) -> &'static [NavItem] {
    match role {
        Role::Client => CLIENT,
        Role::Operator => OPERATOR,
        Role::Technician => TECHNICIAN,
        Role::Accountant => ACCOUNTANT,
        Role::Manager => MANAGER,
        Role::Unknown(_) => &[],
    }
}

/// The navigation actions for the current session.
///
/// Without a session this is always exactly sign-in and register, no
/// matter what role may still be lying around in storage: the role is
/// only read once a session exists.
pub fn nav_items(session: Option<&Session>) -> Vec<NavItem> {
    let Some(session) = session else {
        return SIGNED_OUT.to_vec();
    };

    if let Role::Unknown(raw) = &session.role {
        tracing::warn!(role = %raw, "unrecognized role, showing no navigation");
    }
    role_nav(&session.role).to_vec()
}

/// Where a principal with `role` lands after signing in.
///
/// Roles outside the known set land on `fallback`.
pub fn landing_route<'a>(role: &Role, fallback: &'a str) -> &'a str {
    match role {
        Role::Client => paths::CARS,
        Role::Operator => paths::OPERATOR_FLEET,
        Role::Technician => paths::TECHNICIAN_MAINTENANCE,
        Role::Accountant => paths::ACCOUNTING,
        Role::Manager => paths::MANAGER_STATISTICS,
        Role::Unknown(_) => fallback,
    }
}

/// What the navigation bar shows on a given page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub items: Vec<NavItem>,
    /// The sign-out action appears only while a session exists.
    pub show_sign_out: bool,
}

/// Projects the navigation bar for `path`.
///
/// The sign-in and register pages have no navigation bar at all.
pub fn nav_bar(path: &str, session: Option<&Session>) -> Option<NavBar> {
    let page = route::normalize(route::strip_query(path));
    if page == paths::SIGN_IN || page == paths::REGISTER {
        return None;
    }

    Some(NavBar {
        items: nav_items(session),
        show_sign_out: session.is_some(),
    })
}
