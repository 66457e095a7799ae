//! Route authorization and role navigation for Rentgate.
//!
//! Everything in this crate is synchronous and pure: given a path and the
//! session as it stands *right now*, decide what happens. Nothing here
//! reads storage or caches a decision, so callers re-read the session
//! before every call.
//!
//! # Key types
//!
//! - [`RouteTable`]: the static registry of public routes and protected
//!   [`RouteAccessRule`]s
//! - [`authorize`] / [`GuardPolicy`]: the per-navigation guard decision
//! - [`GuardState`]: the guard's per-navigation state machine
//! - [`nav_items`] / [`landing_route`] / [`nav_bar`]: the role-to-navigation
//!   projector
//! - [`Router`]: resolve + authorize in one call

mod error;
mod guard;
mod nav;
pub mod paths;
mod route;
mod router;

pub use error::RouterError;
pub use guard::{DenyReason, GuardOutcome, GuardPolicy, GuardState, WrongRoleRedirect, authorize};
pub use nav::{NavBar, NavItem, landing_route, nav_bar, nav_items, role_nav};
pub use route::{Resolution, RouteAccessRule, RouteParams, RoutePattern, RouteTable};
pub use router::{Navigation, RedirectReason, Router};
