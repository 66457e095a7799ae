//! # Rentgate
//!
//! Session and role-gated navigation for a car-rental management front-end.
//!
//! Rentgate owns three things: who is signed in, which views they may
//! reach, and which navigation actions they see. Everything else lives
//! behind the REST API. Five roles are served: client, fleet operator,
//! maintenance technician, accountant, and manager.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rentgate::prelude::*;
//!
//! # async fn run() -> Result<(), RentgateError> {
//! let shell = Shell::builder()
//!     .auth_api(HttpAuthApi::new(ClientConfig::from_env())?)
//!     .build();
//!
//! let signed_in = shell.sign_in(&Credentials::new("alice", "secret")).await?;
//! match shell.navigate(&signed_in.landing) {
//!     Navigation::Render { route, .. } => println!("showing {route}"),
//!     Navigation::Redirect { to, .. } => println!("redirected to {to}"),
//!     Navigation::NotFound => println!("no such page"),
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod shell;

pub use error::RentgateError;
pub use shell::{Shell, ShellBuilder, SignedIn};

/// Convenient re-exports of the most commonly used types.
pub mod prelude {
    pub use crate::{RentgateError, Shell, ShellBuilder, SignedIn};

    pub use rentgate_client::{AuthApi, AuthorizedClient, ClientConfig, ClientError, HttpAuthApi};
    pub use rentgate_protocol::{Credentials, Role, Session};
    pub use rentgate_router::{
        GuardPolicy, NavBar, NavItem, Navigation, RedirectReason, RouteTable, Router,
        WrongRoleRedirect,
    };
    pub use rentgate_session::{FileStore, MemoryStore, SessionService, SessionStore};
}
