//! Shared vocabulary for Rentgate.
//!
//! This crate defines the types every other layer speaks:
//!
//! - **Roles** ([`Role`]): the closed set of principals the rental
//!   platform knows about, plus an explicit [`Role::Unknown`] for values
//!   that arrive from the network but are not in that set.
//! - **Sessions** ([`Session`]): the (credential token, role) pair that
//!   represents "someone is signed in".
//! - **Wire payloads** ([`Credentials`], [`SignInResponse`], ...): the
//!   minimal shape of the auth API that the front-end depends on.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   turned into bytes for storage and HTTP bodies.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about storage, routing, or HTTP. It
//! only defines data and how to serialize it.
//!
//! ```text
//! Client (HTTP bytes) → Protocol (SignInResponse) → Session (persisted pair)
//! ```

mod codec;
mod error;
mod role;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use role::Role;
pub use types::{ApiErrorBody, Credentials, Session, SignInResponse, UserInfo};
