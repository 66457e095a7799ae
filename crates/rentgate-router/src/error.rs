//! Error types for the router layer.

/// Errors raised while building a route table.
///
/// Navigation itself never fails: denied access is a redirect, and an
/// unmatched path is [`Navigation::NotFound`](crate::Navigation::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// A route pattern is malformed (no leading `/`, empty segment, or an
    /// unnamed `:` parameter).
    #[error("invalid route pattern {0:?}")]
    InvalidPattern(String),

    /// A route pattern was registered twice. Every view has exactly one
    /// access rule.
    #[error("route {0:?} is already registered")]
    DuplicateRoute(String),
}
