//! Route patterns, access rules, and the route table.

use std::collections::BTreeMap;
use std::fmt;

use rentgate_protocol::Role;

use crate::{RouterError, paths};

/// Values captured from `:name` segments, e.g. `car_id → "42"` for
/// `/rent/42` against `/rent/:car_id`.
pub type RouteParams = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// RoutePattern
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `/operator/fleet` or `/rent/:car_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern.
    ///
    /// # Errors
    /// [`RouterError::InvalidPattern`] if the pattern doesn't start with
    /// `/`, has an empty segment (`/a//b`), or has a `:` with no name.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = || RouterError::InvalidPattern(pattern.to_string());

        let rest = pattern.strip_prefix('/').ok_or_else(invalid)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                let segment = match part.strip_prefix(':') {
                    Some("") => return Err(invalid()),
                    Some(name) => Segment::Param(name.to_string()),
                    None if part.is_empty() => return Err(invalid()),
                    None => Segment::Literal(part.to_string()),
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            raw: normalize(pattern).to_string(),
            segments,
        })
    }

    /// The pattern as registered (without a trailing slash).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a concrete path, returning captured parameters.
    ///
    /// Query strings and fragments are ignored, as is a trailing slash.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let path = strip_query(path);
        let rest = normalize(path).strip_prefix('/')?;

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.insert(name.clone(), part.to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

pub(crate) fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Drops one trailing slash, except on the root path.
pub(crate) fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

// ---------------------------------------------------------------------------
// RouteAccessRule
// ---------------------------------------------------------------------------

/// Which roles may view a protected route.
///
/// An empty role set means "any authenticated principal". Rules are
/// static: they are fixed when the route is registered, never derived
/// from server data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccessRule {
    pattern: RoutePattern,
    allowed_roles: Vec<Role>,
}

impl RouteAccessRule {
    /// A rule restricted to the given roles.
    pub fn new(
        pattern: &str,
        allowed_roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, RouterError> {
        let mut roles: Vec<Role> = Vec::new();
        for role in allowed_roles {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }

        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            allowed_roles: roles,
        })
    }

    /// A rule open to any signed-in principal.
    pub fn any_authenticated(pattern: &str) -> Result<Self, RouterError> {
        Self::new(pattern, Vec::<Role>::new())
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed_roles
    }

    /// Returns `true` if `role` may view this route.
    pub fn permits(&self, role: &Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(role)
    }
}

// ---------------------------------------------------------------------------
// RouteTable
// ---------------------------------------------------------------------------

/// What a concrete path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A public route (sign-in, register). No guard applies.
    Public(&'a RoutePattern),

    /// A protected route and the parameters captured from the path.
    Protected {
        rule: &'a RouteAccessRule,
        params: RouteParams,
    },

    /// The bare root path. It has no view of its own and always sends the
    /// principal to sign-in.
    RootRedirect,

    /// Nothing is registered for this path.
    NotFound,
}

/// The static registry of routes.
///
/// Patterns are checked in registration order; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    public: Vec<RoutePattern>,
    protected: Vec<RouteAccessRule>,
}

impl RouteTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The car-rental application's route surface.
    pub fn standard() -> Self {
        // Every pattern below is a literal constant; failure here is a
        // programming error caught by the tests.
        Self::try_standard().expect("standard route table is valid")
    }

    fn try_standard() -> Result<Self, RouterError> {
        let mut table = Self::new();

        table.add_public(paths::SIGN_IN)?;
        table.add_public(paths::REGISTER)?;

        for path in [
            paths::CARS,
            paths::TERMS,
            paths::PROFILE,
            paths::RENT,
            paths::RENTALS,
        ] {
            table.add_protected(RouteAccessRule::new(path, [Role::Client])?)?;
        }
        for path in [paths::OPERATOR_FLEET, paths::OPERATOR_REQUESTS] {
            table.add_protected(RouteAccessRule::new(path, [Role::Operator])?)?;
        }
        for path in [paths::TECHNICIAN_MAINTENANCE, paths::TECHNICIAN_COMPLETED] {
            table.add_protected(RouteAccessRule::new(path, [Role::Technician])?)?;
        }
        table.add_protected(RouteAccessRule::new(paths::ACCOUNTING, [Role::Accountant])?)?;
        for path in [paths::MANAGER_STATISTICS, paths::MANAGER_FLEET] {
            table.add_protected(RouteAccessRule::new(path, [Role::Manager])?)?;
        }

        Ok(table)
    }

    /// Registers a public route.
    ///
    /// # Errors
    /// [`RouterError::InvalidPattern`] or [`RouterError::DuplicateRoute`].
    pub fn add_public(&mut self, pattern: &str) -> Result<&mut Self, RouterError> {
        let pattern = RoutePattern::parse(pattern)?;
        self.ensure_unregistered(&pattern)?;
        self.public.push(pattern);
        Ok(self)
    }

    /// Registers a protected route with its access rule.
    ///
    /// # Errors
    /// [`RouterError::DuplicateRoute`] if the pattern already has a rule
    /// (or is registered as public).
    pub fn add_protected(&mut self, rule: RouteAccessRule) -> Result<&mut Self, RouterError> {
        self.ensure_unregistered(rule.pattern())?;
        self.protected.push(rule);
        Ok(self)
    }

    fn ensure_unregistered(&self, pattern: &RoutePattern) -> Result<(), RouterError> {
        let taken = self.public.iter().any(|p| p.as_str() == pattern.as_str())
            || self
                .protected
                .iter()
                .any(|r| r.pattern().as_str() == pattern.as_str());
        if taken || pattern.as_str() == paths::ROOT {
            return Err(RouterError::DuplicateRoute(pattern.as_str().to_string()));
        }
        Ok(())
    }

    /// All protected rules, in registration order.
    pub fn rules(&self) -> &[RouteAccessRule] {
        &self.protected
    }

    /// Looks up the rule registered for an exact pattern.
    pub fn rule_for(&self, pattern: &str) -> Option<&RouteAccessRule> {
        let pattern = normalize(pattern);
        self.protected.iter().find(|r| r.pattern().as_str() == pattern)
    }

    /// Resolves a concrete path.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        if normalize(strip_query(path)) == paths::ROOT {
            return Resolution::RootRedirect;
        }
        if let Some(pattern) = self.public.iter().find(|p| p.matches(path).is_some()) {
            return Resolution::Public(pattern);
        }
        for rule in &self.protected {
            if let Some(params) = rule.pattern().matches(path) {
                return Resolution::Protected { rule, params };
            }
        }
        Resolution::NotFound
    }
}
