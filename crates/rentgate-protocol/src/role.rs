//! The closed set of roles a principal can hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role a signed-in principal holds.
///
/// The rental platform knows exactly five roles. Anything else that comes
/// back from the backend (or is found in storage) is parsed into
/// [`Role::Unknown`] instead of being rejected, so the fallback path is a
/// real variant that `match` forces every caller to handle.
///
/// On the wire and in storage a role is a lowercase string:
///
/// ```text
/// "client" | "operator" | "technician" | "accountant" | "manager"
/// ```
///
/// `#[serde(from = "String", into = "String")]` routes serde through the
/// `From` impls below, so `"auditor"` deserializes to
/// `Role::Unknown("auditor")` and serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Rents cars: catalog, terms, profile, rent wizard, own rentals.
    #[default]
    Client,
    /// Fleet operator: car fleet and rental requests.
    Operator,
    /// Maintenance technician: open and completed maintenance work.
    Technician,
    /// Accountant: accounting summaries and reports.
    Accountant,
    /// Manager: statistics and fleet overview.
    Manager,
    /// A role value outside the known set. Carries the raw string for
    /// diagnostics.
    Unknown(String),
}

impl Role {
    /// Every known role, in a stable order.
    pub const KNOWN: [Role; 5] = [
        Role::Client,
        Role::Operator,
        Role::Technician,
        Role::Accountant,
        Role::Manager,
    ];

    /// Parses a raw role string. Never fails.
    ///
    /// Matching is exact: the backend sends lowercase names, and a value in
    /// any other spelling is treated as unknown rather than guessed at.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "client" => Self::Client,
            "operator" => Self::Operator,
            "technician" => Self::Technician,
            "accountant" => Self::Accountant,
            "manager" => Self::Manager,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the wire/storage name of this role.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Client => "client",
            Self::Operator => "operator",
            Self::Technician => "technician",
            Self::Accountant => "accountant",
            Self::Manager => "manager",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns `true` for the five roles the platform knows about.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match Self::parse(&raw) {
            // Reuse the allocation we were handed.
            Self::Unknown(_) => Self::Unknown(raw),
            known => known,
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
