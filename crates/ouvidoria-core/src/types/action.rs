//! Enumerated action kinds, outcome statuses and the action filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of system action recorded in an audit entry.
///
/// Values the backend introduces later are kept verbatim in
/// [`AuditAction::Other`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuditAction {
    /// A user signed in.
    Login,
    /// A user signed out.
    Logout,
    /// A resource was created.
    Create,
    /// A resource was updated.
    Update,
    /// A resource was deleted.
    Delete,
    /// A resource was viewed.
    View,
    /// Data was exported.
    Export,
    /// Any action kind not listed above.
    Other(String),
}

impl AuditAction {
    /// Wire representation used in query strings and JSON bodies.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::View => "view",
            Self::Export => "export",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = std::convert::Infallible;

    /// Matching is exact so that a value read from the backend is sent back unchanged.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "login" => Self::Login,
            "logout" => Self::Logout,
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "view" => Self::View,
            "export" => Self::Export,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for AuditAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AuditAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(action) = raw.parse();
        Ok(action)
    }
}

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    /// The action completed.
    Success,
    /// The action completed with a warning.
    Warning,
    /// The action failed.
    Failure,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// Action-type selection in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ActionFilter {
    /// No action restriction.
    #[default]
    All,
    /// Only entries with this action.
    Only(AuditAction),
}

impl ActionFilter {
    /// Parse a filter selection, where `"all"` or an empty string means no restriction.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            let Ok(action) = trimmed.parse();
            Self::Only(action)
        }
    }

    /// The selected action, if any.
    pub fn action(&self) -> Option<&AuditAction> {
        match self {
            Self::All => None,
            Self::Only(action) => Some(action),
        }
    }
}

impl fmt::Display for ActionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(action) => action.fmt(f),
        }
    }
}

/// One entry of the backend-provided action option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    /// Value sent back in the `action` query parameter.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}
