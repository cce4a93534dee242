//! Audit log entry model as returned by the backend.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::action::{AuditAction, AuditStatus};

/// Backend identifier of an audit entry; integer or opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    /// Numeric primary key.
    Int(i64),
    /// Opaque string key (UUID, ULID, ...).
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// The user who performed an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User identifier.
    pub id: EntryId,
    /// Display name, when the backend includes it.
    #[serde(default)]
    pub name: Option<String>,
    /// E-mail address, when the backend includes it.
    #[serde(default)]
    pub email: Option<String>,
}

impl Actor {
    /// Best human-readable label for this actor.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// An immutable record of one system action. Entries are only ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// What was done.
    pub action: AuditAction,
    /// Who did it; absent for system-initiated actions.
    #[serde(default, alias = "user")]
    pub actor: Option<Actor>,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// Originating network address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Type of the affected domain object.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Identifier of the affected domain object.
    #[serde(default)]
    pub resource_id: Option<EntryId>,
    /// Outcome of the action.
    pub status: AuditStatus,
    /// Supplementary context.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let bag: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(bag.unwrap_or_default())
}

impl AuditLogEntry {
    /// Whether the backend recorded this action without a user.
    pub fn is_system(&self) -> bool {
        self.actor.is_none()
    }

    /// `type#id` label for the affected resource, if any.
    pub fn resource_label(&self) -> Option<String> {
        match (&self.resource_type, &self.resource_id) {
            (Some(kind), Some(id)) => Some(format!("{kind}#{id}")),
            (Some(kind), None) => Some(kind.clone()),
            (None, Some(id)) => Some(format!("#{id}")),
            (None, None) => None,
        }
    }
}
