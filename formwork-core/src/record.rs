//! Profile records and the roles they can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profile as its owner commits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub avatar_url: String,
    /// Selector value; empty means no role picked yet.
    pub role: String,
    pub bio: String,
    pub location: String,
    pub is_online: bool,
    /// Display order is preserved; duplicates are allowed.
    pub tags: Vec<String>,
}

impl Record {
    /// True when nothing has been filled in yet.
    ///
    /// Avatar URL and online status do not count as data.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.role.trim().is_empty()
            && self.location.trim().is_empty()
            && self.bio.trim().is_empty()
            && self.tags.is_empty()
    }

    /// Parses the role field, `None` when unselected or unknown.
    pub fn typed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Roles known to the permission rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a selector value names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Editor" => Ok(Role::Editor),
            "Viewer" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// One entry in the role selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOption {
    pub value: String,
    pub label: String,
}

impl RoleOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Selector options for every known role.
pub fn role_options() -> Vec<RoleOption> {
    Role::ALL
        .iter()
        .map(|r| RoleOption::new(r.as_str(), r.as_str()))
        .collect()
}

/// Unique identifier for a roster member.
pub type MemberId = Uuid;

/// A record held in a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub record: Record,
    /// Added but never saved.
    pub is_new: bool,
}

impl Member {
    /// A blank member with a fresh id.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            record: Record::default(),
            is_new: true,
        }
    }

    /// Required fields are all still empty.
    ///
    /// Bio is optional, so unlike [`Record::is_blank`] it is ignored here.
    pub fn is_missing_required(&self) -> bool {
        let r = &self.record;
        r.name.trim().is_empty()
            && r.role.trim().is_empty()
            && r.location.trim().is_empty()
            && r.tags.is_empty()
    }
}
