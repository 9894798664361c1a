//! Role-driven permission matrix.
//!
//! A [`RuleTable`] says, for every permission and every role, whether the
//! permission is required, optional or forbidden. [`evaluate`] combines the
//! table with the chosen role and the user's optional picks into the
//! effective set shown on the permissions and review steps. Nothing here
//! gates real actions; the result is for display and review only.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Role;

/// Permissions the rule table can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionKey {
    BaseAccess,
    ExportData,
    ServerConfig,
    UserManagement,
    DeleteRecords,
}

impl PermissionKey {
    pub const ALL: [PermissionKey; 5] = [
        PermissionKey::BaseAccess,
        PermissionKey::ExportData,
        PermissionKey::ServerConfig,
        PermissionKey::UserManagement,
        PermissionKey::DeleteRecords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKey::BaseAccess => "BASE_ACCESS",
            PermissionKey::ExportData => "EXPORT_DATA",
            PermissionKey::ServerConfig => "SERVER_CONFIG",
            PermissionKey::UserManagement => "USER_MANAGEMENT",
            PermissionKey::DeleteRecords => "DELETE_RECORDS",
        }
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PermissionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown permission: {s}"))
    }
}

/// How a role relates to a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    Required,
    Optional,
    Forbidden,
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PermissionMode::Required => "required",
            PermissionMode::Optional => "optional",
            PermissionMode::Forbidden => "forbidden",
        })
    }
}

/// A mode for each role. All three fields are mandatory, so a table cannot
/// leave a role out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleModes {
    pub admin: PermissionMode,
    pub editor: PermissionMode,
    pub viewer: PermissionMode,
}

impl RoleModes {
    pub fn for_role(&self, role: Role) -> PermissionMode {
        match role {
            Role::Admin => self.admin,
            Role::Editor => self.editor,
            Role::Viewer => self.viewer,
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDef {
    pub key: PermissionKey,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub modes: RoleModes,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("permission {0} appears more than once in the rule table")]
    DuplicateKey(PermissionKey),
}

/// Ordered, fixed set of permission rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PermissionDef>", into = "Vec<PermissionDef>")]
pub struct RuleTable {
    defs: Vec<PermissionDef>,
}

impl RuleTable {
    pub fn new(defs: Vec<PermissionDef>) -> Result<Self, RuleTableError> {
        let mut seen = HashSet::new();
        for def in &defs {
            if !seen.insert(def.key) {
                return Err(RuleTableError::DuplicateKey(def.key));
            }
        }
        Ok(Self { defs })
    }

    pub fn defs(&self) -> &[PermissionDef] {
        &self.defs
    }

    pub fn get(&self, key: PermissionKey) -> Option<&PermissionDef> {
        self.defs.iter().find(|d| d.key == key)
    }

    /// Mode of `key` for `role`; `None` if the key is not in the table.
    pub fn mode(&self, key: PermissionKey, role: Role) -> Option<PermissionMode> {
        self.get(key).map(|d| d.modes.for_role(role))
    }

    /// Keys the user may toggle under `role`, in table order.
    pub fn optional_keys(&self, role: Role) -> Vec<PermissionKey> {
        self.defs
            .iter()
            .filter(|d| d.modes.for_role(role) == PermissionMode::Optional)
            .map(|d| d.key)
            .collect()
    }

    pub fn is_optional(&self, key: PermissionKey, role: Option<Role>) -> bool {
        role.and_then(|r| self.mode(key, r)) == Some(PermissionMode::Optional)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl TryFrom<Vec<PermissionDef>> for RuleTable {
    type Error = RuleTableError;

    fn try_from(defs: Vec<PermissionDef>) -> Result<Self, Self::Error> {
        RuleTable::new(defs)
    }
}

impl From<RuleTable> for Vec<PermissionDef> {
    fn from(table: RuleTable) -> Self {
        table.defs
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        default_rules()
    }
}

/// The built-in rule table.
pub fn default_rules() -> RuleTable {
    use PermissionMode::{Forbidden, Optional, Required};

    let def = |key, label: &str, description: &str, admin, editor, viewer| PermissionDef {
        key,
        label: label.to_string(),
        description: description.to_string(),
        modes: RoleModes {
            admin,
            editor,
            viewer,
        },
    };

    RuleTable {
        defs: vec![
            def(
                PermissionKey::BaseAccess,
                "Basic Access Right",
                "Basic access right",
                Required,
                Required,
                Required,
            ),
            def(
                PermissionKey::ExportData,
                "Data Exportation",
                "Only Admin AND Editor (optional)",
                Optional,
                Optional,
                Forbidden,
            ),
            def(
                PermissionKey::ServerConfig,
                "Server Configuration",
                "Only Admin (required)",
                Required,
                Forbidden,
                Forbidden,
            ),
            def(
                PermissionKey::UserManagement,
                "User Management",
                "Only Admin (required)",
                Required,
                Forbidden,
                Forbidden,
            ),
            def(
                PermissionKey::DeleteRecords,
                "History Management",
                "Only Admin (optional)",
                Optional,
                Forbidden,
                Forbidden,
            ),
        ],
    }
}

/// The user's picks for optional permissions. Missing keys read `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalSelections {
    picks: BTreeMap<PermissionKey, bool>,
}

impl OptionalSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: PermissionKey) -> bool {
        self.picks.get(&key).copied().unwrap_or(false)
    }

    /// Sets a pick without consulting any rule; owners should go through
    /// [`OptionalSelections::toggle`].
    pub fn set(&mut self, key: PermissionKey, checked: bool) {
        self.picks.insert(key, checked);
    }

    /// Applies a toggle if `key` is optional for `role`. Returns whether it
    /// was applied.
    pub fn toggle(
        &mut self,
        rules: &RuleTable,
        role: Option<Role>,
        key: PermissionKey,
        checked: bool,
    ) -> bool {
        if !rules.is_optional(key, role) {
            tracing::debug!(%key, ?role, "ignoring toggle for non-optional permission");
            return false;
        }
        self.set(key, checked);
        true
    }

    /// Drops picks that are not optional under `role`. Picks that remain
    /// optional keep their value.
    pub fn sanitize_for(&mut self, rules: &RuleTable, role: Option<Role>) {
        for (key, checked) in self.picks.iter_mut() {
            if !rules.is_optional(*key, role) {
                *checked = false;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PermissionKey, bool)> + '_ {
        self.picks.iter().map(|(k, v)| (*k, *v))
    }
}

/// Resolved state of one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveEntry {
    pub checked: bool,
    pub mode: PermissionMode,
}

impl EffectiveEntry {
    const NOTHING: EffectiveEntry = EffectiveEntry {
        checked: false,
        mode: PermissionMode::Forbidden,
    };
}

/// Output of [`evaluate`], one entry per rule in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    entries: Vec<(PermissionKey, EffectiveEntry)>,
}

impl EffectivePermissions {
    pub fn get(&self, key: PermissionKey) -> Option<EffectiveEntry> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, e)| *e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PermissionKey, EffectiveEntry)> + '_ {
        self.entries.iter().copied()
    }

    /// Keys that end up checked.
    pub fn granted(&self) -> impl Iterator<Item = PermissionKey> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| e.checked)
            .map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes the effective permission set.
///
/// With no role selected every permission is reported as forbidden and
/// unchecked, whatever the table says.
pub fn evaluate(
    rules: &RuleTable,
    role: Option<Role>,
    selections: &OptionalSelections,
) -> EffectivePermissions {
    let entries = rules
        .defs()
        .iter()
        .map(|def| {
            let entry = match role {
                None => EffectiveEntry::NOTHING,
                Some(role) => {
                    let mode = def.modes.for_role(role);
                    let checked = match mode {
                        PermissionMode::Required => true,
                        PermissionMode::Forbidden => false,
                        PermissionMode::Optional => selections.get(def.key),
                    };
                    EffectiveEntry { checked, mode }
                }
            };
            (def.key, entry)
        })
        .collect();

    EffectivePermissions { entries }
}
