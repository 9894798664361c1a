//! The editor's private copy of a record.

use crate::record::Record;

/// Editable fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftField {
    #[default]
    Name,
    AvatarUrl,
    Role,
    Bio,
    Location,
    Online,
    Tags,
}

impl DraftField {
    pub const ALL: [DraftField; 7] = [
        DraftField::Name,
        DraftField::AvatarUrl,
        DraftField::Role,
        DraftField::Bio,
        DraftField::Location,
        DraftField::Online,
        DraftField::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::AvatarUrl => "Avatar URL",
            DraftField::Role => "Role",
            DraftField::Bio => "Bio",
            DraftField::Location => "Location",
            DraftField::Online => "Online Status",
            DraftField::Tags => "Tags (comma-separated)",
        }
    }

    /// Whether the field takes free text input.
    pub fn is_text(&self) -> bool {
        !matches!(self, DraftField::Role | DraftField::Online)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Uncommitted field values plus the raw tag text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub avatar_url: String,
    pub role: String,
    pub bio: String,
    pub location: String,
    pub is_online: bool,
    pub tags_text: String,
}

impl Draft {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            avatar_url: record.avatar_url.clone(),
            role: record.role.clone(),
            bio: record.bio.clone(),
            location: record.location.clone(),
            is_online: record.is_online,
            tags_text: record.tags.join(", "),
        }
    }

    /// Tags as they would be committed.
    pub fn tags(&self) -> Vec<String> {
        parse_tags(&self.tags_text)
    }

    /// Mutable handle to a text field. `None` for role and online status,
    /// which are picked rather than typed.
    pub(crate) fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Name => Some(&mut self.name),
            DraftField::AvatarUrl => Some(&mut self.avatar_url),
            DraftField::Bio => Some(&mut self.bio),
            DraftField::Location => Some(&mut self.location),
            DraftField::Tags => Some(&mut self.tags_text),
            DraftField::Role | DraftField::Online => None,
        }
    }

    /// Display text of any field.
    pub fn text(&self, field: DraftField) -> String {
        match field {
            DraftField::Name => self.name.clone(),
            DraftField::AvatarUrl => self.avatar_url.clone(),
            DraftField::Role => self.role.clone(),
            DraftField::Bio => self.bio.clone(),
            DraftField::Location => self.location.clone(),
            DraftField::Online => {
                if self.is_online {
                    "Online".to_string()
                } else {
                    "Offline".to_string()
                }
            }
            DraftField::Tags => self.tags_text.clone(),
        }
    }
}

/// Splits comma-separated tag text, trimming and dropping empty entries.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
