//! Member collection behind the team panel.
//!
//! The roster owns every member. At most one member is open in a
//! [`DraftEditor`] at a time; the editor's callbacks are routed back to that
//! member by id.

use tracing::{debug, info};

use crate::editor::{DraftEditor, EditorOptions, RecordOwner, SaveRequest};
use crate::error::ValidationError;
use crate::record::{Member, MemberId, Record};

/// Two-letter initials shown when a member has no avatar.
pub fn initials(name: &str) -> String {
    let mut parts = name.split_whitespace();
    match (parts.next(), parts.next()) {
        (None, _) => String::new(),
        (Some(only), None) => only.chars().take(2).collect::<String>().to_uppercase(),
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

/// Routes editor callbacks onto one member's record.
struct MemberSlot<'a> {
    record: &'a mut Record,
    saved: bool,
    cancelled: bool,
}

impl<'a> MemberSlot<'a> {
    fn new(record: &'a mut Record) -> Self {
        Self {
            record,
            saved: false,
            cancelled: false,
        }
    }
}

impl RecordOwner for MemberSlot<'_> {
    fn set_name(&mut self, value: String) {
        self.record.name = value;
    }

    fn set_avatar_url(&mut self, value: String) {
        self.record.avatar_url = value;
    }

    fn set_role(&mut self, value: String) {
        self.record.role = value;
    }

    fn set_bio(&mut self, value: String) {
        self.record.bio = value;
    }

    fn set_location(&mut self, value: String) {
        self.record.location = value;
    }

    fn set_online(&mut self, value: bool) {
        self.record.is_online = value;
    }

    fn set_tags(&mut self, value: Vec<String>) {
        self.record.tags = value;
    }

    fn on_cancel_edit(&mut self) {
        self.cancelled = true;
    }

    fn on_save_edit(&mut self) {
        self.saved = true;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: Vec<Member>,
    query: String,
    /// Index into [`Roster::filtered`].
    selected: usize,
    editing: Option<(MemberId, DraftEditor)>,
    notice: Option<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members,
            ..Self::default()
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    /// Members whose name, role or location contain the trimmed query,
    /// ignoring case. An empty query matches everyone.
    pub fn filtered(&self) -> Vec<&Member> {
        let q = self.query.trim().to_lowercase();
        self.members
            .iter()
            .filter(|m| {
                q.is_empty()
                    || m.record.name.to_lowercase().contains(&q)
                    || m.record.role.to_lowercase().contains(&q)
                    || m.record.location.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_member(&self) -> Option<&Member> {
        self.filtered().get(self.selected).copied()
    }

    /// Moves selection to the next visible member, wrapping at the end.
    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Moves selection to the previous visible member, wrapping at the start.
    pub fn select_prev(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            (self.selected - 1).min(len - 1)
        };
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<MemberId> {
        self.editing.as_ref().map(|(id, _)| *id)
    }

    pub fn editor(&self) -> Option<&DraftEditor> {
        self.editing.as_ref().map(|(_, editor)| editor)
    }

    pub fn editor_mut(&mut self) -> Option<&mut DraftEditor> {
        self.editing.as_mut().map(|(_, editor)| editor)
    }

    /// Prepends a blank member and opens it for editing.
    pub fn add(&mut self) -> MemberId {
        let member = Member::blank();
        let id = member.id;
        let editor = DraftEditor::new(&member.record, Self::editor_options());
        self.members.insert(0, member);
        self.editing = Some((id, editor));
        self.selected = 0;
        debug!(%id, "member added");
        id
    }

    /// Opens an existing member for editing. Returns false for unknown ids.
    pub fn edit(&mut self, id: MemberId) -> bool {
        let Some(member) = self.get(id) else {
            return false;
        };
        let editor = DraftEditor::new(&member.record, Self::editor_options());
        self.editing = Some((id, editor));
        true
    }

    pub fn delete(&mut self, id: MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        if self.members.len() == before {
            return false;
        }
        if self.editing_id() == Some(id) {
            self.editing = None;
        }
        self.clamp_selection();
        info!(%id, "member deleted");
        true
    }

    /// Notice shown when contacting a member.
    pub fn contact(&self, id: MemberId) -> Option<String> {
        let member = self.get(id)?;
        info!(%id, "contact requested");
        Some(format!("Connecting you to {}...", member.record.name))
    }

    /// Saves the open editor. A successful save closes it and marks the
    /// member as no longer new. `None` when nothing is being edited.
    pub fn save_edit(&mut self) -> Option<Result<(), ValidationError>> {
        let (id, editor) = self.editing.as_mut()?;
        let id = *id;
        let Some(member) = self.members.iter_mut().find(|m| m.id == id) else {
            self.editing = None;
            return None;
        };

        let mut slot = MemberSlot::new(&mut member.record);
        let result = editor.save(SaveRequest::user(), &mut slot);
        let saved = slot.saved;
        if let Some(notice) = editor.take_notice() {
            self.notice = Some(notice);
        }
        if saved {
            member.is_new = false;
            self.editing = None;
        }
        Some(result)
    }

    /// Discards the open editor. A member that still has none of its
    /// required fields is removed.
    pub fn cancel_edit(&mut self) {
        let Some((id, mut editor)) = self.editing.take() else {
            return;
        };
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            return;
        };

        let committed = self.members[index].record.clone();
        let mut slot = MemberSlot::new(&mut self.members[index].record);
        editor.cancel(&committed, &mut slot);
        let cancelled = slot.cancelled;

        if cancelled && self.members[index].is_missing_required() {
            self.members.remove(index);
            debug!(%id, "discarded empty member");
            self.clamp_selection();
        }
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn editor_options() -> EditorOptions {
        EditorOptions::editable().start_in_edit()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
