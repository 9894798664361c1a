//! Draft/commit editing state machine.
//!
//! A [`DraftEditor`] never owns committed values. Its owner passes them in
//! and receives changes back through [`RecordOwner`] only after the whole
//! draft validates, so a failed save commits nothing.
//!
//! Owners that do not drive the editor directly can still ask it to save by
//! handing it a new [`SaveToken`] through [`DraftEditor::observe_save_token`].
//! Every distinct token is answered exactly once through
//! [`RecordOwner::on_save_result`].

use tracing::debug;

use super::draft::{Draft, DraftField};
use super::validate::validate;
use crate::error::ValidationError;
use crate::record::{Record, RoleOption, role_options};

/// Receiver of the editor's committed changes and lifecycle notifications.
///
/// Setters are called in form order and only after validation succeeds.
pub trait RecordOwner {
    fn set_name(&mut self, value: String);
    fn set_avatar_url(&mut self, value: String);
    fn set_role(&mut self, value: String);
    fn set_bio(&mut self, value: String);
    fn set_location(&mut self, value: String);
    fn set_online(&mut self, value: bool);
    fn set_tags(&mut self, value: Vec<String>);

    /// The user discarded the draft.
    fn on_cancel_edit(&mut self) {}

    /// A save committed and the editor left edit mode.
    fn on_save_edit(&mut self) {}

    /// Outcome of every save attempt, whoever triggered it.
    fn on_save_result(&mut self, _ok: bool) {}
}

/// Version of a save command. Owners bump it to ask for one more save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SaveToken(u64);

impl SaveToken {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The token after `current`, starting from 1 when nothing was issued.
    pub fn after(current: Option<SaveToken>) -> SaveToken {
        match current {
            None => SaveToken(1),
            Some(SaveToken(n)) => SaveToken(n + 1),
        }
    }
}

/// What happens to edit mode after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Leave edit mode and notify the owner via `on_save_edit`.
    Commit,
    /// Stay in the current mode so the caller decides what comes next.
    KeepEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRequest {
    pub mode: SaveMode,
    /// Suppress the "Saved successfully" notice.
    pub silent: bool,
}

impl SaveRequest {
    /// A save pressed by the user.
    pub fn user() -> Self {
        Self {
            mode: SaveMode::Commit,
            silent: false,
        }
    }

    /// A save commanded by an owner through a token.
    pub fn command() -> Self {
        Self {
            mode: SaveMode::KeepEditing,
            silent: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Viewing,
    Editing,
}

/// What the owner lets the editor do.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub editable: bool,
    pub start_in_edit: bool,
    /// The owner drives save/cancel itself; no action row is shown.
    pub hide_edit_actions: bool,
    pub role_options: Vec<RoleOption>,
    pub role_placeholder: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            editable: false,
            start_in_edit: false,
            hide_edit_actions: false,
            role_options: Vec::new(),
            role_placeholder: "Select a role...".to_string(),
        }
    }
}

impl EditorOptions {
    /// Editable with the standard role selector.
    pub fn editable() -> Self {
        Self {
            editable: true,
            role_options: role_options(),
            ..Default::default()
        }
    }

    pub fn start_in_edit(mut self) -> Self {
        self.start_in_edit = true;
        self
    }

    pub fn hide_edit_actions(mut self) -> Self {
        self.hide_edit_actions = true;
        self
    }

    pub fn with_role_options(mut self, options: Vec<RoleOption>) -> Self {
        self.role_options = options;
        self
    }
}

/// Editing controller for one record.
#[derive(Debug, Clone)]
pub struct DraftEditor {
    mode: EditorMode,
    draft: Draft,
    error: Option<ValidationError>,
    options: EditorOptions,
    last_token: Option<SaveToken>,
    notice: Option<String>,
}

impl DraftEditor {
    pub fn new(committed: &Record, options: EditorOptions) -> Self {
        let mode = if options.start_in_edit || committed.is_blank() {
            EditorMode::Editing
        } else {
            EditorMode::Viewing
        };
        Self {
            mode,
            draft: Draft::from_record(committed),
            error: None,
            options,
            last_token: None,
            notice: None,
        }
    }

    /// Treats `token` as already answered, so a rebuilt editor does not
    /// replay a command its predecessor handled.
    pub fn with_seen_token(mut self, token: Option<SaveToken>) -> Self {
        self.last_token = token;
        self
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn last_token(&self) -> Option<SaveToken> {
        self.last_token
    }

    /// Takes the pending user-facing notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Enters edit mode with a fresh draft. Refused when not editable.
    pub fn start_edit(&mut self, committed: &Record) -> bool {
        if !self.options.editable {
            return false;
        }
        self.error = None;
        self.draft = Draft::from_record(committed);
        self.mode = EditorMode::Editing;
        debug!("editor entered edit mode");
        true
    }

    /// Discards the draft and returns to viewing.
    pub fn cancel<O: RecordOwner + ?Sized>(&mut self, committed: &Record, owner: &mut O) {
        self.error = None;
        self.draft = Draft::from_record(committed);
        self.mode = EditorMode::Viewing;
        debug!("editor cancelled");
        owner.on_cancel_edit();
    }

    /// Validates the draft and, if it passes, commits every field.
    pub fn save<O: RecordOwner + ?Sized>(
        &mut self,
        request: SaveRequest,
        owner: &mut O,
    ) -> Result<(), ValidationError> {
        let tags = match validate(&self.draft) {
            Ok(tags) => tags,
            Err(err) => {
                debug!(error = %err, "draft rejected");
                self.error = Some(err.clone());
                owner.on_save_result(false);
                return Err(err);
            }
        };

        self.error = None;
        owner.set_name(self.draft.name.clone());
        owner.set_avatar_url(self.draft.avatar_url.clone());
        owner.set_role(self.draft.role.clone());
        owner.set_bio(self.draft.bio.clone());
        owner.set_location(self.draft.location.clone());
        owner.set_online(self.draft.is_online);
        owner.set_tags(tags);

        if !request.silent {
            self.notice = Some("Saved successfully".to_string());
        }

        match request.mode {
            SaveMode::KeepEditing => {}
            SaveMode::Commit => {
                self.mode = EditorMode::Viewing;
                owner.on_save_edit();
            }
        }
        debug!(mode = ?request.mode, silent = request.silent, "draft committed");
        owner.on_save_result(true);
        Ok(())
    }

    /// Receiver side of the save handshake.
    ///
    /// Returns `None` when `token` carries no new command, otherwise the
    /// outcome that was also reported to the owner.
    pub fn observe_save_token<O: RecordOwner + ?Sized>(
        &mut self,
        token: Option<SaveToken>,
        owner: &mut O,
    ) -> Option<bool> {
        let token = token?;
        if self.last_token == Some(token) {
            return None;
        }
        self.last_token = Some(token);
        debug!(token = token.value(), "save command received");

        if !self.options.editable {
            self.error = Some(ValidationError::NotEditable);
            owner.on_save_result(false);
            return Some(false);
        }

        Some(self.save(SaveRequest::command(), owner).is_ok())
    }

    /// Follows external changes to the committed record while not editing.
    pub fn sync_committed(&mut self, committed: &Record) {
        if self.mode != EditorMode::Editing {
            self.draft = Draft::from_record(committed);
        }
    }

    /// Replaces a text field. Ignored outside edit mode.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        if !self.is_editing() {
            return;
        }
        if field == DraftField::Role {
            self.draft.role = value.into();
        } else if let Some(text) = self.draft.text_mut(field) {
            *text = value.into();
        }
    }

    pub fn push_char(&mut self, field: DraftField, c: char) {
        if !self.is_editing() {
            return;
        }
        if let Some(text) = self.draft.text_mut(field) {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self, field: DraftField) {
        if !self.is_editing() {
            return;
        }
        if let Some(text) = self.draft.text_mut(field) {
            text.pop();
        }
    }

    pub fn toggle_online(&mut self) {
        if self.is_editing() {
            self.draft.is_online = !self.draft.is_online;
        }
    }

    /// Steps the role selector, passing through the unselected placeholder.
    pub fn cycle_role(&mut self, forward: bool) {
        if !self.is_editing() {
            return;
        }
        // Slot 0 is the placeholder, slots 1.. are the options.
        let slots = self.options.role_options.len() + 1;
        let current = self
            .options
            .role_options
            .iter()
            .position(|o| o.value == self.draft.role)
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.draft.role = match next {
            0 => String::new(),
            i => self.options.role_options[i - 1].value.clone(),
        };
    }

    /// Label of the role currently in the draft, or the placeholder.
    pub fn role_label(&self) -> &str {
        self.options
            .role_options
            .iter()
            .find(|o| o.value == self.draft.role)
            .map_or(self.options.role_placeholder.as_str(), |o| o.label.as_str())
    }
}
