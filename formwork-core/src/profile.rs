//! Single-profile panel owner.

use tracing::info;

use crate::editor::{DraftEditor, EditorOptions, RecordOwner, SaveRequest};
use crate::error::ValidationError;
use crate::record::Record;

/// A bare record accepts committed values field by field.
impl RecordOwner for Record {
    fn set_name(&mut self, value: String) {
        self.name = value;
    }

    fn set_avatar_url(&mut self, value: String) {
        self.avatar_url = value;
    }

    fn set_role(&mut self, value: String) {
        self.role = value;
    }

    fn set_bio(&mut self, value: String) {
        self.bio = value;
    }

    fn set_location(&mut self, value: String) {
        self.location = value;
    }

    fn set_online(&mut self, value: bool) {
        self.is_online = value;
    }

    fn set_tags(&mut self, value: Vec<String>) {
        self.tags = value;
    }
}

/// Owns one committed profile and the editor showing it.
#[derive(Debug, Clone)]
pub struct ProfileDesk {
    record: Record,
    editor: DraftEditor,
}

impl ProfileDesk {
    pub fn new(record: Record) -> Self {
        let editor = DraftEditor::new(&record, EditorOptions::editable());
        Self { record, editor }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn editor(&self) -> &DraftEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut DraftEditor {
        &mut self.editor
    }

    pub fn start_edit(&mut self) -> bool {
        self.editor.start_edit(&self.record)
    }

    pub fn cancel(&mut self) {
        let committed = self.record.clone();
        self.editor.cancel(&committed, &mut self.record);
    }

    pub fn save(&mut self) -> Result<(), ValidationError> {
        self.editor.save(SaveRequest::user(), &mut self.record)
    }

    /// Replaces the committed profile from outside the editor.
    pub fn replace(&mut self, record: Record) {
        self.record = record;
        self.editor.sync_committed(&self.record);
    }

    pub fn contact(&self) -> String {
        info!("contact requested from profile");
        "Connecting you to a software engineer...".to_string()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.editor.take_notice()
    }
}

impl Default for ProfileDesk {
    fn default() -> Self {
        Self::new(Record::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{DraftField, EditorMode};

    fn fill(desk: &mut ProfileDesk) {
        let editor = desk.editor_mut();
        editor.set_field(DraftField::Name, "Linus");
        editor.set_field(DraftField::Role, "Viewer");
        editor.set_field(DraftField::Location, "Portland");
        editor.set_field(DraftField::Tags, "kernel, git");
    }

    #[test]
    fn blank_desk_opens_in_edit_mode() {
        let desk = ProfileDesk::default();
        assert_eq!(desk.editor().mode(), EditorMode::Editing);
        assert_eq!(desk.editor().options().role_options.len(), 3);
    }

    #[test]
    fn save_commits_into_record() {
        let mut desk = ProfileDesk::default();
        fill(&mut desk);
        desk.editor_mut().toggle_online();

        desk.save().unwrap();

        assert_eq!(desk.record().name, "Linus");
        assert!(desk.record().is_online);
        assert_eq!(desk.record().tags, vec!["kernel", "git"]);
        assert_eq!(desk.editor().mode(), EditorMode::Viewing);
        assert_eq!(desk.take_notice().as_deref(), Some("Saved successfully"));
    }

    #[test]
    fn failed_save_leaves_record_untouched() {
        let mut desk = ProfileDesk::default();
        desk.editor_mut().set_field(DraftField::Name, "Linus");

        assert_eq!(desk.save(), Err(ValidationError::RoleRequired));
        assert_eq!(desk.record(), &Record::default());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut desk = ProfileDesk::default();
        fill(&mut desk);
        desk.save().unwrap();
        desk.start_edit();
        desk.editor_mut().set_field(DraftField::Name, "Someone");

        desk.cancel();

        assert_eq!(desk.editor().draft().name, "Linus");
        assert_eq!(desk.record().name, "Linus");
        assert!(!desk.editor().is_editing());
    }

    #[test]
    fn replace_refreshes_viewing_draft() {
        let mut desk = ProfileDesk::default();
        fill(&mut desk);
        desk.save().unwrap();

        let mut other = desk.record().clone();
        other.location = "Helsinki".into();
        desk.replace(other);

        assert_eq!(desk.editor().draft().location, "Helsinki");
    }

    #[test]
    fn contact_message() {
        assert_eq!(
            ProfileDesk::default().contact(),
            "Connecting you to a software engineer..."
        );
    }
}
