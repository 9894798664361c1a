//! Application state for the TUI.
//!
//! Each panel's owner lives here for as long as the panel is open. Closing
//! a panel resets its owner, so reopening starts from scratch.

use chrono::{DateTime, Local};
use formwork_core::{DraftEditor, DraftField, ProfileDesk, Roster, RuleTable, Step, Workflow};

use crate::views::View;
use crate::widgets::ConfirmationDialog;

/// The current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Keys go into the team search box.
    Search,
}

/// A one-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            at: Local::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub profile: ProfileDesk,
    pub roster: Roster,
    pub workflow: Workflow,
    pub mode: Mode,
    /// Highlighted tile on the home screen.
    pub home_selected: usize,
    /// Field under the cursor in whichever edit form is open.
    pub form_focus: DraftField,
    /// Highlighted row in the permission matrix.
    pub permission_cursor: usize,
    pub confirmation: ConfirmationDialog,
    pub notice: Option<Notice>,
    rules: RuleTable,
}

impl AppState {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            profile: ProfileDesk::default(),
            roster: Roster::new(),
            workflow: Workflow::new(rules.clone()),
            mode: Mode::Normal,
            home_selected: 0,
            form_focus: DraftField::default(),
            permission_cursor: 0,
            confirmation: ConfirmationDialog::new(),
            notice: None,
            rules,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        let notice = Notice::new(text);
        tracing::debug!(text = %notice.text, "notice");
        self.notice = Some(notice);
    }

    /// Throws away everything a panel held.
    pub fn reset_panel(&mut self, view: View) {
        match view {
            View::Home => {}
            View::Profile => self.profile = ProfileDesk::default(),
            View::Team => {
                self.roster = Roster::new();
                self.confirmation.hide();
                self.mode = Mode::Normal;
            }
            View::Workflow => {
                self.workflow = Workflow::new(self.rules.clone());
                self.permission_cursor = 0;
            }
        }
        self.form_focus = DraftField::default();
    }

    /// The editor of `view` if it is currently taking input.
    pub fn editing_form(&self, view: View) -> Option<&DraftEditor> {
        let editor = match view {
            View::Home => None,
            View::Profile => Some(self.profile.editor()),
            View::Team => self.roster.editor(),
            View::Workflow if self.workflow.step() == Step::EditProfile => {
                Some(self.workflow.editor())
            }
            View::Workflow => None,
        };
        editor.filter(|e| e.is_editing())
    }

    /// Mutable counterpart of [`AppState::editing_form`].
    pub fn editing_form_mut(&mut self, view: View) -> Option<&mut DraftEditor> {
        let editor = match view {
            View::Home => None,
            View::Profile => Some(self.profile.editor_mut()),
            View::Team => self.roster.editor_mut(),
            View::Workflow if self.workflow.step() == Step::EditProfile => {
                Some(self.workflow.editor_mut())
            }
            View::Workflow => None,
        };
        editor.filter(|e| e.is_editing())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RuleTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_normal() {
        assert_eq!(Mode::default(), Mode::Normal);
    }

    #[test]
    fn fresh_profile_and_workflow_forms_take_input() {
        let state = AppState::default();
        assert!(state.editing_form(View::Profile).is_some());
        assert!(state.editing_form(View::Workflow).is_some());
        assert!(state.editing_form(View::Team).is_none());
        assert!(state.editing_form(View::Home).is_none());
    }

    #[test]
    fn team_form_opens_with_roster_editor() {
        let mut state = AppState::default();
        state.roster.add();
        assert!(state.editing_form_mut(View::Team).is_some());
    }

    #[test]
    fn reset_panel_discards_panel_state() {
        let mut state = AppState::default();
        state.roster.add();
        state
            .profile
            .editor_mut()
            .set_field(DraftField::Name, "Draft");
        state.form_focus = DraftField::Tags;

        state.reset_panel(View::Team);
        state.reset_panel(View::Profile);

        assert!(state.roster.members().is_empty());
        assert_eq!(state.profile.editor().draft().name, "");
        assert_eq!(state.form_focus, DraftField::Name);
    }

    #[test]
    fn notify_stamps_notice() {
        let mut state = AppState::default();
        let before = Local::now();
        state.notify("hello");
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.text, "hello");
        assert!(notice.at >= before);
    }
}
