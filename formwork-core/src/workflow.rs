//! Three-step workflow: edit a profile, assign permissions, review and submit.
//!
//! The workflow owns the committed profile but not the editor's draft. To
//! leave step 1 it bumps its [`SaveToken`] and hands it to the embedded
//! [`DraftEditor`]; the editor validates and commits on its own terms and
//! answers through [`RecordOwner::on_save_result`]. Only a successful answer
//! to a pending advance moves the workflow to step 2.

use std::fmt;

use tracing::{debug, info};

use crate::editor::{DraftEditor, EditorOptions, RecordOwner, SaveToken};
use crate::error::SubmissionError;
use crate::permissions::{
    EffectivePermissions, OptionalSelections, PermissionKey, RuleTable, evaluate,
};
use crate::record::{Record, Role};
use crate::submit::{SubmissionPayload, Submitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    EditProfile,
    AssignPermissions,
    ReviewSubmit,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::EditProfile, Step::AssignPermissions, Step::ReviewSubmit];

    /// 1-based position shown to the user.
    pub fn number(&self) -> u8 {
        match self {
            Step::EditProfile => 1,
            Step::AssignPermissions => 2,
            Step::ReviewSubmit => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::EditProfile => "Edit User",
            Step::AssignPermissions => "Assign Permissions",
            Step::ReviewSubmit => "Review & Submit",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::EditProfile => Some(Step::AssignPermissions),
            Step::AssignPermissions => Some(Step::ReviewSubmit),
            Step::ReviewSubmit => None,
        }
    }

    pub fn prev(self) -> Option<Step> {
        match self {
            Step::EditProfile => None,
            Step::AssignPermissions => Some(Step::EditProfile),
            Step::ReviewSubmit => Some(Step::AssignPermissions),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number(), self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Result line shown on the review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMessage {
    Saved,
    Failed,
}

impl SubmitMessage {
    pub fn text(&self) -> &'static str {
        match self {
            SubmitMessage::Saved => "✅ Permissions saved successfully.",
            SubmitMessage::Failed => "❌ Failed to save. Please try again.",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitMessage::Saved)
    }
}

impl fmt::Display for SubmitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Everything the workflow owns apart from the embedded editor. Split out so
/// the editor can borrow it as its [`RecordOwner`].
#[derive(Debug, Clone)]
struct Sequencer {
    rules: RuleTable,
    step: Step,
    submission: SubmissionState,
    message: Option<SubmitMessage>,
    profile: Record,
    role: Option<Role>,
    selections: OptionalSelections,
    save_token: Option<SaveToken>,
    advance_pending: bool,
}

impl Sequencer {
    fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            self.message = None;
            debug!(from = %self.step, to = %next, "workflow advanced");
            self.step = next;
        }
    }
}

impl RecordOwner for Sequencer {
    fn set_name(&mut self, value: String) {
        self.profile.name = value;
    }

    fn set_avatar_url(&mut self, value: String) {
        self.profile.avatar_url = value;
    }

    fn set_role(&mut self, value: String) {
        self.role = value.parse().ok();
        self.profile.role = value;
        self.selections.sanitize_for(&self.rules, self.role);
    }

    fn set_bio(&mut self, value: String) {
        self.profile.bio = value;
    }

    fn set_location(&mut self, value: String) {
        self.profile.location = value;
    }

    fn set_online(&mut self, value: bool) {
        self.profile.is_online = value;
    }

    fn set_tags(&mut self, value: Vec<String>) {
        self.profile.tags = value;
    }

    fn on_save_result(&mut self, ok: bool) {
        if self.step != Step::EditProfile || !self.advance_pending {
            return;
        }
        self.advance_pending = false;
        if ok {
            self.advance();
        } else {
            debug!("advance blocked by validation");
        }
    }
}

/// Multi-step workflow orchestrator.
#[derive(Debug, Clone)]
pub struct Workflow {
    editor: DraftEditor,
    seq: Sequencer,
}

impl Workflow {
    pub fn new(rules: RuleTable) -> Self {
        let profile = Record::default();
        Self {
            editor: DraftEditor::new(&profile, Self::editor_options()),
            seq: Sequencer {
                rules,
                step: Step::EditProfile,
                submission: SubmissionState::Idle,
                message: None,
                profile,
                role: None,
                selections: OptionalSelections::new(),
                save_token: None,
                advance_pending: false,
            },
        }
    }

    fn editor_options() -> EditorOptions {
        EditorOptions::editable().hide_edit_actions()
    }

    pub fn step(&self) -> Step {
        self.seq.step
    }

    pub fn submission(&self) -> SubmissionState {
        self.seq.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.seq.submission == SubmissionState::Submitting
    }

    pub fn message(&self) -> Option<SubmitMessage> {
        self.seq.message
    }

    pub fn profile(&self) -> &Record {
        &self.seq.profile
    }

    pub fn role(&self) -> Option<Role> {
        self.seq.role
    }

    pub fn rules(&self) -> &RuleTable {
        &self.seq.rules
    }

    pub fn selections(&self) -> &OptionalSelections {
        &self.seq.selections
    }

    pub fn save_token(&self) -> Option<SaveToken> {
        self.seq.save_token
    }

    pub fn is_advance_pending(&self) -> bool {
        self.seq.advance_pending
    }

    pub fn editor(&self) -> &DraftEditor {
        &self.editor
    }

    /// Direct access for typing into the draft. Saving still goes through
    /// [`Workflow::next`].
    pub fn editor_mut(&mut self) -> &mut DraftEditor {
        &mut self.editor
    }

    /// Opens the embedded editor when it is showing the profile read-only.
    pub fn start_edit(&mut self) -> bool {
        self.seq.step == Step::EditProfile && self.editor.start_edit(&self.seq.profile)
    }

    /// Back/Next are locked while a submission is in flight.
    pub fn can_go_back(&self) -> bool {
        !self.is_submitting() && self.seq.step.prev().is_some()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_submitting() && self.seq.step.next().is_some()
    }

    /// Moves forward one step. From step 1 this only issues a save command;
    /// the step changes when the editor reports success.
    pub fn next(&mut self) {
        if !self.can_go_next() {
            return;
        }
        match self.seq.step {
            Step::EditProfile => {
                let token = SaveToken::after(self.seq.save_token);
                self.seq.save_token = Some(token);
                self.seq.advance_pending = true;
                debug!(token = token.value(), "requesting save before advancing");
                self.editor
                    .observe_save_token(self.seq.save_token, &mut self.seq);
            }
            Step::AssignPermissions => self.seq.advance(),
            Step::ReviewSubmit => {}
        }
    }

    pub fn back(&mut self) {
        if !self.can_go_back() {
            return;
        }
        self.seq.advance_pending = false;
        self.seq.message = None;
        if let Some(prev) = self.seq.step.prev() {
            debug!(from = %self.seq.step, to = %prev, "workflow went back");
            self.seq.step = prev;
        }
        if self.seq.step == Step::EditProfile {
            self.editor = DraftEditor::new(&self.seq.profile, Self::editor_options())
                .with_seen_token(self.seq.save_token);
        }
    }

    /// Sets an optional permission. Ignored unless `key` is optional for
    /// the current role.
    pub fn toggle_optional(&mut self, key: PermissionKey, checked: bool) -> bool {
        let role = self.seq.role;
        self.seq
            .selections
            .toggle(&self.seq.rules, role, key, checked)
    }

    /// Flips an optional permission's current pick.
    pub fn flip_optional(&mut self, key: PermissionKey) -> bool {
        let checked = !self.seq.selections.get(key);
        self.toggle_optional(key, checked)
    }

    pub fn effective_permissions(&self) -> EffectivePermissions {
        evaluate(&self.seq.rules, self.seq.role, &self.seq.selections)
    }

    pub fn clear_message(&mut self) {
        self.seq.message = None;
    }

    /// Enters the submitting state and returns what to send. `None` when not
    /// on the review step or a submission is already running.
    pub fn begin_submit(&mut self) -> Option<SubmissionPayload> {
        if self.seq.step != Step::ReviewSubmit || self.is_submitting() {
            return None;
        }
        self.seq.submission = SubmissionState::Submitting;
        self.seq.message = None;
        Some(SubmissionPayload {
            profile: self.seq.profile.clone(),
            role: self.seq.role,
            granted: self.effective_permissions().granted().collect(),
        })
    }

    /// Records the outcome of the submission started by
    /// [`Workflow::begin_submit`].
    pub fn finish_submit(&mut self, outcome: Result<(), SubmissionError>) {
        if !self.is_submitting() {
            return;
        }
        self.seq.message = Some(match &outcome {
            Ok(()) => SubmitMessage::Saved,
            Err(_) => SubmitMessage::Failed,
        });
        self.seq.submission = SubmissionState::Idle;
        match outcome {
            Ok(()) => info!("workflow submitted"),
            Err(err) => info!(error = %err, "workflow submission failed"),
        }
    }

    /// Runs a whole submission. Returns `None` if one could not start.
    pub async fn submit(
        &mut self,
        submitter: &dyn Submitter,
    ) -> Option<Result<(), SubmissionError>> {
        let payload = self.begin_submit()?;
        let outcome = submitter.submit(payload).await;
        self.finish_submit(outcome.clone());
        Some(outcome)
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(RuleTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::DraftField;
    use crate::permissions::{PermissionMode, default_rules};
    use crate::submit::SimulatedSubmitter;
    use std::time::Duration;

    fn fill_valid(workflow: &mut Workflow, role: &str) {
        let editor = workflow.editor_mut();
        editor.set_field(DraftField::Name, "Margaret Hamilton");
        editor.set_field(DraftField::Role, role);
        editor.set_field(DraftField::Location, "Cambridge");
        editor.set_field(DraftField::Tags, "apollo, software");
    }

    fn at_review(role: &str) -> Workflow {
        let mut wf = Workflow::new(default_rules());
        fill_valid(&mut wf, role);
        wf.next();
        wf.next();
        assert_eq!(wf.step(), Step::ReviewSubmit);
        wf
    }

    #[test]
    fn starts_on_step_one_with_blank_profile_in_edit_mode() {
        let wf = Workflow::default();
        assert_eq!(wf.step(), Step::EditProfile);
        assert!(wf.editor().is_editing());
        assert!(wf.editor().options().hide_edit_actions);
        assert_eq!(wf.save_token(), None);
        assert_eq!(wf.role(), None);
    }

    #[test]
    fn next_with_invalid_draft_stays_and_shows_error() {
        let mut wf = Workflow::default();
        wf.editor_mut().set_field(DraftField::Name, "Al");
        wf.editor_mut().set_field(DraftField::Location, "Remote");

        wf.next();

        assert_eq!(wf.step(), Step::EditProfile);
        assert_eq!(
            wf.editor().error().map(|e| e.to_string()).as_deref(),
            Some("Role is required.")
        );
        assert!(!wf.is_advance_pending());
        assert_eq!(wf.save_token().map(|t| t.value()), Some(1));
        assert_eq!(wf.profile(), &Record::default());
    }

    #[test]
    fn next_with_valid_draft_commits_and_advances_once() {
        let mut wf = Workflow::default();
        fill_valid(&mut wf, "Editor");

        wf.next();

        assert_eq!(wf.step(), Step::AssignPermissions);
        assert_eq!(wf.save_token().map(|t| t.value()), Some(1));
        assert_eq!(wf.profile().name, "Margaret Hamilton");
        assert_eq!(wf.profile().tags, vec!["apollo", "software"]);
        assert_eq!(wf.role(), Some(Role::Editor));
        assert!(!wf.is_advance_pending());
        assert!(wf.editor().is_editing());
    }

    #[test]
    fn repeated_acknowledgement_does_not_double_advance() {
        let mut wf = Workflow::default();
        fill_valid(&mut wf, "Admin");
        wf.next();
        assert_eq!(wf.step(), Step::AssignPermissions);

        wf.seq.on_save_result(true);

        assert_eq!(wf.step(), Step::AssignPermissions);
    }

    #[test]
    fn acknowledgement_without_pending_advance_is_ignored() {
        let mut wf = Workflow::default();
        wf.seq.on_save_result(true);
        assert_eq!(wf.step(), Step::EditProfile);
    }

    #[test]
    fn failed_then_fixed_draft_advances_on_second_next() {
        let mut wf = Workflow::default();
        wf.next();
        assert_eq!(wf.step(), Step::EditProfile);

        fill_valid(&mut wf, "Viewer");
        wf.next();

        assert_eq!(wf.step(), Step::AssignPermissions);
        assert_eq!(wf.save_token().map(|t| t.value()), Some(2));
        assert!(wf.editor().error().is_none());
    }

    #[test]
    fn back_is_noop_on_step_one() {
        let mut wf = Workflow::default();
        assert!(!wf.can_go_back());
        wf.back();
        assert_eq!(wf.step(), Step::EditProfile);
    }

    #[test]
    fn back_to_step_one_shows_committed_profile_without_replaying_save() {
        let mut wf = Workflow::default();
        fill_valid(&mut wf, "Admin");
        wf.next();

        wf.back();

        assert_eq!(wf.step(), Step::EditProfile);
        assert!(!wf.editor().is_editing());
        assert_eq!(wf.editor().draft().name, "Margaret Hamilton");
        assert_eq!(wf.editor().last_token(), wf.save_token());
    }

    #[test]
    fn next_from_viewing_profile_advances_again() {
        let mut wf = Workflow::default();
        fill_valid(&mut wf, "Admin");
        wf.next();
        wf.back();

        wf.next();

        assert_eq!(wf.step(), Step::AssignPermissions);
        assert_eq!(wf.save_token().map(|t| t.value()), Some(2));
    }

    #[test]
    fn step_two_next_goes_to_review_and_stops() {
        let mut wf = at_review("Admin");
        wf.next();
        assert_eq!(wf.step(), Step::ReviewSubmit);
        assert!(!wf.can_go_next());
    }

    #[test]
    fn role_change_resets_non_optional_selections() {
        let mut wf = Workflow::default();
        fill_valid(&mut wf, "Admin");
        wf.next();
        assert!(wf.toggle_optional(PermissionKey::ExportData, true));
        assert!(wf.toggle_optional(PermissionKey::DeleteRecords, true));

        wf.back();
        wf.start_edit();
        wf.editor_mut().set_field(DraftField::Role, "Editor");
        wf.next();

        assert_eq!(wf.role(), Some(Role::Editor));
        assert!(wf.selections().get(PermissionKey::ExportData));
        assert!(!wf.selections().get(PermissionKey::DeleteRecords));
    }

    #[test]
    fn toggle_for_non_optional_key_is_ignored() {
        let mut wf = Workflow::default();
        fill_valid(&mut wf, "Viewer");
        wf.next();
        let before = wf.effective_permissions();

        assert!(!wf.toggle_optional(PermissionKey::ExportData, true));
        assert!(!wf.flip_optional(PermissionKey::BaseAccess));

        assert_eq!(wf.effective_permissions(), before);
    }

    #[test]
    fn effective_permissions_follow_role_and_picks() {
        let mut wf = Workflow::default();
        assert!(wf.effective_permissions().iter().all(|(_, e)| {
            !e.checked && e.mode == PermissionMode::Forbidden
        }));

        fill_valid(&mut wf, "Admin");
        wf.next();
        wf.flip_optional(PermissionKey::DeleteRecords);

        let granted: Vec<_> = wf.effective_permissions().granted().collect();
        assert_eq!(
            granted,
            vec![
                PermissionKey::BaseAccess,
                PermissionKey::ServerConfig,
                PermissionKey::UserManagement,
                PermissionKey::DeleteRecords,
            ]
        );
    }

    #[test]
    fn begin_submit_only_on_review_step() {
        let mut wf = Workflow::default();
        assert!(wf.begin_submit().is_none());
        assert!(!wf.is_submitting());
    }

    #[test]
    fn submitting_blocks_back_and_second_submit() {
        let mut wf = at_review("Admin");
        let payload = wf.begin_submit().unwrap();
        assert_eq!(payload.role, Some(Role::Admin));
        assert!(wf.is_submitting());

        assert!(wf.begin_submit().is_none());
        wf.back();
        assert_eq!(wf.step(), Step::ReviewSubmit);

        wf.finish_submit(Ok(()));
        assert!(!wf.is_submitting());
        assert_eq!(wf.message(), Some(SubmitMessage::Saved));
    }

    #[test]
    fn failed_submission_allows_retry() {
        let mut wf = at_review("Editor");
        wf.begin_submit();
        wf.finish_submit(Err(SubmissionError::Rejected));
        assert_eq!(wf.message(), Some(SubmitMessage::Failed));
        assert_eq!(wf.step(), Step::ReviewSubmit);

        assert!(wf.begin_submit().is_some());
        assert_eq!(wf.message(), None);
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut wf = at_review("Editor");
        wf.finish_submit(Ok(()));
        assert_eq!(wf.message(), None);
    }

    #[test]
    fn back_and_clear_message_drop_result_line() {
        let mut wf = at_review("Editor");
        wf.begin_submit();
        wf.finish_submit(Ok(()));
        wf.clear_message();
        assert_eq!(wf.message(), None);
        assert_eq!(wf.step(), Step::ReviewSubmit);

        wf.begin_submit();
        wf.finish_submit(Ok(()));
        wf.back();
        assert_eq!(wf.message(), None);
        assert_eq!(wf.step(), Step::AssignPermissions);
    }

    #[tokio::test]
    async fn submit_runs_begin_and_finish() {
        let mut wf = at_review("Admin");
        let submitter = SimulatedSubmitter::new(Duration::ZERO, 1.0);

        let outcome = wf.submit(&submitter).await;

        assert_eq!(outcome, Some(Ok(())));
        assert_eq!(wf.message(), Some(SubmitMessage::Saved));
        assert_eq!(wf.submission(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn submit_off_review_step_does_nothing() {
        let mut wf = Workflow::default();
        let submitter = SimulatedSubmitter::new(Duration::ZERO, 1.0);
        assert_eq!(wf.submit(&submitter).await, None);
    }

    #[test]
    fn step_display_and_navigation() {
        assert_eq!(Step::AssignPermissions.to_string(), "2: Assign Permissions");
        assert_eq!(Step::EditProfile.prev(), None);
        assert_eq!(Step::ReviewSubmit.next(), None);
    }
}
