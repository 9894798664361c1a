//! Main application struct and event loop for the formwork TUI.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use formwork_core::{RuleTable, SimulatedSubmitter, Step, SubmissionError, Submitter};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::form::{FormOutcome, handle_form_key};
use crate::keybindings::{Action, KeyBindings};
use crate::views::{
    HomeView, ProfileView, TeamView, View, ViewRenderer, ViewStack, WorkflowView,
};
use crate::widgets::StatusBarWidget;
use crate::{
    AppState, FormworkTerminal, Mode, Theme, formwork_default, restore_terminal, setup_terminal,
};

/// How an [`App`] is put together.
pub struct AppOptions {
    pub rules: RuleTable,
    pub submitter: Arc<dyn Submitter>,
    /// Panel to open on launch. Home stays underneath it.
    pub start: View,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            rules: RuleTable::default(),
            submitter: Arc::new(SimulatedSubmitter::default()),
            start: View::Home,
        }
    }
}

/// Main TUI application.
pub struct App {
    pub state: AppState,
    pub views: ViewStack,
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub running: bool,
    submitter: Arc<dyn Submitter>,
    /// Outcome of the submission running in the background, if any.
    pending_submit: Option<oneshot::Receiver<Result<(), SubmissionError>>>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("views", &self.views)
            .field("running", &self.running)
            .field("submit_pending", &self.pending_submit.is_some())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates a new App with the built-in rules and simulated submitter.
    pub fn new() -> Self {
        Self::with_options(AppOptions::default())
    }

    pub fn with_options(options: AppOptions) -> Self {
        Self {
            state: AppState::new(options.rules),
            views: ViewStack::starting_at(options.start),
            keybindings: KeyBindings::default(),
            theme: formwork_default(),
            running: true,
            submitter: options.submitter,
            pending_submit: None,
        }
    }

    pub fn is_submit_pending(&self) -> bool {
        self.pending_submit.is_some()
    }

    /// Handles a key event.
    ///
    /// Ctrl-C always quits. Otherwise the delete dialog, the search box and
    /// an open edit form get the key before the keybindings do.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        let view = self.views.current;

        if self.state.confirmation.is_visible() {
            match self.keybindings.resolve(key, &view) {
                Some(Action::Confirm) => self.confirm_delete(),
                Some(Action::Deny | Action::Back) => self.state.confirmation.hide(),
                _ => {}
            }
            return;
        }

        if self.state.mode == Mode::Search {
            self.handle_search_key(key);
            return;
        }

        let mut focus = self.state.form_focus;
        let outcome = self
            .state
            .editing_form_mut(view)
            .map(|editor| handle_form_key(editor, &mut focus, key));
        self.state.form_focus = focus;

        match outcome {
            Some(FormOutcome::Edited) => {}
            Some(FormOutcome::Save) => self.save_form(view),
            Some(FormOutcome::Cancel) => self.cancel_form(view),
            Some(FormOutcome::Unhandled) | None => {
                if let Some(action) = self.keybindings.resolve(key, &view) {
                    self.execute_action(action);
                }
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let roster = &mut self.state.roster;
        match key.code {
            KeyCode::Esc => {
                roster.set_query("");
                self.state.mode = Mode::Normal;
            }
            KeyCode::Enter => self.state.mode = Mode::Normal,
            KeyCode::Backspace => roster.pop_query_char(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                roster.push_query_char(c);
            }
            _ => {}
        }
    }

    fn save_form(&mut self, view: View) {
        match view {
            View::Profile => {
                if let Err(err) = self.state.profile.save() {
                    tracing::debug!(error = %err, "profile save rejected");
                }
                self.pull_notices();
            }
            View::Team => {
                if let Some(Err(err)) = self.state.roster.save_edit() {
                    tracing::debug!(error = %err, "member save rejected");
                }
                self.pull_notices();
            }
            View::Workflow => self.next_step(),
            View::Home => {}
        }
        if self.state.editing_form(view).is_none() {
            self.state.form_focus = Default::default();
        }
    }

    fn cancel_form(&mut self, view: View) {
        match view {
            View::Profile => self.state.profile.cancel(),
            View::Team => self.state.roster.cancel_edit(),
            // The workflow form has no cancel of its own; Esc closes the panel.
            View::Workflow => self.execute_action(Action::Back),
            View::Home => {}
        }
        self.state.form_focus = Default::default();
    }

    /// Executes an action.
    fn execute_action(&mut self, action: Action) {
        let view = self.views.current;
        match action {
            Action::Quit => self.running = false,
            Action::Back => self.close_panel(),
            Action::JumpToPanel(number) => {
                if view == View::Home
                    && let Some(panel) = View::panel(number)
                {
                    self.open_panel(panel);
                }
            }
            Action::Select => match view {
                View::Home => {
                    let number = self.state.home_selected + 1;
                    self.execute_action(Action::JumpToPanel(number));
                }
                View::Team => self.execute_action(Action::Edit),
                View::Workflow if self.state.workflow.step() == Step::AssignPermissions => {
                    self.execute_action(Action::Toggle);
                }
                _ => {}
            },
            Action::NavigateUp | Action::NavigateDown => {
                let down = action == Action::NavigateDown;
                self.move_cursor(view, down);
            }
            Action::NavigateLeft if view == View::Workflow => self.prev_step(),
            Action::NavigateRight if view == View::Workflow => self.next_step(),
            Action::NavigateLeft | Action::NavigateRight => {}
            Action::Edit => self.start_edit(view),
            Action::Contact => self.contact(view),
            Action::Add => {
                if view == View::Team && !self.state.roster.is_editing() {
                    self.state.roster.add();
                    self.state.form_focus = Default::default();
                }
            }
            Action::Delete => {
                if view == View::Team
                    && let Some(member) = self.state.roster.selected_member()
                {
                    let (id, name) = (member.id, member.record.name.clone());
                    self.state.confirmation.show(id, name);
                }
            }
            Action::Search => {
                if view == View::Team && !self.state.roster.is_editing() {
                    self.state.mode = Mode::Search;
                }
            }
            Action::Confirm => self.confirm_delete(),
            Action::Deny => self.state.confirmation.hide(),
            Action::NextStep => self.next_step(),
            Action::PrevStep => self.prev_step(),
            Action::Toggle => self.toggle_permission(),
            Action::Submit => self.start_submit(),
            Action::ClearMessage => self.state.workflow.clear_message(),
        }
    }

    fn open_panel(&mut self, panel: View) {
        tracing::debug!(panel = panel.slug(), "opening panel");
        self.views.push(panel);
        self.state.mode = Mode::Normal;
        self.state.form_focus = Default::default();
    }

    /// Pops the current panel and throws its state away.
    fn close_panel(&mut self) {
        if self.views.current == View::Workflow && self.state.workflow.is_submitting() {
            self.state.notify("Please wait for the submission to finish.");
            return;
        }
        if let Some(closed) = self.views.pop() {
            tracing::debug!(panel = closed.slug(), "closing panel");
            self.state.reset_panel(closed);
            if closed == View::Workflow {
                self.pending_submit = None;
            }
        }
    }

    fn move_cursor(&mut self, view: View, down: bool) {
        match view {
            View::Home => {
                let len = View::PANELS.len();
                let i = self.state.home_selected;
                self.state.home_selected = if down { (i + 1) % len } else { (i + len - 1) % len };
            }
            View::Team if down => self.state.roster.select_next(),
            View::Team => self.state.roster.select_prev(),
            View::Workflow if self.state.workflow.step() == Step::AssignPermissions => {
                let len = self.state.workflow.rules().len();
                if len == 0 {
                    return;
                }
                let i = self.state.permission_cursor.min(len - 1);
                self.state.permission_cursor =
                    if down { (i + 1) % len } else { (i + len - 1) % len };
            }
            View::Profile | View::Workflow => {}
        }
    }

    fn start_edit(&mut self, view: View) {
        let started = match view {
            View::Profile => self.state.profile.start_edit(),
            View::Team => match self.state.roster.selected_member().map(|m| m.id) {
                Some(id) => self.state.roster.edit(id),
                None => false,
            },
            View::Workflow => self.state.workflow.start_edit(),
            View::Home => false,
        };
        if started {
            self.state.form_focus = Default::default();
        }
    }

    fn contact(&mut self, view: View) {
        let text = match view {
            View::Profile => Some(self.state.profile.contact()),
            View::Team => self
                .state
                .roster
                .selected_member()
                .and_then(|m| self.state.roster.contact(m.id)),
            _ => None,
        };
        if let Some(text) = text {
            self.state.notify(text);
        }
    }

    fn confirm_delete(&mut self) {
        let Some(pending) = self.state.confirmation.take() else {
            return;
        };
        if self.state.roster.delete(pending.id) {
            self.state.form_focus = Default::default();
        }
    }

    fn next_step(&mut self) {
        let before = self.state.workflow.step();
        self.state.workflow.next();
        if self.state.workflow.step() != before {
            self.state.form_focus = Default::default();
            self.state.permission_cursor = 0;
        }
    }

    fn prev_step(&mut self) {
        let before = self.state.workflow.step();
        self.state.workflow.back();
        if self.state.workflow.step() != before {
            self.state.form_focus = Default::default();
        }
    }

    fn toggle_permission(&mut self) {
        let workflow = &mut self.state.workflow;
        if workflow.step() != Step::AssignPermissions {
            return;
        }
        let Some(def) = workflow.rules().defs().get(self.state.permission_cursor) else {
            return;
        };
        let (key, label) = (def.key, def.label.clone());
        if !workflow.flip_optional(key) {
            self.state.notify(format!("{label} is not optional for this role."));
        }
    }

    /// Hands the reviewed workflow to the submitter on a background task.
    fn start_submit(&mut self) {
        let Some(payload) = self.state.workflow.begin_submit() else {
            return;
        };
        let (tx, rx) = oneshot::channel();
        let submitter = Arc::clone(&self.submitter);
        tokio::spawn(async move {
            let outcome = submitter.submit(payload).await;
            // The receiver is gone if the panel was closed meanwhile.
            let _ = tx.send(outcome);
        });
        self.pending_submit = Some(rx);
        tracing::info!("submission started");
    }

    fn pull_notices(&mut self) {
        let notice = self
            .state
            .profile
            .take_notice()
            .or_else(|| self.state.roster.take_notice());
        if let Some(text) = notice {
            self.state.notify(text);
        }
    }

    /// Renders the application to the terminal frame.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let renderer = self.renderer();
        renderer.render(frame, chunks[0], self);
        self.render_status(frame, chunks[1], renderer);

        if self.state.confirmation.is_visible() {
            self.state.confirmation.render(frame, &self.theme);
        }
    }

    fn renderer(&self) -> &'static dyn ViewRenderer {
        match self.views.current {
            View::Home => &HomeView,
            View::Profile => &ProfileView,
            View::Team => &TeamView,
            View::Workflow => &WorkflowView,
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, renderer: &dyn ViewRenderer) {
        let status = StatusBarWidget {
            notice: self.state.notice.as_ref(),
            hints: renderer.hints(self),
        };
        frame.render_widget(status.to_paragraph(&self.theme), area);
    }

    /// Processes async updates.
    ///
    /// Picks up the outcome of a running submission once it lands.
    pub async fn tick(&mut self) {
        let Some(rx) = &mut self.pending_submit else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err(SubmissionError::ChannelClosed),
        };
        self.pending_submit = None;
        self.state.workflow.finish_submit(outcome);
    }

    /// Runs the main event loop.
    ///
    /// Sets up the terminal, enters the render/input loop, and restores
    /// the terminal on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.event_loop(&mut terminal).await;

        // Always restore terminal, even if event loop failed
        restore_terminal(&mut terminal)?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut FormworkTerminal) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }

            self.tick().await;
        }

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
