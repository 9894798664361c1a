//! Terminal UI for formwork.
//!
//! Three demo panels share one ratatui app: a profile card, a team roster
//! and a role permissions workflow. All of the editing rules live in
//! `formwork-core`; this crate maps keys onto them and draws the result.

mod app;
mod form;
mod keybindings;
mod state;
mod terminal;
mod theme;
mod views;
mod widgets;

pub use app::{App, AppOptions};
pub use keybindings::{Action, KeyBindings};
pub use state::{AppState, Mode, Notice};
pub use terminal::{FormworkTerminal, install_panic_hook, restore_terminal, setup_terminal};
pub use theme::{Theme, formwork_default};
pub use views::{HomeView, ProfileView, TeamView, View, ViewRenderer, ViewStack, WorkflowView};
pub use widgets::{
    ConfirmationDialog, EditFormWidget, MemberTableWidget, PendingDelete, PermissionMatrixWidget,
    ProfileCardWidget, ReviewWidget, StatusBarWidget, StepBarWidget,
};
