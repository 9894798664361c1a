//! Widgets for the formwork TUI.

mod confirmation;
mod member_table;
mod permission_matrix;
mod profile_card;
mod review;
mod status_bar;
mod step_bar;

pub use confirmation::{ConfirmationDialog, PendingDelete};
pub use member_table::MemberTableWidget;
pub use permission_matrix::PermissionMatrixWidget;
pub use profile_card::{EditFormWidget, ProfileCardWidget};
pub use review::ReviewWidget;
pub use status_bar::StatusBarWidget;
pub use step_bar::StepBarWidget;
