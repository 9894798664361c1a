//! View system for the formwork TUI.
//!
//! - `View` names the home screen and the three panels
//! - `ViewStack` handles open/close navigation
//! - `ViewRenderer` is implemented once per screen

mod home;
mod profile;
mod stack;
mod team;
mod traits;
mod workflow;

pub use home::HomeView;
pub use profile::ProfileView;
pub use stack::{View, ViewStack};
pub use team::TeamView;
pub use traits::ViewRenderer;
pub use workflow::WorkflowView;
