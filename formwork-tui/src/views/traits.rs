//! Rendering contract for views.

use ratatui::{Frame, layout::Rect};

use crate::App;

/// Each view draws itself from the app state.
pub trait ViewRenderer {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App);

    fn title(&self) -> &str;

    /// Key hints for the status bar, as `(key, label)` pairs.
    fn hints(&self, app: &App) -> Vec<(&'static str, &'static str)>;
}
