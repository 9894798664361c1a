//! Profile card panel.

use ratatui::{Frame, layout::Rect};

use super::traits::ViewRenderer;
use crate::App;
use crate::widgets::{EditFormWidget, ProfileCardWidget};

#[derive(Debug, Clone, Default)]
pub struct ProfileView;

impl ViewRenderer for ProfileView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let desk = &app.state.profile;
        if desk.editor().is_editing() {
            let form = EditFormWidget::new(desk.editor(), app.state.form_focus);
            frame.render_widget(form.to_paragraph(&app.theme), area);
        } else {
            let card = ProfileCardWidget::new(desk.record());
            frame.render_widget(card.to_paragraph(&app.theme), area);
        }
    }

    fn title(&self) -> &str {
        "Profile Card"
    }

    fn hints(&self, app: &App) -> Vec<(&'static str, &'static str)> {
        if app.state.profile.editor().is_editing() {
            vec![("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")]
        } else {
            vec![("e", "Edit"), ("c", "Contact"), ("Esc", "Close"), ("q", "Quit")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_follow_editor_mode() {
        let mut app = App::default();
        let editing = ProfileView.hints(&app);
        assert!(editing.contains(&("Enter", "Save")));

        app.state.profile.cancel();
        let viewing = ProfileView.hints(&app);
        assert!(viewing.contains(&("e", "Edit")));
    }
}
