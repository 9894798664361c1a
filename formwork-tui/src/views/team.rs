//! Team membership panel.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::traits::ViewRenderer;
use crate::widgets::{EditFormWidget, MemberTableWidget};
use crate::{App, Mode};

#[derive(Debug, Clone, Default)]
pub struct TeamView;

impl ViewRenderer for TeamView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let roster = &app.state.roster;
        let widget = MemberTableWidget::new(roster, app.state.mode == Mode::Search);

        let form_height = if roster.is_editing() {
            Constraint::Length(14)
        } else {
            Constraint::Length(0)
        };
        let chunks = Layout::default()
            .constraints([Constraint::Length(3), Constraint::Min(3), form_height])
            .split(area);

        frame.render_widget(widget.search_box(&app.theme), chunks[0]);
        frame.render_widget(widget.to_table(&app.theme), chunks[1]);

        if let Some(editor) = roster.editor() {
            let form = EditFormWidget::new(editor, app.state.form_focus);
            frame.render_widget(form.to_paragraph(&app.theme), chunks[2]);
        }
    }

    fn title(&self) -> &str {
        "Team Membership"
    }

    fn hints(&self, app: &App) -> Vec<(&'static str, &'static str)> {
        if app.state.confirmation.is_visible() {
            vec![("y", "Delete"), ("n", "Keep")]
        } else if app.state.mode == Mode::Search {
            vec![("Enter", "Done"), ("Esc", "Clear")]
        } else if app.state.roster.is_editing() {
            vec![("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")]
        } else {
            vec![
                ("/", "Search"),
                ("a", "Add"),
                ("e", "Edit"),
                ("d", "Delete"),
                ("c", "Contact"),
                ("Esc", "Close"),
            ]
        }
    }
}
