//! Role permissions workflow panel.

use formwork_core::Step;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::traits::ViewRenderer;
use crate::App;
use crate::widgets::{
    EditFormWidget, PermissionMatrixWidget, ProfileCardWidget, ReviewWidget, StepBarWidget,
};

#[derive(Debug, Clone, Default)]
pub struct WorkflowView;

impl ViewRenderer for WorkflowView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let workflow = &app.state.workflow;
        let theme = &app.theme;

        let chunks = Layout::default()
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let bar = StepBarWidget {
            current: workflow.step(),
            submitting: workflow.is_submitting(),
        };
        frame.render_widget(bar.to_paragraph(theme), chunks[0]);

        match workflow.step() {
            Step::EditProfile if workflow.editor().is_editing() => {
                let form = EditFormWidget::new(workflow.editor(), app.state.form_focus);
                frame.render_widget(form.to_paragraph(theme), chunks[1]);
            }
            Step::EditProfile => {
                let card = ProfileCardWidget::new(workflow.profile());
                frame.render_widget(card.to_paragraph(theme), chunks[1]);
            }
            Step::AssignPermissions => {
                let effective = workflow.effective_permissions();
                let matrix = PermissionMatrixWidget {
                    rules: workflow.rules(),
                    effective: &effective,
                    role: workflow.role(),
                    cursor: Some(app.state.permission_cursor),
                };
                frame.render_widget(matrix.to_table(theme), chunks[1]);
            }
            Step::ReviewSubmit => {
                let review = ReviewWidget { workflow };
                frame.render_widget(review.to_paragraph(theme), chunks[1]);
            }
        }
    }

    fn title(&self) -> &str {
        "Role Permissions"
    }

    fn hints(&self, app: &App) -> Vec<(&'static str, &'static str)> {
        let workflow = &app.state.workflow;
        if workflow.is_submitting() {
            return vec![("q", "Quit")];
        }
        match workflow.step() {
            Step::EditProfile if workflow.editor().is_editing() => {
                vec![("Tab", "Next field"), ("Ctrl-N", "Next"), ("Esc", "Close")]
            }
            Step::EditProfile => vec![("e", "Edit"), ("n", "Next"), ("Esc", "Close")],
            Step::AssignPermissions => vec![
                ("j/k", "Move"),
                ("Space", "Toggle"),
                ("b", "Back"),
                ("n", "Next"),
            ],
            Step::ReviewSubmit if workflow.message().is_some() => {
                vec![("s", "Submit again"), ("x", "Dismiss"), ("b", "Back")]
            }
            Step::ReviewSubmit => vec![("s", "Submit"), ("b", "Back"), ("Esc", "Close")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::DraftField;

    #[test]
    fn hints_follow_step() {
        let mut app = App::default();
        assert!(WorkflowView.hints(&app).contains(&("Ctrl-N", "Next")));

        let editor = app.state.workflow.editor_mut();
        editor.set_field(DraftField::Name, "Grace Hopper");
        editor.set_field(DraftField::Role, "Viewer");
        editor.set_field(DraftField::Location, "Arlington");
        editor.set_field(DraftField::Tags, "cobol");
        app.state.workflow.next();

        assert!(WorkflowView.hints(&app).contains(&("Space", "Toggle")));
    }
}
