//! Summary shown on the workflow's review step.

use formwork_core::Workflow;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::Theme;

#[derive(Debug, Clone, Copy)]
pub struct ReviewWidget<'a> {
    pub workflow: &'a Workflow,
}

impl<'a> ReviewWidget<'a> {
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let profile = self.workflow.profile();
        let label = Style::default().fg(theme.muted);
        let value = Style::default().fg(theme.fg);
        let field = |name: &'static str, text: String| {
            Line::from(vec![
                Span::styled(format!("{name:<10}"), label),
                Span::styled(text, value),
            ])
        };

        let mut lines = vec![
            Line::from(Span::styled("User", theme.bold)),
            field("Name", profile.name.clone()),
            field(
                "Role",
                self.workflow
                    .role()
                    .map_or_else(|| "-".to_string(), |r| r.to_string()),
            ),
            field("Location", profile.location.clone()),
            field(
                "Status",
                if profile.is_online { "Online" } else { "Offline" }.to_string(),
            ),
            field("Tags", profile.tags.join(", ")),
            Line::default(),
            Line::from(Span::styled("Granted permissions", theme.bold)),
        ];

        let rules = self.workflow.rules();
        let granted: Vec<Line> = self
            .workflow
            .effective_permissions()
            .granted()
            .map(|key| {
                let name = rules
                    .get(key)
                    .map_or_else(|| key.to_string(), |d| d.label.clone());
                Line::from(vec![
                    Span::styled("  ✓ ", Style::default().fg(theme.success)),
                    Span::styled(name, value),
                    Span::styled(format!("  {key}"), label),
                ])
            })
            .collect();
        if granted.is_empty() {
            lines.push(Line::from(Span::styled("  None", label)));
        }
        lines.extend(granted);

        if self.workflow.is_submitting() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Submitting...",
                Style::default().fg(theme.warning),
            )));
        } else if let Some(message) = self.workflow.message() {
            let color = if message.is_success() {
                theme.success
            } else {
                theme.error
            };
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                message.text(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Review & Submit ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formwork_default;
    use formwork_core::{DraftField, SubmissionError};
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    fn at_review() -> Workflow {
        let mut wf = Workflow::default();
        let editor = wf.editor_mut();
        editor.set_field(DraftField::Name, "Dorothy Vaughan");
        editor.set_field(DraftField::Role, "Editor");
        editor.set_field(DraftField::Location, "Langley");
        editor.set_field(DraftField::Tags, "fortran");
        wf.next();
        wf.next();
        wf
    }

    fn draw(wf: &Workflow) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let widget = ReviewWidget { workflow: wf };
        terminal
            .draw(|f| {
                f.render_widget(
                    widget.to_paragraph(&formwork_default()),
                    Rect::new(0, 0, 80, 20),
                )
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn shows_profile_and_granted_labels() {
        let content = draw(&at_review());
        assert!(content.contains("Dorothy Vaughan"));
        assert!(content.contains("Editor"));
        assert!(content.contains("✓ Basic Access Right"));
        assert!(!content.contains("Server Configuration"));
    }

    #[test]
    fn shows_submission_result() {
        let mut wf = at_review();
        wf.begin_submit();
        assert!(draw(&wf).contains("Submitting..."));

        wf.finish_submit(Err(SubmissionError::Rejected));
        // The emoji is double width, so match the text after it.
        assert!(draw(&wf).contains("Failed to save. Please try again."));
    }
}
