//! Progress header for the workflow panel.

use formwork_core::Step;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

#[derive(Debug, Clone, Copy)]
pub struct StepBarWidget {
    pub current: Step,
    pub submitting: bool,
}

impl StepBarWidget {
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'static> {
        let mut spans = Vec::new();
        for (i, step) in Step::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" › ", Style::default().fg(theme.muted)));
            }
            let style = if *step == self.current {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if *step < self.current {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.muted)
            };
            let mark = if *step < self.current { "✓" } else { "" };
            spans.push(Span::styled(
                format!("{} {}{mark}", step.number(), step.title()),
                style,
            ));
        }
        if self.submitting {
            spans.push(Span::styled(
                "   Submitting...",
                Style::default().fg(theme.warning),
            ));
        }
        Paragraph::new(Line::from(spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formwork_default;

    fn text(bar: StepBarWidget) -> String {
        let paragraph = bar.to_paragraph(&formwork_default());
        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::TestBackend::new(90, 1)).unwrap();
        terminal
            .draw(|f| f.render_widget(paragraph, f.area()))
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
    fn lists_all_steps_in_order() {
        let content = text(StepBarWidget {
            current: Step::EditProfile,
            submitting: false,
        });
        let edit = content.find("1 Edit User").unwrap();
        let assign = content.find("2 Assign Permissions").unwrap();
        let review = content.find("3 Review & Submit").unwrap();
        assert!(edit < assign && assign < review);
    }

    #[test]
    fn completed_steps_are_ticked() {
        let content = text(StepBarWidget {
            current: Step::ReviewSubmit,
            submitting: true,
        });
        assert!(content.contains("1 Edit User✓"));
        assert!(content.contains("2 Assign Permissions✓"));
        assert!(content.contains("Submitting..."));
    }
}
