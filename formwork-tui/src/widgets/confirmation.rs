//! Yes/no dialog guarding member deletion.

use formwork_core::MemberId;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::Theme;

/// The member a delete is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: MemberId,
    pub name: String,
}

impl PendingDelete {
    pub fn message(&self) -> String {
        if self.name.trim().is_empty() {
            "Delete this unnamed member?".to_string()
        } else {
            format!("Delete {}?", self.name.trim())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmationDialog {
    pending: Option<PendingDelete>,
}

impl ConfirmationDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, id: MemberId, name: impl Into<String>) {
        self.pending = Some(PendingDelete {
            id,
            name: name.into(),
        });
    }

    pub fn hide(&mut self) {
        self.pending = None;
    }

    /// Closes the dialog and hands back what was pending.
    pub fn take(&mut self) -> Option<PendingDelete> {
        self.pending.take()
    }

    pub fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    /// Draws the dialog centered over whatever is on screen.
    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let Some(pending) = &self.pending else {
            return;
        };

        let area = frame.area();
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 5u16.min(area.height);
        let dialog = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Delete Member ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let lines = vec![
            Line::from(Span::styled(pending.message(), Style::default().fg(theme.fg))),
            Line::default(),
            Line::from(vec![
                Span::styled("[y]", Style::default().fg(theme.accent)),
                Span::styled(" Delete  ", Style::default().fg(theme.fg)),
                Span::styled("[n]", Style::default().fg(theme.accent)),
                Span::styled(" Keep", Style::default().fg(theme.fg)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
