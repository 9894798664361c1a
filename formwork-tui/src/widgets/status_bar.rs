//! Bottom line: the latest notice, then key hints.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;
use crate::state::Notice;

#[derive(Debug, Clone)]
pub struct StatusBarWidget<'a> {
    pub notice: Option<&'a Notice>,
    pub hints: Vec<(&'static str, &'static str)>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let mut spans = Vec::new();
        if let Some(notice) = self.notice {
            spans.push(Span::styled(
                format!("[{}] ", notice.at.format("%H:%M:%S")),
                Style::default().fg(theme.muted),
            ));
            spans.push(Span::styled(
                notice.text.clone(),
                Style::default().fg(theme.warning),
            ));
            spans.push(Span::raw("  "));
        }
        for (key, label) in &self.hints {
            spans.push(Span::styled(format!("[{key}]"), Style::default().fg(theme.accent)));
            spans.push(Span::styled(format!(" {label}  "), Style::default().fg(theme.fg)));
        }
        Paragraph::new(Line::from(spans))
    }
}
