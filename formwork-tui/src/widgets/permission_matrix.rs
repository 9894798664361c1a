//! Role permission matrix for the workflow's second step.
//!
//! One row per rule, in table order. Only optional rows react to the
//! toggle key; required and forbidden rows are shown locked.

use formwork_core::{EffectivePermissions, PermissionMode, Role, RuleTable};
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::Theme;

#[derive(Debug, Clone, Copy)]
pub struct PermissionMatrixWidget<'a> {
    pub rules: &'a RuleTable,
    pub effective: &'a EffectivePermissions,
    pub role: Option<Role>,
    /// Highlighted row, `None` when the matrix is read-only (review step).
    pub cursor: Option<usize>,
}

impl<'a> PermissionMatrixWidget<'a> {
    pub fn title(&self) -> String {
        match self.role {
            Some(role) => format!(" Permissions for {role} "),
            None => " Permissions (no role selected) ".to_string(),
        }
    }

    pub fn to_table(&self, theme: &Theme) -> Table<'a> {
        let header = Row::new(["", "Permission", "Mode", "Description"]).style(
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .rules
            .defs()
            .iter()
            .enumerate()
            .map(|(i, def)| {
                let entry = self.effective.get(def.key);
                let checked = entry.is_some_and(|e| e.checked);
                let mode = entry.map_or(PermissionMode::Forbidden, |e| e.mode);
                let mark = match (checked, mode) {
                    (true, PermissionMode::Required) => "[■]",
                    (true, _) => "[x]",
                    (false, _) => "[ ]",
                };
                let text_style = if mode == PermissionMode::Forbidden {
                    Style::default().fg(theme.muted)
                } else {
                    Style::default().fg(theme.fg)
                };
                let row_style = if self.cursor == Some(i) {
                    theme.selected()
                } else {
                    Style::default()
                };

                Row::new([
                    Cell::from(Span::styled(mark, Style::default().fg(theme.mode_color(mode)))),
                    Cell::from(Span::styled(def.label.as_str(), text_style)),
                    Cell::from(Span::styled(
                        mode.to_string(),
                        Style::default().fg(theme.mode_color(mode)),
                    )),
                    Cell::from(Span::styled(def.description.as_str(), theme.dim)),
                ])
                .style(row_style)
            })
            .collect();

        Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(22),
                Constraint::Length(9),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(self.title())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
    }
}
