//! Team roster table with the search box above it.

use formwork_core::{Member, Roster, roster::initials};
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::Theme;

const EMPTY: &str = "No members match the current search/filter.";
const PLACEHOLDER: &str = "Search by name / role / location...";

#[derive(Debug, Clone, Copy)]
pub struct MemberTableWidget<'a> {
    pub roster: &'a Roster,
    /// The search box has keyboard focus.
    pub searching: bool,
}

impl<'a> MemberTableWidget<'a> {
    pub fn new(roster: &'a Roster, searching: bool) -> Self {
        Self { roster, searching }
    }

    pub fn search_box(&self, theme: &Theme) -> Paragraph<'a> {
        let query = self.roster.query();
        let text = if query.is_empty() && !self.searching {
            Span::styled(PLACEHOLDER, Style::default().fg(theme.muted))
        } else {
            let cursor = if self.searching { "▏" } else { "" };
            Span::styled(format!("{query}{cursor}"), Style::default().fg(theme.fg))
        };
        let border = if self.searching {
            theme.highlight
        } else {
            theme.border
        };
        Paragraph::new(Line::from(vec![Span::raw("/ "), text])).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
    }

    pub fn to_table(&self, theme: &Theme) -> Table<'a> {
        let filtered = self.roster.filtered();
        let block = Block::default()
            .title(format!(" Members ({}) ", filtered.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        if filtered.is_empty() {
            let row = Row::new([Cell::from(Span::styled(
                EMPTY,
                Style::default().fg(theme.muted),
            ))]);
            return Table::new([row], [Constraint::Percentage(100)]).block(block);
        }

        let header = Row::new(["Member", "Current Role", "Location", "Tags"]).style(
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = filtered
            .iter()
            .enumerate()
            .map(|(i, member)| member_row(member, i == self.roster.selected(), theme))
            .collect();

        Table::new(
            rows,
            [
                Constraint::Percentage(32),
                Constraint::Length(14),
                Constraint::Percentage(22),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block)
    }
}

fn member_row<'a>(member: &Member, selected: bool, theme: &Theme) -> Row<'a> {
    let r = &member.record;
    let name = if r.name.trim().is_empty() {
        "(unnamed)".to_string()
    } else {
        r.name.clone()
    };
    let online = if r.is_online { "●" } else { "○" };
    let style = if selected {
        theme.selected()
    } else {
        Style::default().fg(theme.fg)
    };

    Row::new([
        Cell::from(Line::from(vec![
            Span::styled(
                format!("{online} "),
                Style::default().fg(if r.is_online {
                    theme.success
                } else {
                    theme.muted
                }),
            ),
            Span::styled(
                format!("{:<3}", initials(&r.name)),
                Style::default().fg(theme.accent),
            ),
            Span::raw(name),
        ])),
        Cell::from(format!("[{}]", r.role)),
        Cell::from(r.location.clone()),
        Cell::from(
            r.tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" "),
        ),
    ])
    .style(style)
}
