//! Home screen: one tile per panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::stack::View;
use super::traits::ViewRenderer;
use crate::App;

#[derive(Debug, Clone, Default)]
pub struct HomeView;

fn blurb(view: View) -> &'static str {
    match view {
        View::Profile => "Edit one profile with draft, validate and commit",
        View::Team => "Search, add, edit and remove team members",
        View::Workflow => "Edit a user, assign permissions, then review and submit",
        View::Home => "",
    }
}

impl ViewRenderer for HomeView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let items: Vec<ListItem> = View::PANELS
            .iter()
            .enumerate()
            .map(|(i, view)| {
                let selected = i == app.state.home_selected;
                let title_style = if selected {
                    theme.selected()
                } else {
                    theme.bold.fg(theme.fg)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!(" [{}] ", i + 1), Style::default().fg(theme.accent)),
                        Span::styled(view.title(), title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("     {}", blurb(*view)),
                        Style::default().fg(theme.muted),
                    )),
                    Line::default(),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(" formwork ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(list, area);
    }

    fn title(&self) -> &str {
        "Home"
    }

    fn hints(&self, _app: &App) -> Vec<(&'static str, &'static str)> {
        vec![("1-3", "Open"), ("j/k", "Move"), ("Enter", "Open"), ("q", "Quit")]
    }
}
