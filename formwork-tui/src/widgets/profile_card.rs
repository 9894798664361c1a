//! Profile card (read-only) and the edit form that replaces it while a
//! draft is open.

use formwork_core::{
    DraftEditor, DraftField, Record,
    editor::BIO_MAX_CHARS,
    roster::initials,
};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::Theme;

/// Committed profile, as shown outside edit mode.
#[derive(Debug, Clone, Copy)]
pub struct ProfileCardWidget<'a> {
    pub record: &'a Record,
    pub title: &'a str,
}

impl<'a> ProfileCardWidget<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            title: "Profile",
        }
    }

    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let r = self.record;
        let dim = Style::default().fg(theme.muted);

        let (dot, status, status_color) = if r.is_online {
            ("●", "Online", theme.success)
        } else {
            ("○", "Offline", theme.muted)
        };

        let badge = if r.avatar_url.trim().is_empty() {
            format!("({}) ", initials(&r.name))
        } else {
            "(img) ".to_string()
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(badge, Style::default().fg(theme.accent)),
                Span::styled(or_dash(r.name.as_str()), theme.bold),
                Span::raw("  "),
                Span::styled(format!("{dot} {status}"), Style::default().fg(status_color)),
            ]),
            Line::from(vec![
                Span::styled("Role      ", dim),
                Span::styled(or_dash(r.role.as_str()), Style::default().fg(theme.fg)),
            ]),
            Line::from(vec![
                Span::styled("Location  ", dim),
                Span::styled(or_dash(r.location.as_str()), Style::default().fg(theme.fg)),
            ]),
        ];

        if !r.avatar_url.trim().is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Avatar    ", dim),
                Span::styled(r.avatar_url.as_str(), Style::default().fg(theme.fg)),
            ]));
        }

        let mut tags = vec![Span::styled("Tags      ", dim)];
        if r.tags.is_empty() {
            tags.push(Span::styled("-", Style::default().fg(theme.fg)));
        }
        for tag in &r.tags {
            tags.push(Span::styled(
                format!("#{tag} "),
                Style::default().fg(theme.accent),
            ));
        }
        lines.push(Line::from(tags));

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            or_dash(r.bio.as_str()),
            theme.italic,
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            )
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

/// Draft fields with the focused one highlighted.
#[derive(Debug, Clone, Copy)]
pub struct EditFormWidget<'a> {
    pub editor: &'a DraftEditor,
    pub focus: DraftField,
}

impl<'a> EditFormWidget<'a> {
    pub fn new(editor: &'a DraftEditor, focus: DraftField) -> Self {
        Self { editor, focus }
    }

    fn value(&self, field: DraftField) -> String {
        let draft = self.editor.draft();
        match field {
            DraftField::Role => format!("◀ {} ▶", self.editor.role_label()),
            DraftField::Online => {
                let mark = if draft.is_online { "x" } else { " " };
                format!("[{mark}] {}", draft.text(field))
            }
            DraftField::Bio => format!(
                "{}  ({}/{BIO_MAX_CHARS})",
                draft.bio,
                draft.bio.trim().chars().count()
            ),
            _ => draft.text(field),
        }
    }

    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let mut lines: Vec<Line> = DraftField::ALL
            .iter()
            .map(|&field| {
                let focused = field == self.focus;
                let marker = if focused { "›" } else { " " };
                let cursor = if focused && field.is_text() { "▏" } else { "" };
                let value_style = if focused {
                    theme.selected()
                } else {
                    Style::default().fg(theme.fg)
                };
                Line::from(vec![
                    Span::styled(format!("{marker} "), Style::default().fg(theme.accent)),
                    Span::styled(
                        format!("{:<24}", field.label()),
                        Style::default().fg(theme.muted),
                    ),
                    Span::styled(format!("{}{cursor}", self.value(field)), value_style),
                ])
            })
            .collect();

        if let Some(error) = self.editor.error() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("⚠ {error}"),
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        if !self.editor.options().hide_edit_actions {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("[Enter]", Style::default().fg(theme.accent)),
                Span::styled(" Save  ", Style::default().fg(theme.fg)),
                Span::styled("[Esc]", Style::default().fg(theme.accent)),
                Span::styled(" Cancel", Style::default().fg(theme.fg)),
            ]));
        }

        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Edit Profile ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.highlight)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formwork_default;
    use formwork_core::{EditorOptions, SaveRequest};
    use ratatui::{Terminal, backend::TestBackend, layout::Rect, widgets::Paragraph};

    fn draw(paragraph: Paragraph<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|f| f.render_widget(paragraph, Rect::new(0, 0, 80, 16)))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn ada() -> Record {
        Record {
            name: "Ada Lovelace".into(),
            role: "Admin".into(),
            location: "London".into(),
            bio: "First programmer".into(),
            is_online: true,
            tags: vec!["math".into(), "engines".into()],
            ..Default::default()
        }
    }

    // ==================== Card Tests ====================

    #[test]
    fn card_shows_committed_fields() {
        let record = ada();
        let content = draw(ProfileCardWidget::new(&record).to_paragraph(&formwork_default()));

        assert!(content.contains("(AL)"));
        assert!(content.contains("Ada Lovelace"));
        assert!(content.contains("● Online"));
        assert!(content.contains("London"));
        assert!(content.contains("#math"));
        assert!(content.contains("First programmer"));
    }

    #[test]
    fn card_shows_dashes_for_blank_record() {
        let record = Record::default();
        let content = draw(ProfileCardWidget::new(&record).to_paragraph(&formwork_default()));
        assert!(content.contains("○ Offline"));
        assert!(content.contains("Role      -"));
    }

    // ==================== Form Tests ====================

    #[test]
    fn form_lists_every_field_with_placeholder_role() {
        let editor = DraftEditor::new(&Record::default(), EditorOptions::editable());
        let content =
            draw(EditFormWidget::new(&editor, DraftField::Name).to_paragraph(&formwork_default()));

        for field in DraftField::ALL {
            assert!(content.contains(field.label()), "missing {}", field.label());
        }
        assert!(content.contains("◀ Select a role... ▶"));
        assert!(content.contains("[ ] Offline"));
        assert!(content.contains("[Enter] Save"));
    }

    #[test]
    fn form_shows_validation_error() {
        let mut editor = DraftEditor::new(&Record::default(), EditorOptions::editable());
        let mut owner = Record::default();
        editor.set_field(DraftField::Name, "Al");
        let _ = editor.save(SaveRequest::user(), &mut owner);

        let content =
            draw(EditFormWidget::new(&editor, DraftField::Role).to_paragraph(&formwork_default()));

        assert!(content.contains("⚠ Role is required."));
    }

    #[test]
    fn form_hides_actions_when_owner_drives_save() {
        let editor = DraftEditor::new(
            &Record::default(),
            EditorOptions::editable().hide_edit_actions(),
        );
        let content =
            draw(EditFormWidget::new(&editor, DraftField::Name).to_paragraph(&formwork_default()));
        assert!(!content.contains("[Enter] Save"));
    }

    #[test]
    fn bio_shows_character_count() {
        let mut editor = DraftEditor::new(&Record::default(), EditorOptions::editable());
        editor.set_field(DraftField::Bio, "héllo");
        let form = EditFormWidget::new(&editor, DraftField::Bio);
        assert_eq!(form.value(DraftField::Bio), "héllo  (5/300)");
    }
}
