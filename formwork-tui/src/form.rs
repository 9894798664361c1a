//! Keyboard input for an open edit form.
//!
//! Printable keys go into the focused field. Navigation keys move focus.
//! Save and cancel are reported back; the panel decides what they mean.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formwork_core::{DraftEditor, DraftField};

/// What a key did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// Consumed by the form.
    Edited,
    Save,
    Cancel,
    /// Not a form key; let the panel's bindings have it.
    Unhandled,
}

pub fn handle_form_key(
    editor: &mut DraftEditor,
    focus: &mut DraftField,
    key: KeyEvent,
) -> FormOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('s') if ctrl => FormOutcome::Save,
        KeyCode::Enter => FormOutcome::Save,
        KeyCode::Esc => FormOutcome::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            *focus = focus.next();
            FormOutcome::Edited
        }
        KeyCode::BackTab | KeyCode::Up => {
            *focus = focus.prev();
            FormOutcome::Edited
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            match *focus {
                DraftField::Role => editor.cycle_role(forward),
                DraftField::Online => editor.toggle_online(),
                _ => {}
            }
            FormOutcome::Edited
        }
        KeyCode::Backspace => {
            editor.pop_char(*focus);
            FormOutcome::Edited
        }
        KeyCode::Char(_) if ctrl || alt => FormOutcome::Unhandled,
        KeyCode::Char(c) => {
            match *focus {
                DraftField::Online if c == ' ' => editor.toggle_online(),
                DraftField::Role if c == ' ' => editor.cycle_role(true),
                field => editor.push_char(field, c),
            }
            FormOutcome::Edited
        }
        _ => FormOutcome::Unhandled,
    }
}
