//! Key-to-action mapping.
//!
//! Global bindings apply everywhere; panel bindings take precedence on their
//! panel. Text entry (edit forms, the team search box) bypasses this table.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::views::View;

/// Actions that can be triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Quit,
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    Select,
    Back,
    JumpToPanel(usize),

    // Records
    Edit,
    Contact,
    Add,
    Delete,
    Search,
    Confirm,
    Deny,

    // Workflow
    NextStep,
    PrevStep,
    Toggle,
    Submit,
    ClearMessage,
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub global: HashMap<KeyEvent, Action>,
    pub view_specific: HashMap<View, HashMap<KeyEvent, Action>>,
}

impl KeyBindings {
    /// View-specific bindings win over global ones.
    pub fn resolve(&self, key: KeyEvent, current_view: &View) -> Option<Action> {
        if let Some(view_bindings) = self.view_specific.get(current_view)
            && let Some(action) = view_bindings.get(&key)
        {
            return Some(*action);
        }
        self.global.get(&key).copied()
    }

    pub fn add_view_binding(&mut self, view: View, key: KeyEvent, action: Action) {
        self.view_specific
            .entry(view)
            .or_default()
            .insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut global = HashMap::new();
        global.insert(key('j'), Action::NavigateDown);
        global.insert(key('k'), Action::NavigateUp);
        global.insert(key('h'), Action::NavigateLeft);
        global.insert(key('l'), Action::NavigateRight);
        global.insert(key_code(KeyCode::Down), Action::NavigateDown);
        global.insert(key_code(KeyCode::Up), Action::NavigateUp);
        global.insert(key_code(KeyCode::Left), Action::NavigateLeft);
        global.insert(key_code(KeyCode::Right), Action::NavigateRight);
        global.insert(key_code(KeyCode::Enter), Action::Select);
        global.insert(key_code(KeyCode::Esc), Action::Back);
        global.insert(key('q'), Action::Quit);

        let mut bindings = Self {
            global,
            view_specific: HashMap::new(),
        };

        for (i, c) in ['1', '2', '3'].into_iter().enumerate() {
            bindings.add_view_binding(View::Home, key(c), Action::JumpToPanel(i + 1));
        }

        bindings.add_view_binding(View::Profile, key('e'), Action::Edit);
        bindings.add_view_binding(View::Profile, key('c'), Action::Contact);

        bindings.add_view_binding(View::Team, key('/'), Action::Search);
        bindings.add_view_binding(View::Team, key('a'), Action::Add);
        bindings.add_view_binding(View::Team, key('e'), Action::Edit);
        bindings.add_view_binding(View::Team, key('d'), Action::Delete);
        bindings.add_view_binding(View::Team, key('c'), Action::Contact);
        bindings.add_view_binding(View::Team, key('y'), Action::Confirm);
        bindings.add_view_binding(View::Team, key('n'), Action::Deny);

        bindings.add_view_binding(View::Workflow, key('e'), Action::Edit);
        bindings.add_view_binding(View::Workflow, key('n'), Action::NextStep);
        bindings.add_view_binding(View::Workflow, ctrl('n'), Action::NextStep);
        bindings.add_view_binding(View::Workflow, key('b'), Action::PrevStep);
        bindings.add_view_binding(View::Workflow, ctrl('b'), Action::PrevStep);
        bindings.add_view_binding(View::Workflow, key(' '), Action::Toggle);
        bindings.add_view_binding(View::Workflow, key('s'), Action::Submit);
        bindings.add_view_binding(View::Workflow, key('x'), Action::ClearMessage);

        bindings
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
