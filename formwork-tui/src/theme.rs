//! Color theme for the formwork terminal UI.

use formwork_core::PermissionMode;
use ratatui::style::{Color, Modifier, Style};

/// Colors and text styles shared by every view.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,

    // Permission modes
    pub required: Color,
    pub optional: Color,
    pub forbidden: Color,

    // UI element colors
    pub border: Color,
    pub selection: Color,
    pub highlight: Color,

    // Text styles
    pub bold: Style,
    pub dim: Style,
    pub italic: Style,
}

impl Theme {
    /// Badge color for a permission mode.
    pub fn mode_color(&self, mode: PermissionMode) -> Color {
        match mode {
            PermissionMode::Required => self.required,
            PermissionMode::Optional => self.optional,
            PermissionMode::Forbidden => self.forbidden,
        }
    }

    /// Style for the row or field under the cursor.
    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection).fg(self.fg)
    }
}

/// Creates the default formwork theme: light slate text on near-black,
/// with an indigo accent.
pub fn formwork_default() -> Theme {
    let fg = Color::Rgb(229, 231, 235); // #e5e7eb

    Theme {
        name: "formwork".into(),

        bg: Color::Rgb(17, 24, 39), // #111827
        fg,
        accent: Color::Rgb(129, 140, 248),  // #818cf8
        success: Color::Rgb(74, 222, 128),  // #4ade80
        warning: Color::Rgb(250, 204, 21),  // #facc15
        error: Color::Rgb(248, 113, 113),   // #f87171
        muted: Color::Rgb(107, 114, 128),   // #6b7280

        required: Color::Rgb(74, 222, 128), // #4ade80
        optional: Color::Rgb(129, 140, 248),
        forbidden: Color::Rgb(107, 114, 128),

        border: Color::Rgb(55, 65, 81),     // #374151
        selection: Color::Rgb(49, 46, 129), // #312e81
        highlight: Color::Rgb(99, 102, 241),

        bold: Style::default().fg(fg).add_modifier(Modifier::BOLD),
        dim: Style::default().fg(fg).add_modifier(Modifier::DIM),
        italic: Style::default().fg(fg).add_modifier(Modifier::ITALIC),
    }
}
