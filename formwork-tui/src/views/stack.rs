//! Panel navigation.
//!
//! Home is the root. Opening a panel pushes it; closing pops back to
//! whatever opened it.

/// Screens the TUI can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Profile,
    Team,
    Workflow,
}

impl View {
    /// Panels listed on the home screen, in tile order.
    pub const PANELS: [View; 3] = [View::Profile, View::Team, View::Workflow];

    /// Panel for a 1-based tile number.
    pub fn panel(number: usize) -> Option<View> {
        number
            .checked_sub(1)
            .and_then(|i| Self::PANELS.get(i))
            .copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Profile => "Profile Card",
            View::Team => "Team Membership",
            View::Workflow => "Role Permissions",
        }
    }

    /// Name accepted by `--panel` and `[ui] start_panel`.
    pub fn slug(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Profile => "profile",
            View::Team => "team",
            View::Workflow => "workflow",
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(View::Home),
            "profile" => Ok(View::Profile),
            "team" => Ok(View::Team),
            "workflow" => Ok(View::Workflow),
            other => Err(format!(
                "unknown panel '{other}' (expected home, profile, team or workflow)"
            )),
        }
    }
}

/// Current view plus the views to return to.
#[derive(Debug, Clone, Default)]
pub struct ViewStack {
    pub current: View,
    pub history: Vec<View>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on `view` with Home underneath, so closing it lands on Home.
    pub fn starting_at(view: View) -> Self {
        let mut stack = Self::new();
        if view != View::Home {
            stack.push(view);
        }
        stack
    }

    pub fn push(&mut self, view: View) {
        self.history
            .push(std::mem::replace(&mut self.current, view));
    }

    /// Returns the view that was closed, or `None` at the root.
    pub fn pop(&mut self) -> Option<View> {
        let prev = self.history.pop()?;
        Some(std::mem::replace(&mut self.current, prev))
    }

    pub fn can_pop(&self) -> bool {
        !self.history.is_empty()
    }
}
