//! Navigation between the dashboard screens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Groups,
    Options,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Groups => "Grupos",
            View::Options => "Squads / Heads / Gestores",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Groups, View::Options]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
