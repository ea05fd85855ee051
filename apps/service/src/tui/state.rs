use std::time::Instant;

use netwatch::{Category, LinkStatus, Registry, Transition};

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRow {
    pub name: String,
    pub identifier: String,
    pub status: LinkStatus,
}

/// Status board state
pub struct BoardState {
    pub servers: Vec<TargetRow>,
    pub websites: Vec<TargetRow>,
    pub started: Instant,
    pub last_change: Option<(Transition, Instant)>,
}

fn rows(registry: &Registry) -> Vec<TargetRow> {
    registry
        .iter()
        .map(|target| TargetRow {
            name: target.name.clone(),
            identifier: target.identifier.clone(),
            status: LinkStatus::Unknown,
        })
        .collect()
}

impl BoardState {
    pub fn new(servers: &Registry, websites: &Registry) -> Self {
        Self {
            servers: rows(servers),
            websites: rows(websites),
            started: Instant::now(),
            last_change: None,
        }
    }

    pub fn rows(&self, category: Category) -> &[TargetRow] {
        match category {
            Category::Server => &self.servers,
            Category::Website => &self.websites,
        }
    }

    /// Update the row a transition points at
    ///
    /// Returns true when the change should ring the alert.
    pub fn apply(&mut self, transition: Transition) -> bool {
        let rows = match transition.category {
            Category::Server => &mut self.servers,
            Category::Website => &mut self.websites,
        };

        let Some(row) = rows.get_mut(transition.index) else {
            tracing::warn!(%transition, "Transition for unknown row");
            return false;
        };

        row.status = transition.status;
        self.last_change = Some((transition, Instant::now()));
        transition.status == LinkStatus::Offline
    }

    /// (online, offline, unknown) over both tables
    pub fn counts(&self) -> (usize, usize, usize) {
        self.servers.iter().chain(&self.websites).fold((0, 0, 0), |(on, off, unk), row| {
            match row.status {
                LinkStatus::Online => (on + 1, off, unk),
                LinkStatus::Offline => (on, off + 1, unk),
                LinkStatus::Unknown => (on, off, unk + 1),
            }
        })
    }

    /// Name of the target a transition refers to
    pub fn name_of(&self, transition: &Transition) -> Option<&str> {
        self.rows(transition.category).get(transition.index).map(|row| row.name.as_str())
    }
}
