use std::fmt;

use serde::{Deserialize, Serialize};

/// Last known reachability of a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkStatus {
    /// Not probed yet
    #[default]
    Unknown,
    Online,
    Offline,
}

impl From<bool> for LinkStatus {
    fn from(success: bool) -> Self {
        if success { LinkStatus::Online } else { LinkStatus::Offline }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Unknown => write!(f, "UNKNOWN"),
            LinkStatus::Online => write!(f, "ONLINE"),
            LinkStatus::Offline => write!(f, "OFFLINE"),
        }
    }
}

/// Per-target state, owned by exactly one poll loop
#[derive(Debug, Default)]
pub struct TargetState {
    last_known: LinkStatus,
}

impl TargetState {
    pub fn last_known(&self) -> LinkStatus {
        self.last_known
    }

    /// Record a probe outcome.
    ///
    /// Returns the new status if it differs from the last known one, in which
    /// case the state is updated. `Unknown` differs from everything.
    pub fn observe(&mut self, success: bool) -> Option<LinkStatus> {
        let status = LinkStatus::from(success);
        if status == self.last_known {
            return None;
        }

        self.last_known = status;
        Some(status)
    }
}
