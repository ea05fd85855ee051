use std::fmt;

use serde::Serialize;

use super::state::LinkStatus;
use crate::target::Category;

/// A target went online or offline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub category: Category,

    /// Index of the target in its registry
    pub index: usize,

    /// Status after the change, never [`LinkStatus::Unknown`]
    pub status: LinkStatus,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} is now {}", self.category, self.index, self.status)
    }
}
