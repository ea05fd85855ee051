use std::fmt;

use serde::Serialize;

use crate::target::Category;

/// Whether a report is sent because something failed or as a scheduled
/// all-clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Error,
    Clean,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Error => write!(f, "error"),
            ReportKind::Clean => write!(f, "clean"),
        }
    }
}

/// Outcomes of one category, in target order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub failures: Vec<String>,
    pub successes: Vec<String>,
}

impl CategoryReport {
    pub fn new(category: Category) -> Self {
        Self { category, failures: Vec::new(), successes: Vec::new() }
    }

    /// File a formatted detail line under failures or successes
    pub fn record(&mut self, success: bool, detail: String) {
        if success {
            self.successes.push(detail);
        } else {
            self.failures.push(detail);
        }
    }
}

/// Aggregated result of one audit pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub sections: Vec<CategoryReport>,
}

impl AuditReport {
    pub fn has_failures(&self) -> bool {
        self.sections.iter().any(|s| !s.failures.is_empty())
    }

    pub fn failure_count(&self) -> usize {
        self.sections.iter().map(|s| s.failures.len()).sum()
    }

    pub fn success_count(&self) -> usize {
        self.sections.iter().map(|s| s.successes.len()).sum()
    }

    pub fn section(&self, category: Category) -> Option<&CategoryReport> {
        self.sections.iter().find(|s| s.category == category)
    }
}
