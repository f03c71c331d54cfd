//! Visual status classification for cards and the status bar.
//!
//! This is display-only: nothing is raised or sent when a value crosses a
//! threshold.

use serde::{Deserialize, Serialize};

use super::metrics::{ComponentKind, Snapshot};

pub const WARNING_THRESHOLD: f64 = 80.0;
pub const CRITICAL_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unavailable,
    Normal,
    Warning,
    Critical,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unavailable => "unavailable",
            Status::Normal => "normal",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }
}

pub fn classify(value: Option<f64>) -> Status {
    match value {
        None => Status::Unavailable,
        Some(v) if !v.is_finite() => Status::Unavailable,
        Some(v) if v < WARNING_THRESHOLD => Status::Normal,
        Some(v) if v < CRITICAL_THRESHOLD => Status::Warning,
        Some(_) => Status::Critical,
    }
}

pub fn component_status(snapshot: &Snapshot, kind: ComponentKind) -> Status {
    classify(snapshot.display_value(kind))
}

/// Worst status across all present components.
pub fn overall_status(snapshot: &Snapshot) -> Status {
    ComponentKind::ALL
        .iter()
        .map(|&kind| component_status(snapshot, kind))
        .max()
        .unwrap_or(Status::Unavailable)
}
