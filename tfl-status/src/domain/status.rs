//! Line status entries.

use serde::Serialize;

use super::{Line, Severity};

/// One status reported for a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEntry {
    pub line: Line,
    #[serde(rename = "severity_level")]
    pub severity: Severity,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// False when the description wasn't a known status phrase.
    pub recognized: bool,
}

impl StatusEntry {
    /// Build an entry, classifying the description.
    ///
    /// The reason is trimmed and flattened onto one line; blank reasons
    /// are dropped.
    pub fn new(line: Line, description: impl Into<String>, reason: Option<&str>) -> Self {
        let description = description.into();
        let classification = Severity::classify(&description);

        let reason = reason
            .map(|r| r.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|r| !r.is_empty());

        Self {
            line,
            severity: classification.severity,
            description,
            reason,
            recognized: classification.recognized,
        }
    }
}

/// Every status currently reported for one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStatus {
    pub line: Line,
    pub statuses: Vec<StatusEntry>,
}

impl LineStatus {
    pub fn new(line: Line, statuses: Vec<StatusEntry>) -> Self {
        Self { line, statuses }
    }

    /// The most severe entry; the earliest wins a tie.
    pub fn worst(&self) -> Option<&StatusEntry> {
        self.statuses
            .iter()
            .reduce(|worst, e| if e.severity > worst.severity { e } else { worst })
    }

    /// Severity used for ranking. A line with no entries counts as good.
    pub fn severity(&self) -> Severity {
        self.worst().map_or(Severity::Good, |e| e.severity)
    }
}

/// Order statuses worst-first, breaking ties by display name (ignoring case).
pub fn rank_statuses(statuses: &mut [LineStatus]) {
    statuses.sort_by(|a, b| {
        b.severity()
            .cmp(&a.severity())
            .then_with(|| a.line.cmp_by_name(b.line))
    });
}
