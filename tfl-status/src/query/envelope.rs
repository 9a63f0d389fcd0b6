//! The uniform result envelope returned by every query.

use std::fmt;

use serde::Serialize;

use crate::domain::{ArrivalGroup, CrowdingReading, DayPattern, Itinerary, LineStatus, Station};
use crate::resolve::Candidate;

/// Which subcommand produced a result or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    Status,
    Disruptions,
    Line,
    Arrivals,
    Journey,
    Search,
    Crowding,
    CrowdingPattern,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Status => "status",
            QueryKind::Disruptions => "disruptions",
            QueryKind::Line => "line",
            QueryKind::Arrivals => "arrivals",
            QueryKind::Journey => "journey",
            QueryKind::Search => "search",
            QueryKind::Crowding => "crowding",
            QueryKind::CrowdingPattern => "crowding-pattern",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-specific data, tagged with its `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Lines ranked worst-first.
    Status { lines: Vec<LineStatus> },

    /// No line is disrupted.
    AllClear,

    LineDetail { line: LineStatus },

    /// Arrivals grouped by line; empty when nothing is due.
    Arrivals {
        station: Station,
        groups: Vec<ArrivalGroup>,
    },

    Journeys {
        from: Station,
        to: Station,
        itineraries: Vec<Itinerary>,
    },

    /// Every search match, best-first.
    Search {
        query: String,
        candidates: Vec<Candidate>,
    },

    Crowding { reading: CrowdingReading },

    CrowdingPattern { pattern: DayPattern },
}

/// Result of one query: what was asked, what came back, and anything odd
/// noticed on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub kind: QueryKind,
    pub payload: Payload,
    pub warnings: Vec<String>,
}

impl QueryResult {
    pub fn new(kind: QueryKind, payload: Payload) -> Self {
        Self {
            kind,
            payload,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}
