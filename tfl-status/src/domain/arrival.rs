//! Predicted arrivals at a station.

use serde::Serialize;

use super::Line;

/// A predicted arrival of a train at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arrival {
    pub line: Line,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub eta_seconds: u32,
}

impl Arrival {
    pub fn new(
        line: Line,
        destination: impl Into<String>,
        platform: Option<String>,
        eta_seconds: u32,
    ) -> Self {
        Self {
            line,
            destination: destination.into(),
            platform: platform.filter(|p| !p.trim().is_empty()),
            eta_seconds,
        }
    }

    /// Whole minutes until arrival, rounded down.
    pub fn eta_minutes(&self) -> u32 {
        self.eta_seconds / 60
    }

    /// Direction of travel, from platform names like "Westbound - Platform 1".
    pub fn direction(&self) -> Option<&str> {
        self.platform
            .as_deref()
            .and_then(|p| p.split_once(" - "))
            .map(|(direction, _)| direction)
    }

    /// The platform without any direction prefix.
    pub fn platform_label(&self) -> Option<&str> {
        self.platform
            .as_deref()
            .map(|p| p.split_once(" - ").map_or(p, |(_, platform)| platform))
    }
}

/// Arrivals for one line, soonest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalGroup {
    pub line: Line,
    pub arrivals: Vec<Arrival>,
}

/// Group arrivals by line.
///
/// Groups are ordered by line display name, ignoring case; within each group arrivals are
/// sorted by `eta_seconds` and truncated to `limit`.
pub fn group_arrivals(arrivals: Vec<Arrival>, limit: usize) -> Vec<ArrivalGroup> {
    let mut groups: Vec<ArrivalGroup> = Vec::new();

    for arrival in arrivals {
        match groups.iter_mut().find(|g| g.line == arrival.line) {
            Some(group) => group.arrivals.push(arrival),
            None => groups.push(ArrivalGroup {
                line: arrival.line,
                arrivals: vec![arrival],
            }),
        }
    }

    groups.sort_by(|a, b| a.line.cmp_by_name(b.line));
    for group in &mut groups {
        group.arrivals.sort_by_key(|a| a.eta_seconds);
        group.arrivals.truncate(limit);
    }

    groups
}
