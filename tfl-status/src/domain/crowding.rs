//! Station crowding readings and typical day patterns.

use chrono::Weekday;
use serde::Serialize;

use super::Station;

/// How busy a station is relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdingCategory {
    Low,
    Moderate,
    High,
    Unknown,
}

impl CrowdingCategory {
    /// Categorise a fraction of baseline (1.0 = baseline).
    pub fn from_percentage(pct: Option<f64>) -> Self {
        match pct {
            Some(p) if !p.is_finite() || p < 0.0 => CrowdingCategory::Unknown,
            Some(p) if p < 0.2 => CrowdingCategory::Low,
            Some(p) if p < 0.5 => CrowdingCategory::Moderate,
            Some(_) => CrowdingCategory::High,
            None => CrowdingCategory::Unknown,
        }
    }
}

/// A live crowding reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdingReading {
    pub station: Station,
    pub percentage_of_baseline: Option<f64>,
    pub category: CrowdingCategory,
    /// Local time of the reading, as reported upstream.
    pub updated: Option<String>,
}

impl CrowdingReading {
    pub fn new(station: Station, percentage_of_baseline: Option<f64>, updated: Option<String>) -> Self {
        Self {
            station,
            category: CrowdingCategory::from_percentage(percentage_of_baseline),
            percentage_of_baseline,
            updated,
        }
    }

    /// A reading for a station with no live data.
    pub fn unavailable(station: Station) -> Self {
        Self::new(station, None, None)
    }
}

/// Typical crowding in one quarter-hour band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBand {
    /// e.g. "08:00-08:15".
    pub band: String,
    pub percentage_of_baseline: f64,
}

/// Typical crowding profile for a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayProfile {
    pub am_peak: String,
    pub pm_peak: String,
    pub bands: Vec<TimeBand>,
}

/// Historical crowding pattern for a station on a day of the week.
///
/// `profile` is `None` when the API has no data for that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPattern {
    pub station: Station,
    pub day: Weekday,
    pub profile: Option<DayProfile>,
}

/// The three-letter upper-case code the crowding API uses for a day.
pub fn day_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}
