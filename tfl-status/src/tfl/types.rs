//! Transit API response DTOs.
//!
//! These types map directly to the API's JSON responses. They use `Option`
//! and `#[serde(default)]` liberally because the API omits fields rather
//! than sending null values in many cases.

use serde::{Deserialize, Serialize};

/// A line from `/Line/{ids}/Status`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    /// Line id, e.g. "hammersmith-city".
    #[serde(default)]
    pub id: String,

    /// Display name, e.g. "Hammersmith & City".
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub line_statuses: Vec<LineStatusDto>,
}

/// One status reported for a line.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusDto {
    /// Upstream severity code (10 = good service). Informational only.
    pub status_severity: Option<i32>,

    #[serde(default)]
    pub status_severity_description: String,

    /// Free-text disruption reason.
    pub reason: Option<String>,
}

/// Response from `/StopPoint/Search/{query}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub matches: Vec<SearchMatchDto>,
}

/// A stop point search match.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatchDto {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Response from `/StopPoint/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointDto {
    pub id: Option<String>,
    pub common_name: Option<String>,
    #[serde(default)]
    pub children: Vec<StopPointChildDto>,
}

/// A child stop of a hub.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointChildDto {
    pub id: String,
    pub common_name: Option<String>,
}

/// A prediction from `/StopPoint/{id}/Arrivals`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalDto {
    pub line_id: Option<String>,
    pub line_name: Option<String>,
    pub destination_name: Option<String>,
    pub platform_name: Option<String>,
    /// Seconds until the train arrives.
    pub time_to_station: Option<i64>,
}

/// Response from `/Journey/JourneyResults/{from}/to/{to}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JourneyResultsDto {
    #[serde(default)]
    pub journeys: Vec<JourneyDto>,
}

/// One journey option.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    /// Total duration in minutes.
    pub duration: Option<i64>,
    /// Local start time, e.g. "2026-02-16T09:30:00".
    pub start_date_time: Option<String>,
    pub arrival_date_time: Option<String>,
    pub fare: Option<FareDto>,
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDto {
    /// Total cost in pence.
    pub total_cost: Option<i64>,
}

/// One leg of a journey option.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub instruction: InstructionDto,
    pub mode: Option<IdentifierDto>,
    pub departure_point: Option<PointDto>,
    pub arrival_point: Option<PointDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InstructionDto {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detailed: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentifierDto {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDto {
    #[serde(default)]
    pub common_name: String,
}

/// Response from `/Crowding/{naptan}/Live`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdingLiveDto {
    #[serde(default)]
    pub data_available: bool,
    pub percentage_of_baseline: Option<f64>,
    pub time_local: Option<String>,
}

/// Response from `/Crowding/{naptan}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdingDayDto {
    pub naptan: Option<String>,
    #[serde(default)]
    pub days_of_week: Vec<DayOfWeekDto>,
}

/// Typical crowding for one day of the week.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekDto {
    /// Three-letter upper-case day, e.g. "MON".
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub am_peak_time_band: String,
    #[serde(default)]
    pub pm_peak_time_band: String,
    #[serde(default)]
    pub time_bands: Vec<TimeBandDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeBandDto {
    #[serde(rename = "timeBand", default)]
    pub time_band: String,
    /// Note the API's capital L.
    #[serde(rename = "percentageOfBaseLine")]
    pub percentage_of_baseline: Option<f64>,
}
