//! Conversion from API DTOs to domain types.
//!
//! Each function converts one upstream record. Callers skip records that
//! fail to convert and report them as warnings rather than failing the
//! whole response.

use chrono::{NaiveDateTime, Weekday};

use crate::domain::{
    Arrival, CrowdingReading, DayPattern, DayProfile, Itinerary, JourneyLeg, Line, LineStatus,
    Station, StatusEntry, TimeBand, day_code,
};

use super::types::{
    ArrivalDto, CrowdingDayDto, CrowdingLiveDto, JourneyDto, LegDto, LineDto, SearchMatchDto,
};

/// Format of journey start and arrival times.
const JOURNEY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Line id isn't one of the known lines
    #[error("unrecognised line {0:?}")]
    UnknownLine(String),

    /// Stop point failed validation
    #[error("invalid stop point {id}: {reason}")]
    InvalidStation { id: String, reason: String },

    /// A count or duration was negative
    #[error("negative {0}")]
    Negative(&'static str),

    /// A required field was absent
    #[error("missing {0}")]
    Missing(&'static str),

    /// Journey option without legs
    #[error("journey has no legs")]
    EmptyJourney,
}

/// Convert a line and its statuses.
pub fn convert_line(dto: &LineDto) -> Result<LineStatus, ConversionError> {
    let line =
        Line::from_slug(&dto.id).ok_or_else(|| ConversionError::UnknownLine(dto.id.clone()))?;

    let statuses = dto
        .line_statuses
        .iter()
        .map(|s| StatusEntry::new(line, s.status_severity_description.trim(), s.reason.as_deref()))
        .collect();

    Ok(LineStatus::new(line, statuses))
}

/// Convert a search match. Missing coordinates become the (0, 0) placeholder.
pub fn convert_match(dto: &SearchMatchDto) -> Result<Station, ConversionError> {
    let name = dto
        .name
        .as_deref()
        .ok_or(ConversionError::Missing("station name"))?;

    Station::new(
        dto.id.as_str(),
        name,
        dto.lat.unwrap_or(0.0),
        dto.lon.unwrap_or(0.0),
    )
    .map_err(|e| ConversionError::InvalidStation {
        id: dto.id.clone(),
        reason: e.to_string(),
    })
}

/// Convert an arrival prediction.
///
/// The line is taken from `lineId`, falling back to normalizing `lineName`.
pub fn convert_arrival(dto: &ArrivalDto) -> Result<Arrival, ConversionError> {
    let line = dto
        .line_id
        .as_deref()
        .and_then(Line::from_slug)
        .or_else(|| dto.line_name.as_deref().and_then(|n| Line::normalize(n).ok()))
        .ok_or_else(|| {
            ConversionError::UnknownLine(
                dto.line_id
                    .clone()
                    .or_else(|| dto.line_name.clone())
                    .unwrap_or_default(),
            )
        })?;

    let seconds = dto
        .time_to_station
        .ok_or(ConversionError::Missing("time to station"))?;
    let eta = u32::try_from(seconds).map_err(|_| ConversionError::Negative("time to station"))?;

    let destination = dto
        .destination_name
        .clone()
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(Arrival::new(line, destination, dto.platform_name.clone(), eta))
}

/// Convert a journey option.
pub fn convert_journey(dto: &JourneyDto) -> Result<Itinerary, ConversionError> {
    let duration = dto.duration.ok_or(ConversionError::Missing("journey duration"))?;
    let duration =
        u32::try_from(duration).map_err(|_| ConversionError::Negative("journey duration"))?;

    let legs = dto
        .legs
        .iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    let fare = dto
        .fare
        .as_ref()
        .and_then(|f| f.total_cost)
        .and_then(|c| u32::try_from(c).ok());

    let itinerary = Itinerary::new(duration, legs)
        .map_err(|_| ConversionError::EmptyJourney)?
        .with_times(
            parse_journey_time(dto.start_date_time.as_deref()),
            parse_journey_time(dto.arrival_date_time.as_deref()),
        )
        .with_fare(fare);

    Ok(itinerary)
}

fn convert_leg(dto: &LegDto) -> Result<JourneyLeg, ConversionError> {
    let duration =
        u32::try_from(dto.duration).map_err(|_| ConversionError::Negative("leg duration"))?;

    let summary = dto.instruction.summary.trim().to_string();
    let detailed = dto.instruction.detailed.trim();

    Ok(JourneyLeg {
        mode: dto.mode.as_ref().map(|m| m.name.clone()).unwrap_or_default(),
        instruction: if detailed.is_empty() {
            summary.clone()
        } else {
            detailed.to_string()
        },
        summary,
        duration_minutes: duration,
        departure_point: dto
            .departure_point
            .as_ref()
            .map(|p| p.common_name.clone())
            .unwrap_or_default(),
        arrival_point: dto
            .arrival_point
            .as_ref()
            .map(|p| p.common_name.clone())
            .unwrap_or_default(),
    })
}

/// Parse a journey time, ignoring anything that doesn't fit the format.
fn parse_journey_time(s: Option<&str>) -> Option<NaiveDateTime> {
    let s = s?;
    // Some responses carry fractional seconds or an offset; only the first
    // 19 characters are needed.
    let head = s.get(..19).unwrap_or(s);
    NaiveDateTime::parse_from_str(head, JOURNEY_TIME_FORMAT).ok()
}

/// Convert a live crowding response.
pub fn convert_crowding_live(station: Station, dto: &CrowdingLiveDto) -> CrowdingReading {
    if !dto.data_available {
        return CrowdingReading::unavailable(station);
    }
    CrowdingReading::new(station, dto.percentage_of_baseline, dto.time_local.clone())
}

/// Pick one day out of a weekly crowding response.
///
/// Time bands without a percentage are dropped.
pub fn convert_day_pattern(station: Station, day: Weekday, dto: &CrowdingDayDto) -> DayPattern {
    let code = day_code(day);

    let profile = dto
        .days_of_week
        .iter()
        .find(|d| d.day_of_week.eq_ignore_ascii_case(code))
        .map(|d| DayProfile {
            am_peak: d.am_peak_time_band.clone(),
            pm_peak: d.pm_peak_time_band.clone(),
            bands: d
                .time_bands
                .iter()
                .filter_map(|b| {
                    Some(TimeBand {
                        band: b.time_band.clone(),
                        percentage_of_baseline: b.percentage_of_baseline?,
                    })
                })
                .collect(),
        });

    DayPattern {
        station,
        day,
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CrowdingCategory, Severity};
    use serde_json::json;

    fn station() -> Station {
        Station::new("940GZZLUBNK", "Bank Underground Station", 51.513, -0.089).unwrap()
    }

    #[test]
    fn line_converts_all_statuses() {
        let dto: LineDto = serde_json::from_value(json!({
            "id": "district",
            "name": "District",
            "lineStatuses": [
                {"statusSeverity": 9, "statusSeverityDescription": "Minor Delays"},
                {"statusSeverity": 5, "statusSeverityDescription": "Part Closure", "reason": "Engineering works."}
            ]
        }))
        .unwrap();

        let status = convert_line(&dto).unwrap();
        assert_eq!(status.line, Line::District);
        assert_eq!(status.statuses.len(), 2);
        assert_eq!(status.severity(), Severity::Disrupted);
    }

    #[test]
    fn unknown_line_rejected() {
        let dto: LineDto = serde_json::from_value(json!({"id": "mildmay", "name": "Mildmay"})).unwrap();
        assert_eq!(
            convert_line(&dto).unwrap_err(),
            ConversionError::UnknownLine("mildmay".into())
        );
    }

    #[test]
    fn match_without_coordinates_uses_placeholder() {
        let dto: SearchMatchDto = serde_json::from_value(json!({"id": "HUBBAN", "name": "Bank"})).unwrap();
        let s = convert_match(&dto).unwrap();
        assert!(s.coordinates().is_placeholder());
    }

    #[test]
    fn arrival_falls_back_to_line_name() {
        let dto: ArrivalDto = serde_json::from_value(json!({
            "lineName": "Hammersmith & City",
            "destinationName": "Barking Underground Station",
            "platformName": "Eastbound - Platform 2",
            "timeToStation": 240
        }))
        .unwrap();
        let a = convert_arrival(&dto).unwrap();
        assert_eq!(a.line, Line::HammersmithCity);
        assert_eq!(a.eta_seconds, 240);
    }

    #[test]
    fn arrival_rejects_negative_eta() {
        let dto: ArrivalDto = serde_json::from_value(json!({
            "lineId": "victoria",
            "timeToStation": -5
        }))
        .unwrap();
        assert_eq!(
            convert_arrival(&dto).unwrap_err(),
            ConversionError::Negative("time to station")
        );
    }

    #[test]
    fn journey_converts_legs_in_order() {
        let dto: JourneyDto = serde_json::from_value(json!({
            "duration": 25,
            "startDateTime": "2026-02-16T09:30:00",
            "arrivalDateTime": "2026-02-16T09:55:00",
            "fare": {"totalCost": 290},
            "legs": [
                {"duration": 5, "instruction": {"summary": "Walk to Green Park"},
                 "mode": {"name": "walking"},
                 "departurePoint": {"commonName": "A"}, "arrivalPoint": {"commonName": "Green Park"}},
                {"duration": 20, "instruction": {"summary": "Victoria line to Brixton", "detailed": "Victoria line towards Brixton"},
                 "mode": {"name": "tube"},
                 "departurePoint": {"commonName": "Green Park"}, "arrivalPoint": {"commonName": "Brixton"}}
            ]
        }))
        .unwrap();

        let it = convert_journey(&dto).unwrap();
        assert_eq!(it.duration_minutes, 25);
        assert_eq!(it.fare_pence, Some(290));
        assert_eq!(it.departs_at.unwrap().format("%H:%M").to_string(), "09:30");
        assert_eq!(it.arrives_at.unwrap().format("%H:%M").to_string(), "09:55");
        assert_eq!(it.legs()[0].instruction, "Walk to Green Park");
        assert_eq!(it.legs()[1].instruction, "Victoria line towards Brixton");
        assert_eq!(it.legs()[1].mode, "tube");
        assert!(it.discontinuities().is_empty());
    }

    #[test]
    fn incomplete_records_rejected() {
        let arrival: ArrivalDto = serde_json::from_value(json!({"lineId": "victoria"})).unwrap();
        assert_eq!(
            convert_arrival(&arrival).unwrap_err(),
            ConversionError::Missing("time to station")
        );

        let journey: JourneyDto = serde_json::from_value(json!({"legs": []})).unwrap();
        assert_eq!(
            convert_journey(&journey).unwrap_err(),
            ConversionError::Missing("journey duration")
        );

        let search: SearchMatchDto = serde_json::from_value(json!({"id": "940GZZLUBNK"})).unwrap();
        assert_eq!(
            convert_match(&search).unwrap_err(),
            ConversionError::Missing("station name")
        );
    }

    #[test]
    fn journey_time_tolerates_fractions() {
        assert!(parse_journey_time(Some("2026-02-16T09:30:00.000Z")).is_some());
        assert!(parse_journey_time(Some("09:30")).is_none());
        assert!(parse_journey_time(None).is_none());
    }

    #[test]
    fn journey_without_legs_rejected() {
        let dto: JourneyDto = serde_json::from_value(json!({"duration": 5})).unwrap();
        assert_eq!(convert_journey(&dto).unwrap_err(), ConversionError::EmptyJourney);
    }

    #[test]
    fn crowding_live_available() {
        let dto: CrowdingLiveDto = serde_json::from_value(json!({
            "dataAvailable": true,
            "percentageOfBaseline": 0.45,
            "timeLocal": "2026-02-16 12:00:00"
        }))
        .unwrap();
        let r = convert_crowding_live(station(), &dto);
        assert_eq!(r.category, CrowdingCategory::Moderate);
        assert_eq!(r.updated.as_deref(), Some("2026-02-16 12:00:00"));
    }

    #[test]
    fn crowding_live_unavailable_ignores_zero() {
        let dto: CrowdingLiveDto = serde_json::from_value(json!({
            "dataAvailable": false,
            "percentageOfBaseline": 0
        }))
        .unwrap();
        let r = convert_crowding_live(station(), &dto);
        assert_eq!(r.category, CrowdingCategory::Unknown);
        assert_eq!(r.percentage_of_baseline, None);
    }

    #[test]
    fn day_pattern_selects_day() {
        let dto: CrowdingDayDto = serde_json::from_value(json!({
            "daysOfWeek": [{
                "dayOfWeek": "MON",
                "amPeakTimeBand": "07:45-09:45",
                "pmPeakTimeBand": "17:00-19:00",
                "timeBands": [{"timeBand": "08:00-08:15", "percentageOfBaseLine": 0.4}]
            }]
        }))
        .unwrap();

        let monday = convert_day_pattern(station(), Weekday::Mon, &dto);
        let profile = monday.profile.unwrap();
        assert_eq!(profile.am_peak, "07:45-09:45");
        assert_eq!(profile.bands[0].band, "08:00-08:15");

        let sunday = convert_day_pattern(station(), Weekday::Sun, &dto);
        assert!(sunday.profile.is_none());
    }

    #[test]
    fn day_pattern_drops_bands_without_percentage() {
        let dto: CrowdingDayDto = serde_json::from_value(json!({
            "daysOfWeek": [
                {"timeBands": []},
                {
                    "dayOfWeek": "TUE",
                    "timeBands": [
                        {"timeBand": "08:00-08:15"},
                        {"timeBand": "08:15-08:30", "percentageOfBaseLine": 0.7}
                    ]
                }
            ]
        }))
        .unwrap();

        let profile = convert_day_pattern(station(), Weekday::Tue, &dto).profile.unwrap();
        assert_eq!(profile.bands.len(), 1);
        assert_eq!(profile.bands[0].band, "08:15-08:30");
    }
}
