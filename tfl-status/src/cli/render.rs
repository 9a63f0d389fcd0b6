//! Rendering query results as terminal text or JSON.

use chrono::Weekday;

use crate::domain::{
    Arrival, ArrivalGroup, CrowdingReading, DayPattern, Itinerary, LineStatus, Severity, Station,
};
use crate::query::{Payload, QueryResult};
use crate::resolve::Candidate;

/// Bands quieter than this are left out of the typical-day chart.
const PATTERN_MIN_PERCENTAGE: f64 = 0.3;

/// Bar cells per 100% of baseline.
const BAR_SCALE: f64 = 20.0;

/// Render a result as pretty-printed JSON.
pub fn render_json(result: &QueryResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Render a result as human-readable text. Warnings are not included.
pub fn render_text(result: &QueryResult) -> String {
    let lines = match &result.payload {
        Payload::Status { lines } => lines.iter().flat_map(line_status).collect(),
        Payload::AllClear => vec!["🟢 All lines running normally".to_string()],
        Payload::LineDetail { line } => line_status(line),
        Payload::Arrivals { station, groups } => arrivals(station, groups),
        Payload::Journeys {
            from,
            to,
            itineraries,
        } => journeys(from, to, itineraries),
        Payload::Search { candidates, .. } => search(candidates),
        Payload::Crowding { reading } => crowding(reading),
        Payload::CrowdingPattern { pattern } => crowding_pattern(pattern),
    };

    lines.join("\n")
}

/// Indicator for a status entry.
pub fn severity_symbol(severity: Severity, recognized: bool) -> &'static str {
    if !recognized {
        return "⚪";
    }
    match severity {
        Severity::Good => "🟢",
        Severity::Minor => "🟡",
        Severity::Disrupted => "🟠",
        Severity::Severe | Severity::Closed => "🔴",
    }
}

/// Label for a fraction of baseline crowding.
pub fn busyness_label(pct: f64) -> &'static str {
    if pct < 0.2 {
        "🟢 Quiet"
    } else if pct < 0.5 {
        "🟡 Moderate"
    } else if pct < 0.8 {
        "🟠 Busy"
    } else {
        "🔴 Very busy"
    }
}

fn line_status(status: &LineStatus) -> Vec<String> {
    let name = status.line.display_name();
    if status.statuses.is_empty() {
        return vec![format!("⚪ {name}: Unknown")];
    }

    let mut out = Vec::new();
    for entry in &status.statuses {
        out.push(format!(
            "{} {name}: {}",
            severity_symbol(entry.severity, entry.recognized),
            entry.description
        ));
        if let Some(reason) = &entry.reason {
            out.push(format!("   {reason}"));
        }
    }
    out
}

fn arrivals(station: &Station, groups: &[ArrivalGroup]) -> Vec<String> {
    if groups.is_empty() {
        return vec![format!("No arrivals at {}", station.short_name())];
    }

    let mut out = vec![format!("📍 {}", station.short_name()), String::new()];
    for group in groups {
        out.push(format!("  {}:", group.line.display_name()));
        out.extend(group.arrivals.iter().map(arrival));
        out.push(String::new());
    }
    out
}

fn arrival(arrival: &Arrival) -> String {
    let destination = arrival.destination.replace(" Underground Station", "");
    let time = match arrival.eta_minutes() {
        0 => "due".to_string(),
        mins => format!("{mins}min"),
    };
    let platform = arrival
        .platform_label()
        .map(|p| format!(" ({p})"))
        .unwrap_or_default();

    match arrival.direction() {
        Some(direction) => format!("    {direction} → {destination} - {time}{platform}"),
        None => format!("    {destination} - {time}{platform}"),
    }
}

fn journeys(from: &Station, to: &Station, itineraries: &[Itinerary]) -> Vec<String> {
    let (from, to) = (from.short_name(), to.short_name());
    if itineraries.is_empty() {
        return vec![format!("No routes from {from} to {to}")];
    }

    let mut out = vec![format!("📍 {from} → {to}"), String::new()];
    for itinerary in itineraries {
        out.push(journey_summary(itinerary));
        for leg in itinerary.legs() {
            if !leg.instruction.is_empty() {
                out.push(format!("     {} ({}min)", leg.instruction, leg.duration_minutes));
            }
        }
        out.push(String::new());
    }
    out
}

fn journey_summary(itinerary: &Itinerary) -> String {
    let times = match (itinerary.departs_at, itinerary.arrives_at) {
        (Some(depart), Some(arrive)) => format!(
            " (depart {}, arrive {})",
            depart.format("%H:%M"),
            arrive.format("%H:%M")
        ),
        (Some(depart), None) => format!(" (depart {})", depart.format("%H:%M")),
        _ => String::new(),
    };

    let fare = itinerary
        .fare_pence
        .map(|p| format!(" - £{}.{:02}", p / 100, p % 100))
        .unwrap_or_default();

    let legs = itinerary
        .legs()
        .iter()
        .map(|l| l.summary.as_str())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" → ");

    format!("🕐 {}min{times}{fare}: {legs}", itinerary.duration_minutes)
}

fn search(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| format!("  {} ({})", c.station.name(), c.station.id()))
        .collect()
}

fn percent(pct: f64) -> String {
    format!("{:.0}%", pct * 100.0)
}

fn crowding(reading: &CrowdingReading) -> Vec<String> {
    let mut out = vec![
        format!("📍 {} - Live busyness", reading.station.short_name()),
        String::new(),
    ];

    match reading.percentage_of_baseline {
        Some(pct) => {
            out.push(format!(
                "  {} ({} of baseline)",
                busyness_label(pct),
                percent(pct)
            ));
            if let Some(updated) = &reading.updated {
                out.push(format!("  Updated: {updated}"));
            }
        }
        None => out.push("  No live data available".to_string()),
    }
    out
}

fn crowding_pattern(pattern: &DayPattern) -> Vec<String> {
    let day = day_name(pattern.day);
    let Some(profile) = &pattern.profile else {
        return vec![format!("No data for {day}")];
    };

    let mut out = vec![
        format!("📍 {} - Typical {day}", pattern.station.short_name()),
        String::new(),
        format!("  AM peak: {}", profile.am_peak),
        format!("  PM peak: {}", profile.pm_peak),
        String::new(),
    ];

    for band in &profile.bands {
        let pct = band.percentage_of_baseline;
        if pct >= PATTERN_MIN_PERCENTAGE {
            let bar = "█".repeat((pct * BAR_SCALE) as usize);
            out.push(format!("    {} {bar} {}", band.band, percent(pct)));
        }
    }
    out
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
