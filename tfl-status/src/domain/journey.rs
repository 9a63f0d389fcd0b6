//! Journey plan types.
//!
//! An [`Itinerary`] is an ordered sequence of [`JourneyLeg`]s in traversal
//! order. Consecutive legs normally connect (one leg's arrival point is the
//! next leg's departure point), but the API sometimes names the same place
//! differently, so this is reported rather than enforced.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Error returned when constructing an invalid itinerary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("itinerary must have at least one leg")]
pub struct EmptyItinerary;

/// One stage of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyLeg {
    pub mode: String,
    /// One-line summary, e.g. "Victoria line to Green Park".
    pub summary: String,
    /// Detailed instruction, e.g. "Victoria line towards Brixton".
    pub instruction: String,
    pub duration_minutes: u32,
    pub departure_point: String,
    pub arrival_point: String,
}

/// A complete journey option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departs_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrives_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare_pence: Option<u32>,
    legs: Vec<JourneyLeg>,
}

impl Itinerary {
    /// Create an itinerary from legs in traversal order.
    pub fn new(duration_minutes: u32, legs: Vec<JourneyLeg>) -> Result<Self, EmptyItinerary> {
        if legs.is_empty() {
            return Err(EmptyItinerary);
        }

        Ok(Self {
            duration_minutes,
            departs_at: None,
            arrives_at: None,
            fare_pence: None,
            legs,
        })
    }

    pub fn with_times(mut self, departs: Option<NaiveDateTime>, arrives: Option<NaiveDateTime>) -> Self {
        self.departs_at = departs;
        self.arrives_at = arrives;
        self
    }

    /// Set the fare. A zero fare is treated as unknown.
    pub fn with_fare(mut self, pence: Option<u32>) -> Self {
        self.fare_pence = pence.filter(|p| *p > 0);
        self
    }

    pub fn legs(&self) -> &[JourneyLeg] {
        &self.legs
    }

    /// Indices `i` where leg `i` doesn't end where leg `i + 1` starts.
    pub fn discontinuities(&self) -> Vec<usize> {
        self.legs
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| {
                !pair[0]
                    .arrival_point
                    .eq_ignore_ascii_case(&pair[1].departure_point)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn leg(from: &str, to: &str, mins: u32) -> JourneyLeg {
        JourneyLeg {
            mode: "tube".into(),
            summary: format!("{from} to {to}"),
            instruction: format!("{from} towards {to}"),
            duration_minutes: mins,
            departure_point: from.into(),
            arrival_point: to.into(),
        }
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(Itinerary::new(10, Vec::new()), Err(EmptyItinerary));
    }

    #[test]
    fn legs_keep_order() {
        let it = Itinerary::new(18, vec![leg("A", "B", 7), leg("B", "C", 4), leg("C", "D", 7)]).unwrap();
        let points: Vec<&str> = it.legs().iter().map(|l| l.departure_point.as_str()).collect();
        assert_eq!(points, vec!["A", "B", "C"]);
        assert!(it.discontinuities().is_empty());
    }

    #[test]
    fn discontinuity_reported_not_rejected() {
        let it = Itinerary::new(10, vec![leg("A", "B", 5), leg("Bee", "C", 5)]).unwrap();
        assert_eq!(it.discontinuities(), vec![0]);
    }

    #[test]
    fn zero_fare_is_unknown() {
        let it = Itinerary::new(10, vec![leg("A", "B", 10)]).unwrap().with_fare(Some(0));
        assert_eq!(it.fare_pence, None);
        let it = it.with_fare(Some(290));
        assert_eq!(it.fare_pence, Some(290));
    }

    #[test]
    fn times_serialize_when_present() {
        let t = NaiveDate::from_ymd_opt(2026, 2, 16)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let it = Itinerary::new(25, vec![leg("A", "B", 25)])
            .unwrap()
            .with_times(Some(t), None);
        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["departs_at"], "2026-02-16T09:30:00");
        assert!(json.get("arrives_at").is_none());
        assert_eq!(json["legs"].as_array().unwrap().len(), 1);
    }
}
