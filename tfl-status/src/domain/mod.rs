//! Domain types for the transit status client.
//!
//! This module contains the value types that represent validated transit
//! data. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity.

mod arrival;
mod crowding;
mod journey;
mod line;
mod severity;
mod station;
mod status;

pub use arrival::{Arrival, ArrivalGroup, group_arrivals};
pub use crowding::{CrowdingCategory, CrowdingReading, DayPattern, DayProfile, TimeBand, day_code};
pub use journey::{EmptyItinerary, Itinerary, JourneyLeg};
pub use line::{Line, UnknownLine};
pub use severity::{Classification, Severity, UNRECOGNIZED_SEVERITY};
pub use station::{Coordinates, InvalidStation, Station, strip_suffix};
pub use status::{LineStatus, StatusEntry, rank_statuses};
