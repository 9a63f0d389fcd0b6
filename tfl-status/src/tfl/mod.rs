//! Transit API client.
//!
//! This module provides an HTTP client for the unified transit API, which
//! serves line status, stop point search, arrival predictions, journey
//! planning and crowding data.
//!
//! Key characteristics of the API:
//! - Line ids are lowercase slugs ("hammersmith-city"); several can be
//!   queried at once as a comma-separated list
//! - Station searches may return hub ids (`HUB...`) that group several
//!   stops; per-stop endpoints need one of the hub's children
//! - Journey planning by stop id can answer with a disambiguation response,
//!   so journeys are always requested by coordinates

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod provider;
mod types;

pub use client::{APP_KEY_VAR, BASE_URL_VAR, TflClient, TflConfig};
pub use convert::{
    ConversionError, convert_arrival, convert_crowding_live, convert_day_pattern,
    convert_journey, convert_line, convert_match,
};
pub use error::TflError;
pub use provider::{RAIL_MODES, TransitApi};
pub use types::{
    ArrivalDto, CrowdingDayDto, CrowdingLiveDto, DayOfWeekDto, FareDto, IdentifierDto,
    InstructionDto, JourneyDto, JourneyResultsDto, LegDto, LineDto, LineStatusDto, PointDto,
    SearchMatchDto, SearchResponse, StopPointChildDto, StopPointDto, TimeBandDto,
};
