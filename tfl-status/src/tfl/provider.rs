//! The transit API seam.

use crate::domain::{Coordinates, Line};

use super::error::TflError;
use super::types::{
    ArrivalDto, CrowdingDayDto, CrowdingLiveDto, JourneyResultsDto, LineDto, SearchMatchDto,
    StopPointDto,
};

/// Modes a station search is restricted to.
pub const RAIL_MODES: &str = "tube,dlr,overground,elizabeth-line,tram";

/// Trait for the endpoints the query layer needs.
///
/// This abstraction allows the resolver and aggregator to be tested
/// without network access. Each method is a single request.
#[allow(async_fn_in_trait)]
pub trait TransitApi {
    /// Current status of the given lines.
    async fn line_status(&self, lines: &[Line]) -> Result<Vec<LineDto>, TflError>;

    /// Free-text stop point search, restricted to [`RAIL_MODES`].
    async fn search_stop_points(&self, query: &str) -> Result<Vec<SearchMatchDto>, TflError>;

    /// A single stop point, including its children.
    async fn stop_point(&self, id: &str) -> Result<StopPointDto, TflError>;

    /// Predicted arrivals at a stop point.
    async fn arrivals(&self, stop_id: &str) -> Result<Vec<ArrivalDto>, TflError>;

    /// Journey options between two positions.
    ///
    /// Takes coordinates rather than stop ids: the API's id-based form
    /// answers with a disambiguation response when a name is shared by
    /// stations on several lines.
    async fn journey_results(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<JourneyResultsDto, TflError>;

    /// Live crowding at a stop.
    async fn crowding_live(&self, naptan: &str) -> Result<CrowdingLiveDto, TflError>;

    /// Typical crowding for each day of the week at a stop.
    async fn crowding_day(&self, naptan: &str) -> Result<CrowdingDayDto, TflError>;
}
