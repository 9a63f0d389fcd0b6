//! In-memory transit API for tests.
//!
//! Serves canned responses and records every request it receives, so tests
//! can assert both on results and on how the API was called.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{Coordinates, Line};

use super::error::TflError;
use super::provider::TransitApi;
use super::types::{
    ArrivalDto, CrowdingDayDto, CrowdingLiveDto, JourneyResultsDto, LineDto, SearchMatchDto,
    StopPointDto,
};

/// A request received by [`MockTransitApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LineStatus(Vec<Line>),
    Search(String),
    StopPoint(String),
    Arrivals(String),
    Journey { from: Coordinates, to: Coordinates },
    CrowdingLive(String),
    CrowdingDay(String),
}

/// Mock transit API serving canned DTOs.
#[derive(Default)]
pub struct MockTransitApi {
    lines: Vec<LineDto>,
    searches: HashMap<String, Vec<SearchMatchDto>>,
    stop_points: HashMap<String, StopPointDto>,
    arrivals: HashMap<String, Vec<ArrivalDto>>,
    journeys: Option<JourneyResultsDto>,
    crowding_live: HashMap<String, CrowdingLiveDto>,
    crowding_day: HashMap<String, CrowdingDayDto>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransitApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line statuses; `line_status` returns those whose id was requested,
    /// plus any whose id isn't a known line (as the API does for lines it
    /// has renamed).
    pub fn with_lines(mut self, lines: Vec<LineDto>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_search(mut self, query: &str, matches: Vec<SearchMatchDto>) -> Self {
        self.searches.insert(query.to_string(), matches);
        self
    }

    pub fn with_stop_point(mut self, id: &str, stop: StopPointDto) -> Self {
        self.stop_points.insert(id.to_string(), stop);
        self
    }

    pub fn with_arrivals(mut self, stop_id: &str, arrivals: Vec<ArrivalDto>) -> Self {
        self.arrivals.insert(stop_id.to_string(), arrivals);
        self
    }

    /// Journey results returned for any pair of positions.
    pub fn with_journeys(mut self, journeys: JourneyResultsDto) -> Self {
        self.journeys = Some(journeys);
        self
    }

    pub fn with_crowding_live(mut self, naptan: &str, live: CrowdingLiveDto) -> Self {
        self.crowding_live.insert(naptan.to_string(), live);
        self
    }

    pub fn with_crowding_day(mut self, naptan: &str, day: CrowdingDayDto) -> Self {
        self.crowding_day.insert(naptan.to_string(), day);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, request: ApiRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

fn not_found(path: String) -> TflError {
    TflError::NotFound { path }
}

impl TransitApi for MockTransitApi {
    async fn line_status(&self, lines: &[Line]) -> Result<Vec<LineDto>, TflError> {
        self.record(ApiRequest::LineStatus(lines.to_vec()));
        Ok(self
            .lines
            .iter()
            .filter(|dto| {
                Line::from_slug(&dto.id).is_none() || lines.iter().any(|l| l.slug() == dto.id)
            })
            .cloned()
            .collect())
    }

    async fn search_stop_points(&self, query: &str) -> Result<Vec<SearchMatchDto>, TflError> {
        self.record(ApiRequest::Search(query.to_string()));
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn stop_point(&self, id: &str) -> Result<StopPointDto, TflError> {
        self.record(ApiRequest::StopPoint(id.to_string()));
        self.stop_points
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(format!("/StopPoint/{id}")))
    }

    async fn arrivals(&self, stop_id: &str) -> Result<Vec<ArrivalDto>, TflError> {
        self.record(ApiRequest::Arrivals(stop_id.to_string()));
        self.arrivals
            .get(stop_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/StopPoint/{stop_id}/Arrivals")))
    }

    async fn journey_results(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<JourneyResultsDto, TflError> {
        self.record(ApiRequest::Journey { from, to });
        self.journeys
            .clone()
            .ok_or_else(|| not_found(format!("/Journey/JourneyResults/{from}/to/{to}")))
    }

    async fn crowding_live(&self, naptan: &str) -> Result<CrowdingLiveDto, TflError> {
        self.record(ApiRequest::CrowdingLive(naptan.to_string()));
        self.crowding_live
            .get(naptan)
            .cloned()
            .ok_or_else(|| not_found(format!("/Crowding/{naptan}/Live")))
    }

    async fn crowding_day(&self, naptan: &str) -> Result<CrowdingDayDto, TflError> {
        self.record(ApiRequest::CrowdingDay(naptan.to_string()));
        self.crowding_day
            .get(naptan)
            .cloned()
            .ok_or_else(|| not_found(format!("/Crowding/{naptan}")))
    }
}
