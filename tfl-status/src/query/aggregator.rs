//! One operation per subcommand.

use chrono::Weekday;
use tracing::{debug, warn};

use crate::domain::{Line, LineStatus, Station, group_arrivals, rank_statuses};
use crate::resolve::{ResolverConfig, StationResolver};
use crate::tfl::{
    TflError, TransitApi, convert_arrival, convert_crowding_live, convert_day_pattern,
    convert_journey, convert_line,
};

use super::envelope::{Payload, QueryKind, QueryResult};
use super::error::{QueryError, QueryErrorKind};

/// A subcommand with its raw, unparsed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// `lines` is a comma-separated list of line names.
    Status { lines: Option<String> },
    Disruptions,
    Line { line: String },
    Arrivals {
        station: String,
        limit: usize,
        lines: Option<String>,
    },
    Journey {
        from: String,
        to: String,
        limit: usize,
    },
    Search { query: String },
    Crowding { station: String },
    CrowdingPattern { station: String, day: Weekday },
}

impl Request {
    pub fn kind(&self) -> QueryKind {
        match self {
            Request::Status { .. } => QueryKind::Status,
            Request::Disruptions => QueryKind::Disruptions,
            Request::Line { .. } => QueryKind::Line,
            Request::Arrivals { .. } => QueryKind::Arrivals,
            Request::Journey { .. } => QueryKind::Journey,
            Request::Search { .. } => QueryKind::Search,
            Request::Crowding { .. } => QueryKind::Crowding,
            Request::CrowdingPattern { .. } => QueryKind::CrowdingPattern,
        }
    }
}

/// Runs queries against a [`TransitApi`].
///
/// Requests are issued one at a time; nothing is cached between calls.
pub struct Aggregator<'a, A: TransitApi> {
    api: &'a A,
    resolver_config: &'a ResolverConfig,
}

impl<'a, A: TransitApi> Aggregator<'a, A> {
    pub fn new(api: &'a A, resolver_config: &'a ResolverConfig) -> Self {
        Self {
            api,
            resolver_config,
        }
    }

    fn resolver(&self) -> StationResolver<'a, A> {
        StationResolver::new(self.api, self.resolver_config)
    }

    /// Parse a request's arguments, resolve its stations, and run it.
    pub async fn dispatch(&self, request: Request) -> Result<QueryResult, QueryError> {
        let command = request.kind();
        debug!(%command, "dispatching query");

        match request {
            Request::Status { lines } => {
                let lines = parse_lines(command, lines.as_deref())?;
                self.status(lines.as_deref()).await
            }
            Request::Disruptions => self.disruptions().await,
            Request::Line { line } => {
                let line = Line::normalize(&line).map_err(|e| QueryError::new(command, e))?;
                self.line_detail(line).await
            }
            Request::Arrivals {
                station,
                limit,
                lines,
            } => {
                let lines = parse_lines(command, lines.as_deref())?;
                check_limit(command, limit)?;
                let station = self.resolve(command, &station).await?;
                self.arrivals(&station, limit, lines.as_deref().unwrap_or_default())
                    .await
            }
            Request::Journey { from, to, limit } => {
                check_limit(command, limit)?;
                let from = self.resolve(command, &from).await?;
                let to = self.resolve(command, &to).await?;
                self.journey(&from, &to, limit).await
            }
            Request::Search { query } => self.search(&query).await,
            Request::Crowding { station } => {
                let station = self.resolve(command, &station).await?;
                self.crowding(&station).await
            }
            Request::CrowdingPattern { station, day } => {
                let station = self.resolve(command, &station).await?;
                self.crowding_pattern(&station, day).await
            }
        }
    }

    async fn resolve(&self, command: QueryKind, query: &str) -> Result<Station, QueryError> {
        self.resolver()
            .resolve(query)
            .await
            .map_err(|e| QueryError::new(command, e))
    }

    /// Status of the given lines (all lines when `None` or empty), worst first.
    pub async fn status(&self, lines: Option<&[Line]>) -> Result<QueryResult, QueryError> {
        let all = Line::ALL;
        let lines = match lines {
            Some(lines) if !lines.is_empty() => lines,
            _ => &all[..],
        };

        let (statuses, warnings) = self
            .fetch_statuses(lines)
            .await
            .map_err(|e| QueryError::new(QueryKind::Status, e))?;

        Ok(
            QueryResult::new(QueryKind::Status, Payload::Status { lines: statuses })
                .with_warnings(warnings),
        )
    }

    /// Disrupted lines only, or an explicit all-clear.
    pub async fn disruptions(&self) -> Result<QueryResult, QueryError> {
        let (statuses, warnings) = self
            .fetch_statuses(&Line::ALL)
            .await
            .map_err(|e| QueryError::new(QueryKind::Disruptions, e))?;

        let disrupted: Vec<LineStatus> = statuses
            .into_iter()
            .filter(|s| s.severity().is_disrupted())
            .collect();

        let payload = if disrupted.is_empty() {
            Payload::AllClear
        } else {
            Payload::Status { lines: disrupted }
        };

        Ok(QueryResult::new(QueryKind::Disruptions, payload).with_warnings(warnings))
    }

    /// Every status entry for one line, reasons included.
    pub async fn line_detail(&self, line: Line) -> Result<QueryResult, QueryError> {
        let (statuses, warnings) = self
            .fetch_statuses(&[line])
            .await
            .map_err(|e| QueryError::new(QueryKind::Line, e))?;

        // A missing line has already been warned about.
        let status = statuses
            .into_iter()
            .find(|s| s.line == line)
            .unwrap_or_else(|| LineStatus::new(line, Vec::new()));

        Ok(
            QueryResult::new(QueryKind::Line, Payload::LineDetail { line: status })
                .with_warnings(warnings),
        )
    }

    /// Upcoming arrivals at a station, grouped by line.
    ///
    /// An empty `lines` filter keeps every line.
    pub async fn arrivals(
        &self,
        station: &Station,
        limit: usize,
        lines: &[Line],
    ) -> Result<QueryResult, QueryError> {
        const COMMAND: QueryKind = QueryKind::Arrivals;
        check_limit(COMMAND, limit)?;

        let dtos = self
            .api
            .arrivals(station.stop_id())
            .await
            .map_err(|e| QueryError::new(COMMAND, e))?;

        let mut warnings = Vec::new();
        let mut arrivals = Vec::with_capacity(dtos.len());
        for dto in &dtos {
            match convert_arrival(dto) {
                Ok(arrival) => arrivals.push(arrival),
                Err(e) => {
                    warn!(station = station.id(), "skipping arrival: {e}");
                    warnings.push(format!("skipped arrival: {e}"));
                }
            }
        }

        if !lines.is_empty() {
            arrivals.retain(|a| lines.contains(&a.line));
        }

        let groups = group_arrivals(arrivals, limit);
        debug!(station = station.id(), groups = groups.len(), "arrivals");

        Ok(QueryResult::new(
            COMMAND,
            Payload::Arrivals {
                station: station.clone(),
                groups,
            },
        )
        .with_warnings(warnings))
    }

    /// Journey options between two stations.
    ///
    /// Always planned by coordinates: the API's stop-id form can answer with
    /// a disambiguation page for stations that share a name across lines.
    pub async fn journey(
        &self,
        from: &Station,
        to: &Station,
        limit: usize,
    ) -> Result<QueryResult, QueryError> {
        const COMMAND: QueryKind = QueryKind::Journey;
        check_limit(COMMAND, limit)?;

        for station in [from, to] {
            if station.coordinates().is_placeholder() {
                return Err(QueryError::new(
                    COMMAND,
                    QueryErrorKind::MissingCoordinates {
                        station: station.name().to_string(),
                    },
                ));
            }
        }

        let results = self
            .api
            .journey_results(from.coordinates(), to.coordinates())
            .await
            .map_err(|e| QueryError::new(COMMAND, e))?;

        let mut warnings = Vec::new();
        let mut itineraries = Vec::new();
        for dto in &results.journeys {
            match convert_journey(dto) {
                Ok(itinerary) => {
                    if !itinerary.discontinuities().is_empty() {
                        debug!(legs = ?itinerary.discontinuities(), "legs do not connect by name");
                    }
                    itineraries.push(itinerary);
                }
                Err(e) => {
                    warn!("skipping journey option: {e}");
                    warnings.push(format!("skipped journey option: {e}"));
                }
            }
        }
        itineraries.truncate(limit);

        Ok(QueryResult::new(
            COMMAND,
            Payload::Journeys {
                from: from.clone(),
                to: to.clone(),
                itineraries,
            },
        )
        .with_warnings(warnings))
    }

    /// All search matches, ranked but not thresholded.
    pub async fn search(&self, query: &str) -> Result<QueryResult, QueryError> {
        let candidates = self
            .resolver()
            .candidates(query)
            .await
            .map_err(|e| QueryError::new(QueryKind::Search, e))?;

        Ok(QueryResult::new(
            QueryKind::Search,
            Payload::Search {
                query: query.to_string(),
                candidates,
            },
        ))
    }

    /// Live crowding at a station.
    pub async fn crowding(&self, station: &Station) -> Result<QueryResult, QueryError> {
        let live = self
            .api
            .crowding_live(station.stop_id())
            .await
            .map_err(|e| QueryError::new(QueryKind::Crowding, e))?;

        let mut warnings = Vec::new();
        if !live.data_available {
            warnings.push(format!("no live crowding data for {}", station.short_name()));
        }

        let reading = convert_crowding_live(station.clone(), &live);
        Ok(
            QueryResult::new(QueryKind::Crowding, Payload::Crowding { reading })
                .with_warnings(warnings),
        )
    }

    /// Typical crowding at a station on a day of the week.
    pub async fn crowding_pattern(
        &self,
        station: &Station,
        day: Weekday,
    ) -> Result<QueryResult, QueryError> {
        let week = self
            .api
            .crowding_day(station.stop_id())
            .await
            .map_err(|e| QueryError::new(QueryKind::CrowdingPattern, e))?;

        let pattern = convert_day_pattern(station.clone(), day, &week);

        let mut warnings = Vec::new();
        if pattern.profile.is_none() {
            warnings.push(format!("no crowding data for {day}"));
        }

        Ok(
            QueryResult::new(QueryKind::CrowdingPattern, Payload::CrowdingPattern { pattern })
                .with_warnings(warnings),
        )
    }

    /// Fetch and classify line statuses, ranked worst-first.
    ///
    /// Lines the API reports that aren't known here are skipped with a
    /// warning, as are requested lines the API says nothing about.
    async fn fetch_statuses(
        &self,
        lines: &[Line],
    ) -> Result<(Vec<LineStatus>, Vec<String>), TflError> {
        let dtos = self.api.line_status(lines).await?;

        let mut warnings = Vec::new();
        let mut statuses = Vec::with_capacity(dtos.len());
        for dto in &dtos {
            match convert_line(dto) {
                Ok(status) => {
                    for entry in status.statuses.iter().filter(|e| !e.recognized) {
                        warn!(line = %status.line, description = %entry.description, "unrecognized status");
                        warnings.push(format!(
                            "unrecognized status {:?} for {}",
                            entry.description,
                            status.line.display_name()
                        ));
                    }
                    statuses.push(status);
                }
                Err(e) => {
                    warn!("skipping line: {e}");
                    warnings.push(format!("skipped line: {e}"));
                }
            }
        }

        for line in lines {
            if !statuses.iter().any(|s| s.line == *line) {
                warnings.push(format!("no status reported for {}", line.display_name()));
            }
        }

        rank_statuses(&mut statuses);
        Ok((statuses, warnings))
    }
}

fn parse_lines(command: QueryKind, input: Option<&str>) -> Result<Option<Vec<Line>>, QueryError> {
    input
        .map(Line::normalize_list)
        .transpose()
        .map_err(|e| QueryError::new(command, e))
}

fn check_limit(command: QueryKind, limit: usize) -> Result<(), QueryError> {
    if limit == 0 {
        return Err(QueryError::new(command, QueryErrorKind::InvalidLimit));
    }
    Ok(())
}
