//! Station resolution.
//!
//! Turns a free-text station query into one concrete [`Station`] using the
//! stop point search endpoint.
//!
//! Matching policy, in order:
//! 1. A candidate whose name equals the query (ignoring case and the
//!    "Underground Station" style suffix) wins outright. When several
//!    distinct stops share that name, the one whose name matches with its
//!    qualifier intact wins, then a hub grouping them; otherwise the query
//!    is ambiguous.
//! 2. A search that returns a single stop point resolves to it.
//! 3. Otherwise candidates are ranked by [`similarity`]; the best one wins if
//!    it scores above the confidence threshold and beats the runner-up by
//!    more than the margin. Anything else is ambiguous.

mod config;
mod error;
mod score;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Station, strip_suffix};
use crate::tfl::{TransitApi, convert_match};

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use score::{name_key, similarity};

/// Naptan prefix of underground stops.
const TUBE_NAPTAN_PREFIX: &str = "940GZZLU";

/// Naptan prefix of any metro stop (tube, DLR, tram).
const METRO_NAPTAN_PREFIX: &str = "940G";

/// Prefix of hub ids that group several stops.
const HUB_PREFIX: &str = "HUB";

/// A search result with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub station: Station,
    pub score: f64,
    /// Whether the name matched the query exactly.
    pub exact: bool,
}

/// Resolves station queries against a [`TransitApi`].
pub struct StationResolver<'a, A: TransitApi> {
    api: &'a A,
    config: &'a ResolverConfig,
}

impl<'a, A: TransitApi> StationResolver<'a, A> {
    pub fn new(api: &'a A, config: &'a ResolverConfig) -> Self {
        Self { api, config }
    }

    /// Every search result, ranked best-first.
    ///
    /// Ambiguity is not an error here; only an empty result is.
    pub async fn candidates(&self, query: &str) -> Result<Vec<Candidate>, ResolveError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::NoMatch {
                query: query.to_string(),
            });
        }

        let matches = self.api.search_stop_points(trimmed).await?;
        debug!(query = trimmed, matches = matches.len(), "station search");

        let stations = matches
            .iter()
            .filter_map(|m| match convert_match(m) {
                Ok(station) => Some(station),
                Err(e) => {
                    debug!("skipping search match: {e}");
                    None
                }
            })
            .collect();

        let candidates = rank_candidates(trimmed, stations);
        if candidates.is_empty() {
            return Err(ResolveError::NoMatch {
                query: query.to_string(),
            });
        }

        Ok(candidates)
    }

    /// Resolve a query to a single station.
    pub async fn resolve(&self, query: &str) -> Result<Station, ResolveError> {
        let candidates = self.candidates(query).await?;
        let best = select_best(query, candidates, self.config)?;
        debug!(query, station = %best.station, score = best.score, "resolved station");
        self.attach_naptan(best.station).await
    }

    /// For a hub, find the child stop used by per-stop endpoints.
    async fn attach_naptan(&self, station: Station) -> Result<Station, ResolveError> {
        if !station.id().starts_with(HUB_PREFIX) {
            return Ok(station);
        }

        let stop = self.api.stop_point(station.id()).await?;
        let child = stop
            .children
            .iter()
            .find(|c| c.id.starts_with(TUBE_NAPTAN_PREFIX))
            .or_else(|| {
                stop.children
                    .iter()
                    .find(|c| c.id.starts_with(METRO_NAPTAN_PREFIX))
            });

        match child {
            Some(child) => {
                debug!(hub = station.id(), naptan = child.id.as_str(), "hub child");
                let naptan = child.id.clone();
                Ok(station.with_naptan(naptan))
            }
            None => {
                debug!(hub = station.id(), "hub has no metro child stop");
                Ok(station)
            }
        }
    }
}

/// Score stations against a query and sort them best-first.
///
/// The sort is stable, so equal scores keep the API's order.
pub fn rank_candidates(query: &str, stations: Vec<Station>) -> Vec<Candidate> {
    let query_key = name_key(query);
    let query_lower = query.trim().to_lowercase();

    let mut candidates: Vec<Candidate> = stations
        .into_iter()
        .map(|station| {
            let key = name_key(station.name());
            let exact = key == query_key || station.name().to_lowercase() == query_lower;
            let score = if exact {
                1.0
            } else {
                similarity(&query_key, &key)
            };
            Candidate {
                station,
                score,
                exact,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.exact.cmp(&a.exact).then(b.score.total_cmp(&a.score)));
    candidates
}

/// Choose the best candidate from a ranked list, or report ambiguity.
pub fn select_best(
    query: &str,
    mut candidates: Vec<Candidate>,
    config: &ResolverConfig,
) -> Result<Candidate, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoMatch {
            query: query.to_string(),
        });
    }

    let exact = candidates.iter().take_while(|c| c.exact).count();
    if exact > 1 {
        return select_exact(query, candidates, exact, config);
    }

    if exact == 1 || candidates.len() == 1 {
        return Ok(candidates.swap_remove(0));
    }

    let top = candidates[0].score;
    let runner_up = candidates[1].score;

    if top > config.confidence_threshold && top - runner_up > config.margin {
        return Ok(candidates.swap_remove(0));
    }

    debug!(query, top, runner_up, "ambiguous station query");
    candidates.truncate(config.max_candidates);
    Err(ResolveError::Ambiguous {
        query: query.to_string(),
        candidates,
    })
}

/// Choose among the leading `exact` candidates, which all match the query
/// by name.
fn select_exact(
    query: &str,
    mut candidates: Vec<Candidate>,
    exact: usize,
    config: &ResolverConfig,
) -> Result<Candidate, ResolveError> {
    candidates.truncate(exact);

    let query_lower = query.trim().to_lowercase();
    let literal: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| strip_suffix(c.station.name()).trim().to_lowercase() == query_lower)
        .map(|(i, _)| i)
        .collect();
    if let [index] = literal[..] {
        return Ok(candidates.swap_remove(index));
    }

    let first_id = candidates[0].station.id();
    if candidates.iter().all(|c| c.station.id() == first_id) {
        return Ok(candidates.swap_remove(0));
    }

    if let Some(hub) = candidates
        .iter()
        .position(|c| c.station.id().starts_with(HUB_PREFIX))
    {
        return Ok(candidates.swap_remove(hub));
    }

    debug!(query, stops = exact, "several stations share this name");
    candidates.truncate(config.max_candidates);
    Err(ResolveError::Ambiguous {
        query: query.to_string(),
        candidates,
    })
}
