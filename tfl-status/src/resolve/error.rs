//! Station resolution error types.

use crate::tfl::TflError;

use super::Candidate;

/// Errors from resolving a free-text station query.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The search returned nothing usable
    #[error("no stations found for {query:?}")]
    NoMatch { query: String },

    /// Several stations matched and none was a confident winner
    #[error("{query:?} matches several stations: {}", candidate_names(.candidates))]
    Ambiguous {
        query: String,
        candidates: Vec<Candidate>,
    },

    /// The search request itself failed
    #[error(transparent)]
    Transport(#[from] TflError),
}

fn candidate_names(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| c.station.short_name())
        .collect::<Vec<_>>()
        .join(", ")
}
