//! Query error types.

use crate::domain::UnknownLine;
use crate::resolve::ResolveError;
use crate::tfl::TflError;

use super::QueryKind;

/// Error from a query, tagged with the subcommand that raised it.
#[derive(Debug, thiserror::Error)]
#[error("{command}: {kind}")]
pub struct QueryError {
    pub command: QueryKind,
    pub kind: QueryErrorKind,
}

/// What went wrong.
///
/// Errors from line normalization and station resolution are carried
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum QueryErrorKind {
    #[error(transparent)]
    UnknownLine(#[from] UnknownLine),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Transport(#[from] TflError),

    /// A journey endpoint has no usable position
    #[error("could not get coordinates for {station:?}")]
    MissingCoordinates { station: String },

    #[error("limit must be greater than zero")]
    InvalidLimit,
}

impl QueryError {
    pub fn new(command: QueryKind, kind: impl Into<QueryErrorKind>) -> Self {
        Self {
            command,
            kind: kind.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match &self.kind {
            QueryErrorKind::UnknownLine(_) | QueryErrorKind::InvalidLimit => 2,
            QueryErrorKind::Resolve(ResolveError::NoMatch { .. }) => 3,
            QueryErrorKind::Resolve(ResolveError::Ambiguous { .. }) => 4,
            QueryErrorKind::Resolve(ResolveError::Transport(_)) | QueryErrorKind::Transport(_) => 5,
            QueryErrorKind::MissingCoordinates { .. } => 6,
        }
    }
}
