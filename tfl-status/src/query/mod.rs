//! Query aggregation.
//!
//! Each subcommand maps to one [`Aggregator`] operation. Operations
//! normalize line names and resolve stations as needed, call the transit
//! API, and return a [`QueryResult`] envelope that the presenter renders
//! without knowing which subcommand produced it.
//!
//! Errors carry the subcommand name and otherwise pass through unchanged.
//! Odd but non-fatal upstream data (unknown lines, unrecognized status
//! phrases, malformed records) ends up in the envelope's `warnings`.

mod aggregator;
mod envelope;
mod error;

pub use aggregator::{Aggregator, Request};
pub use envelope::{Payload, QueryKind, QueryResult};
pub use error::{QueryError, QueryErrorKind};
