//! London rail status client.
//!
//! Answers "is my line running, when's the next train, how do I get there,
//! and how busy is it?" from the command line, using the TfL unified API.

pub mod cli;
pub mod domain;
pub mod query;
pub mod resolve;
pub mod tfl;
