//! Command-line arguments.

use chrono::Weekday;
use clap::{Parser, Subcommand};

use crate::query::Request;

#[derive(Parser, Debug)]
#[command(name = "tfl")]
#[command(about = "London rail status, arrivals, journeys and crowding", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the result envelope as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log API calls and station resolution to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Status of every rail line, worst first
    Status {
        /// Comma-separated line names (e.g. victoria,central)
        #[arg(long)]
        line: Option<String>,
    },

    /// Only lines with problems
    Disruptions,

    /// Detail on one line, including disruption reasons
    Line {
        /// Line name (e.g. northern, "hammersmith & city")
        name: String,
    },

    /// Next trains at a station
    Arrivals {
        /// Station name (e.g. "oxford circus")
        station: String,

        /// Only show these lines (comma-separated)
        #[arg(long)]
        line: Option<String>,

        /// Arrivals shown per line
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Plan a route from A to B
    Journey {
        origin: String,
        destination: String,

        /// Routes shown
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },

    /// Find stations by name
    Search { query: String },

    /// How busy a station is right now
    #[command(alias = "busyness")]
    Crowding { station: String },

    /// Typical busyness at a station on a day of the week
    #[command(alias = "busyness-pattern")]
    CrowdingPattern {
        station: String,

        /// Day of the week (e.g. monday, tue)
        day: Weekday,
    },
}

impl Commands {
    /// The aggregator request for this subcommand.
    pub fn into_request(self) -> Request {
        match self {
            Commands::Status { line } => Request::Status { lines: line },
            Commands::Disruptions => Request::Disruptions,
            Commands::Line { name } => Request::Line { line: name },
            Commands::Arrivals {
                station,
                line,
                limit,
            } => Request::Arrivals {
                station,
                limit,
                lines: line,
            },
            Commands::Journey {
                origin,
                destination,
                limit,
            } => Request::Journey {
                from: origin,
                to: destination,
                limit,
            },
            Commands::Search { query } => Request::Search { query },
            Commands::Crowding { station } => Request::Crowding { station },
            Commands::CrowdingPattern { station, day } => {
                Request::CrowdingPattern { station, day }
            }
        }
    }
}
