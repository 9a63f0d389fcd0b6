//! `tfl` command-line entry point.
//!
//! Environment variables:
//! - `TFL_APP_KEY`: API key (optional; anonymous requests are rate limited)
//! - `TFL_API_BASE`: API base URL (default: https://api.tfl.gov.uk)
//! - `RUST_LOG`: log filter (default: warn, or debug with `--verbose`)

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tfl_status::cli::{Cli, render_json, render_text};
use tfl_status::query::Aggregator;
use tfl_status::resolve::ResolverConfig;
use tfl_status::tfl::{TflClient, TflConfig};

/// Exit code when the HTTP client can't be built or output can't be encoded.
const INTERNAL_ERROR: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let client = match TflClient::new(TflConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(INTERNAL_ERROR);
        }
    };

    let resolver_config = ResolverConfig::default();
    let aggregator = Aggregator::new(&client, &resolver_config);

    let result = match aggregator.dispatch(cli.command.into_request()).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    if cli.json {
        match render_json(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to encode result: {e}");
                return ExitCode::from(INTERNAL_ERROR);
            }
        }
    } else {
        for warning in &result.warnings {
            eprintln!("warning: {warning}");
        }
        println!("{}", render_text(&result));
    }

    ExitCode::SUCCESS
}
