//! Command-line front end and presenter.

mod args;
mod render;

pub use args::{Cli, Commands};
pub use render::{busyness_label, render_json, render_text, severity_symbol};
