//! WeatherDesk CLI
//!
//! Argument parsing and output formatting for the `weatherdesk` binary.

pub mod cli;
pub mod output;

pub use cli::{Cli, Commands, FieldAssignment, endpoint_url, log_filter_from_verbosity};
