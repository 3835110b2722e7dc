//! Command-line definition

use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// WeatherDesk CLI
#[derive(Debug, Parser)]
#[command(name = "weatherdesk")]
#[command(author, version, about = "WeatherDesk forecast form CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "WEATHERDESK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the dates covered by the record source
    Dates {
        /// Print every date instead of the range
        #[arg(long)]
        all: bool,
    },

    /// Show the record for a date
    Lookup {
        /// Date to look up, e.g. 2023-04-10
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a date, apply edits and run the forecast and summary
    ///
    /// Example: weatherdesk submit 2023-04-10 --set humidity=80 --set windspeed=12.5
    Submit {
        /// Date to load
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        /// Field override as name=value (repeatable)
        #[arg(short, long = "set")]
        set: Vec<FieldAssignment>,
    },

    /// Check a running server (used by container healthchecks)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// `name=value` override given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub name: String,
    pub value: String,
}

impl FromStr for FieldAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing field name in '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    application::parse_date(s).map_err(|e| e.to_string())
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
