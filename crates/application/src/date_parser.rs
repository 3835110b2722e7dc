//! Calendar date parsing utilities
//!
//! Dates arrive from the record source, the HTTP API and the CLI. All of them
//! go through [`parse_date`] so the accepted formats stay consistent.

use chrono::{NaiveDate, NaiveDateTime};
use domain::DomainError;
use tracing::debug;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a calendar date
///
/// Supports formats like:
/// - "2023-02-05"
/// - "02/05/2023" (US order)
/// - "05.02.2023"
/// - "2023-02-05T00:00:00" (date part is taken)
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if no format matches.
pub fn parse_date(input: &str) -> Result<NaiveDate, DomainError> {
    let input = input.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
    {
        return Ok(date);
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Ok(datetime.date());
    }

    debug!(input = %input, "Failed to parse date");
    Err(DomainError::InvalidDate(input.to_string()))
}
