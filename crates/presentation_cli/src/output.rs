//! Plain-text rendering of records and submission results

use std::fmt::Write as _;

use chrono::NaiveDate;
use domain::{FieldSet, ObservationField, SubmissionOutcome};

/// Covered range, or every date when `all` is set
pub fn format_dates(dates: &[NaiveDate], all: bool) -> String {
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return "No dates available".to_string();
    };

    if all {
        return dates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
    }
    format!("{} dates from {first} to {last}", dates.len())
}

/// One `Label: value` line per field, with warnings for non-conforming text
pub fn format_fields(fields: &FieldSet) -> String {
    let width = ObservationField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or_default();

    let mut out = format!("Date: {}\n", fields.date());
    for (field, value) in fields.iter() {
        let _ = write!(out, "  {:<width$}  {}", field.label(), value.raw());
        if let Some(warning) = value.warning() {
            let _ = write!(out, "  (warning: {warning})");
        }
        out.push('\n');
    }
    out
}

/// Predicted and observed temperatures followed by the summary
pub fn format_outcome(outcome: &SubmissionOutcome) -> String {
    let p = &outcome.prediction;
    let mut out = String::new();
    let _ = writeln!(out, "Predicted Max Temperature: {:.2}", p.rounded_max());
    let _ = writeln!(out, "Predicted Min Temperature: {:.2}", p.rounded_min());
    if let (Some(max), Some(min)) = (p.actual_max, p.actual_min) {
        let _ = writeln!(out, "Actual Max Temperature:    {max:.2}");
        let _ = writeln!(out, "Actual Min Temperature:    {min:.2}");
    }
    let _ = write!(out, "\n{}", outcome.summary.text);
    out
}
