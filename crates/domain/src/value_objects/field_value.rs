//! Field value with a raw-text override
//!
//! Form values are free text. Each value keeps the text exactly as it was
//! entered (or read from the record source) next to its typed interpretation.
//! Text that does not parse strictly is still accepted; it is marked
//! [`ParsedValue::Invalid`] and reported as a [`ValidationWarning`].
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{FieldKind, FieldValue, ParsedValue};
//!
//! let v = FieldValue::parse("1013.2", FieldKind::Numeric);
//! assert_eq!(v.raw(), "1013.2");
//! assert_eq!(v.parsed(), &ParsedValue::Number(1013.2));
//!
//! let v = FieldValue::parse("around noon", FieldKind::TimeOfDay);
//! assert!(v.warning().is_some());
//! assert_eq!(v.raw(), "around noon");
//! ```

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::observation_field::{FieldKind, ObservationField};

/// Typed interpretation of a field's raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParsedValue {
    /// No text entered
    Empty,
    /// Decimal number
    Number(f64),
    /// Time of day
    Time(NaiveTime),
    /// Text that failed strict parsing
    Invalid(String),
}

/// A field's raw text plus its typed interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    raw: String,
    parsed: ParsedValue,
}

/// Warning raised when a field's text fails strict parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Field the warning applies to
    pub field: ObservationField,
    /// The offending text
    pub raw: String,
    /// Why strict parsing failed
    pub reason: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}): {}", self.field.label(), self.raw, self.reason)
    }
}

impl FieldValue {
    /// Interpret `raw` according to `kind`; never fails
    pub fn parse(raw: impl Into<String>, kind: FieldKind) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();

        let parsed = if trimmed.is_empty() {
            ParsedValue::Empty
        } else {
            match kind {
                FieldKind::Numeric => parse_number(trimmed),
                FieldKind::TimeOfDay => parse_time(trimmed),
            }
        };

        Self { raw, parsed }
    }

    /// An empty value
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            raw: String::new(),
            parsed: ParsedValue::Empty,
        }
    }

    /// The text exactly as entered
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The typed interpretation
    #[must_use]
    pub const fn parsed(&self) -> &ParsedValue {
        &self.parsed
    }

    /// Numeric value, if the text parsed as a number
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self.parsed {
            ParsedValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Time value, if the text parsed as a time of day
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self.parsed {
            ParsedValue::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Whether the field holds no text
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.parsed, ParsedValue::Empty)
    }

    /// Parse failure reason, if any
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match &self.parsed {
            ParsedValue::Invalid(reason) => Some(reason),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_number(s: &str) -> ParsedValue {
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => ParsedValue::Number(n),
        Ok(_) => ParsedValue::Invalid("number is not finite".to_string()),
        Err(_) => ParsedValue::Invalid(format!("expected a number, got {s:?}")),
    }
}

fn parse_time(s: &str) -> ParsedValue {
    const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

    if let Some(t) = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
    {
        return ParsedValue::Time(t);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map_or_else(
            || ParsedValue::Invalid(format!("expected a time of day, got {s:?}")),
            |dt| ParsedValue::Time(dt.time()),
        )
}
