//! Observation field identifiers
//!
//! The fourteen weather observations that make up a form. The declaration
//! order is the canonical order used by the record source, the forecast
//! request and the rendered form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Semantic kind of an observation field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Decimal quantity (humidity, pressure, wind speed, ...)
    Numeric,
    /// Local time of day (sunrise, sunset)
    TimeOfDay,
}

/// One of the fourteen weather observation fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationField {
    /// Dew point
    Dew,
    /// Relative humidity
    Humidity,
    /// Cloud cover
    CloudCover,
    /// Share of the day with precipitation
    PrecipCover,
    /// Sea level pressure
    SeaLevelPressure,
    /// Solar energy
    SolarEnergy,
    /// Solar radiation
    SolarRadiation,
    /// Sunrise time
    Sunrise,
    /// Sunset time
    Sunset,
    /// UV index
    UvIndex,
    /// Visibility
    Visibility,
    /// Wind direction in degrees
    WindDir,
    /// Wind gust speed
    WindGust,
    /// Sustained wind speed
    WindSpeed,
}

impl ObservationField {
    /// Number of observation fields
    pub const COUNT: usize = 14;

    /// All fields in canonical order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Dew,
        Self::Humidity,
        Self::CloudCover,
        Self::PrecipCover,
        Self::SeaLevelPressure,
        Self::SolarEnergy,
        Self::SolarRadiation,
        Self::Sunrise,
        Self::Sunset,
        Self::UvIndex,
        Self::Visibility,
        Self::WindDir,
        Self::WindGust,
        Self::WindSpeed,
    ];

    /// Column name in the record source and key in service payloads
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Dew => "dew",
            Self::Humidity => "humidity",
            Self::CloudCover => "cloudcover",
            Self::PrecipCover => "precipcover",
            Self::SeaLevelPressure => "sealevelpressure",
            Self::SolarEnergy => "solarenergy",
            Self::SolarRadiation => "solarradiation",
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::UvIndex => "uvindex",
            Self::Visibility => "visibility",
            Self::WindDir => "winddir",
            Self::WindGust => "windgust",
            Self::WindSpeed => "windspeed",
        }
    }

    /// Human readable form label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dew => "Dew",
            Self::Humidity => "Humidity",
            Self::CloudCover => "Cloud Cover",
            Self::PrecipCover => "Precipitation Cover",
            Self::SeaLevelPressure => "Sea Level Pressure",
            Self::SolarEnergy => "Solar Energy",
            Self::SolarRadiation => "Solar Radiation",
            Self::Sunrise => "Sunrise",
            Self::Sunset => "Sunset",
            Self::UvIndex => "UV Index",
            Self::Visibility => "Visibility",
            Self::WindDir => "Wind Direction",
            Self::WindGust => "Wind Gust",
            Self::WindSpeed => "Wind Speed",
        }
    }

    /// Semantic kind used to interpret the raw text
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Sunrise | Self::Sunset => FieldKind::TimeOfDay,
            _ => FieldKind::Numeric,
        }
    }

    /// Form row (1-based) the field is rendered in
    #[must_use]
    pub const fn row(self) -> u8 {
        match self {
            Self::Dew
            | Self::Humidity
            | Self::CloudCover
            | Self::PrecipCover
            | Self::SeaLevelPressure => 1,
            Self::Sunrise
            | Self::Sunset
            | Self::UvIndex
            | Self::SolarEnergy
            | Self::SolarRadiation => 2,
            Self::Visibility | Self::WindDir | Self::WindGust | Self::WindSpeed => 3,
        }
    }

    /// Position in canonical order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ObservationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ObservationField {
    type Err = DomainError;

    /// Accepts the wire name or the label, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| {
                field.wire_name().eq_ignore_ascii_case(needle)
                    || field.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_are_in_index_order() {
        for (i, field) in ObservationField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn wire_names_are_unique() {
        let mut names: Vec<_> = ObservationField::ALL
            .iter()
            .map(|f| f.wire_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ObservationField::COUNT);
    }

    #[test]
    fn parse_accepts_wire_name_and_label() {
        assert_eq!(
            "sealevelpressure".parse::<ObservationField>().unwrap(),
            ObservationField::SeaLevelPressure
        );
        assert_eq!(
            "Wind Direction".parse::<ObservationField>().unwrap(),
            ObservationField::WindDir
        );
        assert_eq!(
            "UVINDEX".parse::<ObservationField>().unwrap(),
            ObservationField::UvIndex
        );
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let err = "temperature".parse::<ObservationField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: temperature");
    }

    #[test]
    fn only_sunrise_and_sunset_are_times() {
        let times: Vec<_> = ObservationField::ALL
            .into_iter()
            .filter(|f| f.kind() == FieldKind::TimeOfDay)
            .collect();
        assert_eq!(times, vec![ObservationField::Sunrise, ObservationField::Sunset]);
    }

    #[test]
    fn rows_hold_five_five_and_four_fields() {
        let count = |row| ObservationField::ALL.iter().filter(|f| f.row() == row).count();
        assert_eq!(count(1), 5);
        assert_eq!(count(2), 5);
        assert_eq!(count(3), 4);
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&ObservationField::CloudCover).unwrap();
        assert_eq!(json, "\"cloudcover\"");
        let json = serde_json::to_string(&ObservationField::WindSpeed).unwrap();
        assert_eq!(json, "\"windspeed\"");
    }
}
