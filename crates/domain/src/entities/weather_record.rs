//! Historical weather observation for one calendar date

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value_objects::ObservationField;

/// One row of the record source
///
/// Observation values are kept as the source text; interpretation happens
/// when a [`FieldSet`](super::FieldSet) is built from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRecord {
    date: NaiveDate,
    values: [String; ObservationField::COUNT],
}

impl WeatherRecord {
    /// Create a record from values in canonical field order
    #[must_use]
    pub const fn new(date: NaiveDate, values: [String; ObservationField::COUNT]) -> Self {
        Self { date, values }
    }

    /// Create a record by asking for each field's text
    pub fn from_fn(date: NaiveDate, mut value_of: impl FnMut(ObservationField) -> String) -> Self {
        let values = std::array::from_fn(|i| value_of(ObservationField::ALL[i]));
        Self { date, values }
    }

    /// The record's date key
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Source text of one observation
    #[must_use]
    pub fn get(&self, field: ObservationField) -> &str {
        &self.values[field.index()]
    }

    /// All observations in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ObservationField, &str)> {
        ObservationField::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for WeatherRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ObservationField::COUNT + 1))?;
        map.serialize_entry("datetime", &self.date)?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.wire_name(), value)?;
        }
        map.end()
    }
}
