//! Editable set of observation values for a selected date

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use super::WeatherRecord;
use crate::value_objects::{FieldValue, ObservationField, ValidationWarning};

/// The fourteen observation values currently shown in a session
///
/// Always holds exactly one value per [`ObservationField`]; a field set is
/// either complete or does not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    date: NaiveDate,
    values: [FieldValue; ObservationField::COUNT],
}

impl FieldSet {
    /// Populate every field verbatim from a record
    #[must_use]
    pub fn from_record(record: &WeatherRecord) -> Self {
        let values = std::array::from_fn(|i| {
            let field = ObservationField::ALL[i];
            FieldValue::parse(record.get(field), field.kind())
        });
        Self {
            date: record.date(),
            values,
        }
    }

    /// The selected date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Current value of one field
    #[must_use]
    pub fn get(&self, field: ObservationField) -> &FieldValue {
        &self.values[field.index()]
    }

    /// Overwrite one field with free text
    ///
    /// The text is always stored. A warning is returned when it does not
    /// parse as the field's semantic kind.
    pub fn set(&mut self, field: ObservationField, raw: impl Into<String>) -> Option<ValidationWarning> {
        let value = FieldValue::parse(raw, field.kind());
        let warning = value.warning().map(|reason| ValidationWarning {
            field,
            raw: value.raw().to_string(),
            reason: reason.to_string(),
        });
        self.values[field.index()] = value;
        warning
    }

    /// All values in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ObservationField, &FieldValue)> {
        ObservationField::ALL.into_iter().zip(self.values.iter())
    }

    /// Warnings for every field whose text fails strict parsing
    #[must_use]
    pub fn warnings(&self) -> Vec<ValidationWarning> {
        self.iter()
            .filter_map(|(field, value)| {
                value.warning().map(|reason| ValidationWarning {
                    field,
                    raw: value.raw().to_string(),
                    reason: reason.to_string(),
                })
            })
            .collect()
    }
}

/// Field values keyed by wire name
struct FieldMap<'a>(&'a FieldSet);

impl Serialize for FieldMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ObservationField::COUNT))?;
        for (field, value) in self.0.iter() {
            map.serialize_entry(field.wire_name(), value)?;
        }
        map.end()
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldSet", 2)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("fields", &FieldMap(self))?;
        state.end()
    }
}
