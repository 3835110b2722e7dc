//! Forecast service port
//!
//! Defines the interface for predicting daily temperature extremes from a
//! date and its observation fields.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{FieldSet, ObservationField, PredictionResult};
#[cfg(test)]
use mockall::automock;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ApplicationError;

/// Input to a forecast: the date plus the raw text of every field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    /// Date to forecast
    pub date: NaiveDate,
    /// Field text in canonical order
    pub features: Vec<(ObservationField, String)>,
}

impl ForecastRequest {
    /// Build a request from the current field set
    #[must_use]
    pub fn from_field_set(fields: &FieldSet) -> Self {
        Self {
            date: fields.date(),
            features: fields
                .iter()
                .map(|(field, value)| (field, value.raw().to_string()))
                .collect(),
        }
    }

    /// Raw text for one field
    #[must_use]
    pub fn feature(&self, field: ObservationField) -> Option<&str> {
        self.features
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }
}

/// Serializes as a flat object keyed by source column names
impl Serialize for ForecastRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.features.len() + 1))?;
        map.serialize_entry("datetime", &self.date)?;
        for (field, value) in &self.features {
            map.serialize_entry(field.wire_name(), value)?;
        }
        map.end()
    }
}

/// Port for forecast operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Predict max/min temperature, with observed values when available
    async fn forecast(&self, request: &ForecastRequest) -> Result<PredictionResult, ApplicationError>;

    /// Check if the forecast service is reachable
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use domain::WeatherRecord;

    use super::*;

    fn _assert_object_safe(_: &dyn ForecastPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ForecastPort>();
    }

    fn field_set() -> FieldSet {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let record = WeatherRecord::from_fn(date, |f| format!("v{}", f.index()));
        FieldSet::from_record(&record)
    }

    #[test]
    fn request_carries_all_fields_in_order() {
        let request = ForecastRequest::from_field_set(&field_set());
        assert_eq!(request.features.len(), ObservationField::COUNT);
        assert_eq!(request.features[0].0, ObservationField::Dew);
        assert_eq!(request.feature(ObservationField::WindSpeed), Some("v13"));
    }

    #[test]
    fn request_serializes_flat() {
        let json = serde_json::to_value(ForecastRequest::from_field_set(&field_set())).unwrap();
        assert_eq!(json["datetime"], "2023-06-01");
        assert_eq!(json["humidity"], "v1");
        assert_eq!(json.as_object().unwrap().len(), 15);
    }
}
