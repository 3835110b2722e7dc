//! Wire models for the model and warehouse endpoints

use serde::{Deserialize, Deserializer, Serialize, de};

/// A max/min temperature pair in °F
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePair {
    /// Maximum temperature
    #[serde(deserialize_with = "flexible_f64")]
    pub tempmax: f64,
    /// Minimum temperature
    #[serde(deserialize_with = "flexible_f64")]
    pub tempmin: f64,
}

/// Model endpoint request body
#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub instances: [&'a serde_json::Value; 1],
}

/// Model endpoint response body
#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<TemperaturePair>,
}

/// Warehouse endpoint response body
#[derive(Debug, Deserialize)]
pub(crate) struct WarehouseResponse {
    #[serde(default)]
    pub rows: Vec<TemperaturePair>,
}

/// Numbers arrive plain, as numeric strings, or wrapped in `{"value": ..}`
#[derive(Deserialize)]
#[serde(untagged)]
enum FlexibleNumber {
    Plain(f64),
    Text(String),
    Nested { value: Box<FlexibleNumber> },
}

impl FlexibleNumber {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            Self::Plain(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("not a number: {s:?}")),
            Self::Nested { value } => value.into_f64(),
        }
    }
}

fn flexible_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = FlexibleNumber::deserialize(deserializer)?.into_f64().map_err(de::Error::custom)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::custom("temperature must be finite"))
    }
}
