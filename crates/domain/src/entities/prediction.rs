//! Forecast results and their natural-language summary

use serde::{Deserialize, Serialize};

use crate::value_objects::TemperatureBand;

/// Predicted daily temperature extremes, with observed values when known
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted maximum temperature (°F)
    pub predicted_max: f64,
    /// Predicted minimum temperature (°F)
    pub predicted_min: f64,
    /// Observed maximum temperature (°F), if the date has been recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_max: Option<f64>,
    /// Observed minimum temperature (°F), if the date has been recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_min: Option<f64>,
}

impl PredictionResult {
    /// Create a prediction without observed values
    #[must_use]
    pub const fn predicted(predicted_max: f64, predicted_min: f64) -> Self {
        Self {
            predicted_max,
            predicted_min,
            actual_max: None,
            actual_min: None,
        }
    }

    /// Attach observed values
    #[must_use]
    pub const fn with_actuals(mut self, actual_max: f64, actual_min: f64) -> Self {
        self.actual_max = Some(actual_max);
        self.actual_min = Some(actual_min);
        self
    }

    /// Predicted maximum rounded to two decimals
    #[must_use]
    pub fn rounded_max(&self) -> f64 {
        round2(self.predicted_max)
    }

    /// Predicted minimum rounded to two decimals
    #[must_use]
    pub fn rounded_min(&self) -> f64 {
        round2(self.predicted_min)
    }

    /// Notable temperature bands of the prediction
    #[must_use]
    pub fn bands(&self) -> Vec<TemperatureBand> {
        TemperatureBand::classify(self.predicted_max, self.predicted_min)
    }

    /// Whether observed values are available
    #[must_use]
    pub const fn has_actuals(&self) -> bool {
        self.actual_max.is_some() && self.actual_min.is_some()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Natural-language summary of a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Generated text
    pub text: String,
    /// Prompt the text was generated from
    pub prompt: String,
}

/// Everything a successful submission produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Forecast values
    pub prediction: PredictionResult,
    /// Summary of the forecast
    pub summary: Summary,
}
