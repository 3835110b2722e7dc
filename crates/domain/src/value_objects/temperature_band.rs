//! Temperature bands for predicted daily extremes
//!
//! Fixed thresholds in degrees Fahrenheit used when describing a forecast.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum below which freezing risk is flagged (°F)
pub const FREEZING_RISK_BELOW_F: f64 = 0.0;

/// Minimum below which cold is extreme (°F)
pub const EXTREME_COLD_BELOW_F: f64 = -10.0;

/// Maximum above which heat is above average (°F)
pub const ABOVE_AVERAGE_HEAT_ABOVE_F: f64 = 75.0;

/// Maximum above which heat is extreme (°F)
pub const EXTREME_HEAT_ABOVE_F: f64 = 100.0;

/// A notable band a predicted max/min pair falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// Minimum below 0°F
    FreezingRisk,
    /// Minimum below -10°F
    ExtremeCold,
    /// Maximum above 75°F
    AboveAverageHeat,
    /// Maximum above 100°F
    ExtremeHeat,
}

impl TemperatureBand {
    /// Classify a predicted maximum and minimum
    ///
    /// Bands are cumulative: a minimum of -12°F is both freezing risk and
    /// extreme cold. Cold bands come first, then heat bands.
    #[must_use]
    pub fn classify(max_f: f64, min_f: f64) -> Vec<Self> {
        let mut bands = Vec::new();
        if min_f < FREEZING_RISK_BELOW_F {
            bands.push(Self::FreezingRisk);
        }
        if min_f < EXTREME_COLD_BELOW_F {
            bands.push(Self::ExtremeCold);
        }
        if max_f > ABOVE_AVERAGE_HEAT_ABOVE_F {
            bands.push(Self::AboveAverageHeat);
        }
        if max_f > EXTREME_HEAT_ABOVE_F {
            bands.push(Self::ExtremeHeat);
        }
        bands
    }

    /// Phrase used in natural-language descriptions
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::FreezingRisk => "risk of freezing",
            Self::ExtremeCold => "extreme cold",
            Self::AboveAverageHeat => "above-average heat",
            Self::ExtremeHeat => "extremely hot",
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}
