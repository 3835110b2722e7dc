//! Summary prompt construction
//!
//! Turns a prediction into the fixed prompt sent to the summarization
//! service.

use std::fmt::Write as _;

use domain::{
    ABOVE_AVERAGE_HEAT_ABOVE_F, EXTREME_COLD_BELOW_F, EXTREME_HEAT_ABOVE_F,
    FREEZING_RISK_BELOW_F, PredictionResult,
};

/// Build the summarization prompt for a prediction
///
/// The predicted values are embedded rounded to two decimals, followed by the
/// fixed temperature thresholds and the bands the prediction falls into.
#[must_use]
pub fn build_summary_prompt(prediction: &PredictionResult) -> String {
    let mut prompt = String::from(
        "You are a weather assistant writing a short, friendly forecast summary.\n",
    );

    let _ = writeln!(
        prompt,
        "The predicted maximum temperature is {:.2}°F and the predicted minimum temperature is {:.2}°F.",
        prediction.rounded_max(),
        prediction.rounded_min(),
    );

    prompt.push_str("Describe the day using these rules:\n");
    let _ = writeln!(
        prompt,
        "- If the minimum is below {FREEZING_RISK_BELOW_F:.0}°F, warn about the risk of freezing."
    );
    let _ = writeln!(
        prompt,
        "- If the minimum is below {EXTREME_COLD_BELOW_F:.0}°F, describe the cold as extreme and advise limiting time outdoors."
    );
    let _ = writeln!(
        prompt,
        "- If the maximum is above {ABOVE_AVERAGE_HEAT_ABOVE_F:.0}°F, mention above-average heat."
    );
    let _ = writeln!(
        prompt,
        "- If the maximum is above {EXTREME_HEAT_ABOVE_F:.0}°F, describe the day as extremely hot and advise staying hydrated."
    );

    let bands = prediction.bands();
    if bands.is_empty() {
        prompt.push_str("Applicable conditions: none, temperatures are within the usual range.\n");
    } else {
        let phrases: Vec<_> = bands.iter().map(|b| b.phrase()).collect();
        let _ = writeln!(prompt, "Applicable conditions: {}.", phrases.join(", "));
    }

    prompt.push_str("Answer in two or three sentences.");
    prompt
}
