//! Domain entities - Objects with identity and lifecycle

mod field_set;
mod prediction;
mod session_state;
mod weather_record;

pub use field_set::FieldSet;
pub use prediction::{PredictionResult, SubmissionOutcome, Summary};
pub use session_state::SessionState;
pub use weather_record::WeatherRecord;
