//! Value Objects - Immutable, identity-less domain primitives

mod field_value;
mod observation_field;
mod session_id;
mod temperature_band;

pub use field_value::{FieldValue, ParsedValue, ValidationWarning};
pub use observation_field::{FieldKind, ObservationField};
pub use session_id::SessionId;
pub use temperature_band::{
    ABOVE_AVERAGE_HEAT_ABOVE_F, EXTREME_COLD_BELOW_F, EXTREME_HEAT_ABOVE_F, FREEZING_RISK_BELOW_F,
    TemperatureBand,
};
