//! Domain layer for WeatherDesk
//!
//! Contains weather records, the editable field set, forecast results and
//! domain errors. This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
