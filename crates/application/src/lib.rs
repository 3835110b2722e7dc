//! Application layer - Use cases and orchestration
//!
//! Contains the form controller, the session registry and the port
//! definitions for the record store, forecast and summarization services.

pub mod date_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use date_parser::parse_date;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
