//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the CSV record store, the forecast and summarization adapters,
//! configuration loading, logging setup and page templates.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{
    AppConfig, Environment, ForecastAppConfig, RecordsConfig, ServerConfig, SessionsAppConfig,
    SummarizationAppConfig,
};
pub use persistence::{CsvRecordStore, RecordStoreError};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryGuard, init_telemetry};
pub use templates::{FormPageData, TemplateEngine, TemplateError};
