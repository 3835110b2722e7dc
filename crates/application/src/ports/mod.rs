//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod forecast_port;
mod record_store_port;
mod summarization_port;

#[cfg(test)]
pub use forecast_port::MockForecastPort;
pub use forecast_port::{ForecastPort, ForecastRequest};
#[cfg(test)]
pub use record_store_port::MockRecordStorePort;
pub use record_store_port::{LookupError, RecordStorePort};
#[cfg(test)]
pub use summarization_port::MockSummarizationPort;
pub use summarization_port::SummarizationPort;
