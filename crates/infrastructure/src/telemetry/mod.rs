//! Logging and tracing infrastructure
//!
//! Sets up the global `tracing` subscriber with text or JSON output.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
