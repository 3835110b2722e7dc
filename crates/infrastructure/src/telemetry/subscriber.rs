//! Tracing subscriber initialization
//!
//! `RUST_LOG` takes precedence over the configured filter.

use std::{fmt, str::FromStr, time::Instant};

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {s}. Use 'text' or 'json'")),
        }
    }
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "weatherdesk=debug,tower_http=info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Service name attached to startup and shutdown events
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

fn default_service_name() -> String {
    "weatherdesk".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
            service_name: default_service_name(),
        }
    }
}

/// Guard that logs the shutdown of the service when dropped
pub struct TelemetryGuard {
    service_name: String,
    started: Instant,
}

impl fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        info!(
            service = %self.service_name,
            uptime_secs = self.started.elapsed().as_secs(),
            "Telemetry shut down"
        );
    }
}

/// Initialize the global subscriber
///
/// Returns a guard that should be kept alive for the duration of the
/// application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(
        service = %config.service_name,
        format = %config.log_format,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
        started: Instant::now(),
    })
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to install the subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Log filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.service_name, "weatherdesk");
        assert!(config.log_filter.starts_with("info"));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let parsed: TelemetryConfig = serde_json::from_str(r#"{"log_format": "json"}"#).unwrap();
        assert_eq!(parsed.log_format, LogFormat::Json);
        assert_eq!(parsed.log_filter, default_log_filter());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_telemetry_guard_drop() {
        let guard = TelemetryGuard {
            service_name: "test".to_string(),
            started: Instant::now(),
        };
        drop(guard);
    }
}
