//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: record source, forecast, summarization, sessions

mod integrations;
mod server;

use std::{fmt, path::Path};

use application::SubmitTimeouts;
use serde::{Deserialize, Serialize};

pub use integrations::{ForecastAppConfig, RecordsConfig, SessionsAppConfig, SummarizationAppConfig};
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix, e.g. `WEATHERDESK_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "WEATHERDESK";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Historical record source
    #[serde(default)]
    pub records: RecordsConfig,

    /// Forecast service
    #[serde(default)]
    pub forecast: ForecastAppConfig,

    /// Summarization service
    #[serde(default)]
    pub summarization: SummarizationAppConfig,

    /// Form session limits
    #[serde(default)]
    pub sessions: SessionsAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration from an explicit file plus environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(Some(path))
    }

    fn load_with(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        // Explicit files must exist, the default one is optional
        let builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("config").required(false)),
        };

        // Override with environment variables (e.g., WEATHERDESK_FORECAST__MODEL_URL)
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Timeouts applied by the form controller around each submit call
    #[must_use]
    pub const fn submit_timeouts(&self) -> SubmitTimeouts {
        SubmitTimeouts {
            forecast: self.forecast.timeout(),
            summary: self.summarization.timeout(),
        }
    }

    /// Sanity checks that do not prevent startup
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.environment == Environment::Production {
            if self.forecast.model_url.starts_with("http://localhost") {
                warnings.push("forecast.model_url points at localhost in production".to_string());
            }
            if self.server.allowed_origins.is_empty() && self.server.cors_enabled {
                warnings.push("CORS allows all origins in production".to_string());
            }
        }
        if self.forecast.timeout_secs == 0 || self.summarization.timeout_secs == 0 {
            warnings.push("a service timeout of 0s makes every submit fail".to_string());
        }
        warnings
    }
}
