//! External service configurations: record source, forecast, summarization.

use std::{path::PathBuf, time::Duration};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Record Source Configuration
// ==============================

/// Location of the historical observation table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Path to the CSV file
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("data/weather.csv")
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

// ==============================
// Forecast Configuration
// ==============================

/// Forecast service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ForecastAppConfig {
    /// Model prediction endpoint
    #[serde(default = "default_model_url")]
    pub model_url: String,

    /// Warehouse query endpoint for observed temperatures (optional)
    #[serde(default)]
    pub warehouse_url: Option<String>,

    /// Bearer token for the model and warehouse (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ForecastAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastAppConfig")
            .field("model_url", &self.model_url)
            .field("warehouse_url", &self.warehouse_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_model_url() -> String {
    "http://localhost:8501/v1/models/temperature:predict".to_string()
}

const fn default_service_timeout() -> u64 {
    30
}

impl Default for ForecastAppConfig {
    fn default() -> Self {
        Self {
            model_url: default_model_url(),
            warehouse_url: None,
            api_key: None,
            timeout_secs: default_service_timeout(),
        }
    }
}

impl ForecastAppConfig {
    /// Convert to `integration_forecast` config
    #[must_use]
    pub fn to_forecast_config(&self) -> integration_forecast::ForecastConfig {
        integration_forecast::ForecastConfig {
            model_url: self.model_url.clone(),
            warehouse_url: self.warehouse_url.clone().filter(|u| !u.trim().is_empty()),
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Upper bound for one forecast call
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ==============================
// Summarization Configuration
// ==============================

/// Summarization service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationAppConfig {
    /// Text generation endpoint
    #[serde(default = "default_summarization_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

fn default_summarization_url() -> String {
    "http://localhost:8080/generate".to_string()
}

impl Default for SummarizationAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_summarization_url(),
            timeout_secs: default_service_timeout(),
        }
    }
}

impl SummarizationAppConfig {
    /// Convert to `integration_textgen` config
    #[must_use]
    pub fn to_textgen_config(&self) -> integration_textgen::TextGenConfig {
        integration_textgen::TextGenConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Upper bound for one summarization call
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ==============================
// Session Configuration
// ==============================

/// Form session limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsAppConfig {
    /// Maximum number of live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle time in seconds after which a session is dropped
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,
}

const fn default_max_sessions() -> usize {
    1000
}

const fn default_idle_ttl() -> u64 {
    30 * 60
}

impl Default for SessionsAppConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_ttl_secs: default_idle_ttl(),
        }
    }
}

impl SessionsAppConfig {
    /// Convert to the application's registry config
    #[must_use]
    pub const fn to_registry_config(&self) -> application::SessionRegistryConfig {
        application::SessionRegistryConfig {
            max_sessions: self.max_sessions,
            idle_ttl: Duration::from_secs(self.idle_ttl_secs),
        }
    }
}
