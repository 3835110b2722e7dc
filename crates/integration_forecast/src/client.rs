//! Forecast HTTP client
//!
//! Calls the hosted temperature model and, when configured, the warehouse
//! endpoint holding observed temperatures.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{PredictRequest, PredictResponse, TemperaturePair, WarehouseResponse};

/// Forecast client errors
#[derive(Debug, Error)]
pub enum ForecastClientError {
    /// Connection to the endpoint failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request failed or returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Response body could not be interpreted
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Model returned no predictions
    #[error("Model returned no predictions")]
    EmptyPrediction,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl From<reqwest::Error> for ForecastClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Forecast client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Model prediction endpoint
    #[serde(default = "default_model_url")]
    pub model_url: String,

    /// Warehouse query endpoint; observed values are skipped when unset
    #[serde(default)]
    pub warehouse_url: Option<String>,

    /// Value for the `Authorization: Bearer` header, if the endpoints need one
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_model_url() -> String {
    "http://localhost:8501/v1/models/temperature:predict".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model_url: default_model_url(),
            warehouse_url: None,
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Client for temperature predictions and observations
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Predict the temperature pair for one feature instance
    async fn predict(
        &self,
        instance: &serde_json::Value,
    ) -> Result<TemperaturePair, ForecastClientError>;

    /// Observed temperature pair for a date, `None` when not recorded
    async fn observed(
        &self,
        date: NaiveDate,
    ) -> Result<Option<TemperaturePair>, ForecastClientError>;

    /// Check if the model endpoint answers at all
    async fn is_healthy(&self) -> bool;
}

/// reqwest-backed forecast client
#[derive(Debug)]
pub struct HttpForecastClient {
    client: Client,
    config: ForecastConfig,
}

impl HttpForecastClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ForecastClientError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Whether observed values will be looked up
    pub const fn has_warehouse(&self) -> bool {
        self.config.warehouse_url.is_some()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn check_status(response: Response) -> Result<Response, ForecastClientError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ForecastClientError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(ForecastClientError::ServiceUnavailable(format!(
                "HTTP {status}"
            )));
        }
        if !status.is_success() {
            return Err(ForecastClientError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    #[instrument(skip(self, instance), fields(url = %self.config.model_url))]
    async fn predict(
        &self,
        instance: &serde_json::Value,
    ) -> Result<TemperaturePair, ForecastClientError> {
        let body = PredictRequest {
            instances: [instance],
        };

        let response = self
            .authorized(self.client.post(&self.config.model_url))
            .json(&body)
            .send()
            .await?;
        let response = Self::check_status(response)?;

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| ForecastClientError::ParseError(e.to_string()))?;

        let pair = parsed
            .predictions
            .into_iter()
            .next()
            .ok_or(ForecastClientError::EmptyPrediction)?;

        debug!(tempmax = pair.tempmax, tempmin = pair.tempmin, "Model prediction received");
        Ok(pair)
    }

    #[instrument(skip(self))]
    async fn observed(
        &self,
        date: NaiveDate,
    ) -> Result<Option<TemperaturePair>, ForecastClientError> {
        let Some(url) = &self.config.warehouse_url else {
            return Ok(None);
        };

        let response = self
            .authorized(self.client.get(url))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        let response = Self::check_status(response)?;

        let parsed: WarehouseResponse = response
            .json()
            .await
            .map_err(|e| ForecastClientError::ParseError(e.to_string()))?;

        let pair = parsed.rows.into_iter().next();
        debug!(found = pair.is_some(), "Warehouse lookup finished");
        Ok(pair)
    }

    async fn is_healthy(&self) -> bool {
        // Any HTTP answer means the endpoint is reachable
        self.client
            .get(&self.config.model_url)
            .send()
            .await
            .is_ok_and(|r| !r.status().is_server_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ForecastConfig::default();
        assert!(config.model_url.ends_with(":predict"));
        assert!(config.warehouse_url.is_none());
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{"warehouse_url": "http://wh/query"}"#).unwrap();
        assert_eq!(config.warehouse_url.as_deref(), Some("http://wh/query"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = ForecastConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_client_creation() {
        let client = HttpForecastClient::new(ForecastConfig::default()).unwrap();
        assert!(!client.has_warehouse());
    }

    #[test]
    fn test_error_display() {
        assert!(ForecastClientError::EmptyPrediction.to_string().contains("no predictions"));
        assert!(ForecastClientError::RateLimitExceeded.to_string().contains("Rate limit"));
    }
}
