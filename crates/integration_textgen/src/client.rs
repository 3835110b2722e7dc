//! Text generation HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{config::TextGenConfig, error::TextGenError};

/// Client that turns a prompt into generated text
#[async_trait]
pub trait TextGenClient: Send + Sync {
    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, TextGenError>;

    /// Check if the endpoint answers
    async fn is_healthy(&self) -> bool;
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// reqwest-backed text generation client
#[derive(Debug)]
pub struct HttpTextGenClient {
    client: Client,
    config: TextGenConfig,
}

impl HttpTextGenClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: TextGenConfig) -> Result<Self, TextGenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TextGenError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn map_send_error(&self, err: &reqwest::Error) -> TextGenError {
        if err.is_timeout() {
            TextGenError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            TextGenError::ConnectionFailed(err.to_string())
        } else {
            TextGenError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl TextGenClient for HttpTextGenClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, TextGenError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("prompt", prompt)])
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TextGenError::RateLimited);
        }
        if status.is_server_error() {
            return Err(TextGenError::ServerError(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(TextGenError::RequestFailed(format!("HTTP {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TextGenError::InvalidResponse(e.to_string()))?;

        debug!(chars = body.response.len(), "Text generated");
        Ok(body.response)
    }

    async fn is_healthy(&self) -> bool {
        self.client
            .get(&self.config.base_url)
            .send()
            .await
            .is_ok_and(|r| !r.status().is_server_error())
    }
}
