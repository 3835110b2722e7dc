//! Summarization adapter - Implements SummarizationPort using integration_textgen

use application::{error::ApplicationError, ports::SummarizationPort};
use async_trait::async_trait;
use integration_textgen::{HttpTextGenClient, TextGenClient, TextGenConfig, TextGenError};
use tracing::{debug, instrument};

/// Adapter for the text generation endpoint
pub struct SummarizationAdapter<C = HttpTextGenClient> {
    client: C,
}

impl<C> std::fmt::Debug for SummarizationAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizationAdapter")
            .field("client", &std::any::type_name::<C>())
            .finish()
    }
}

impl SummarizationAdapter<HttpTextGenClient> {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: TextGenConfig) -> Result<Self, ApplicationError> {
        let client = HttpTextGenClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

impl<C: TextGenClient> SummarizationAdapter<C> {
    /// Wrap an existing client
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    fn map_error(err: TextGenError) -> ApplicationError {
        ApplicationError::Summary(err.to_string())
    }
}

#[async_trait]
impl<C: TextGenClient> SummarizationPort for SummarizationAdapter<C> {
    #[instrument(skip(self, prompt))]
    async fn summarize(&self, prompt: &str) -> Result<String, ApplicationError> {
        let text = self.client.generate(prompt).await.map_err(Self::map_error)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ApplicationError::Summary(
                "Summarization service returned empty text".to_string(),
            ));
        }
        debug!(chars = text.len(), "Summary generated");
        Ok(text.to_string())
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
