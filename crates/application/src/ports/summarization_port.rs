//! Summarization port - Interface for natural-language text generation

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for turning a prompt into natural-language text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SummarizationPort: Send + Sync {
    /// Generate a response for a prompt
    async fn summarize(&self, prompt: &str) -> Result<String, ApplicationError>;

    /// Check if the text generation backend is reachable
    async fn is_available(&self) -> bool;
}
