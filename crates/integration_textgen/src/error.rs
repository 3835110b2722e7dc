//! Text generation errors

use thiserror::Error;

/// Errors that can occur while generating text
#[derive(Debug, Error)]
pub enum TextGenError {
    /// Failed to connect to the generation endpoint
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request failed or returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generation did not finish in time
    #[error("Generation timeout after {0}s")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}
