//! Text generation configuration

use serde::{Deserialize, Serialize};

/// Configuration for the text generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenConfig {
    /// Endpoint receiving `?prompt=` queries
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/generate".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
