//! Text generation integration
//!
//! Client for a prompt-in, text-out generation endpoint used to summarize
//! forecasts.

mod client;
mod config;
mod error;

pub use client::{HttpTextGenClient, TextGenClient};
pub use config::TextGenConfig;
pub use error::TextGenError;
