//! Temperature forecast integration
//!
//! Client for a hosted temperature model (`POST`, `instances` in,
//! `predictions` out) and for the optional warehouse query that returns the
//! observed extremes for a date.

pub mod client;
mod models;

pub use client::{ForecastClient, ForecastClientError, ForecastConfig, HttpForecastClient};
pub use models::TemperaturePair;
