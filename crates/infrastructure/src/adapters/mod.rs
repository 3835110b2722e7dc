//! Adapters implementing application ports over the integration clients

mod forecast_adapter;
mod summarization_adapter;

pub use forecast_adapter::ForecastAdapter;
pub use summarization_adapter::SummarizationAdapter;
