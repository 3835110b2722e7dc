//! Forecast adapter - Implements ForecastPort using integration_forecast

use application::{
    error::ApplicationError,
    ports::{ForecastPort, ForecastRequest},
};
use async_trait::async_trait;
use domain::PredictionResult;
use integration_forecast::{
    ForecastClient, ForecastClientError, ForecastConfig, HttpForecastClient,
};
use tracing::{debug, instrument};

/// Adapter combining the model prediction with the warehouse observation
pub struct ForecastAdapter<C = HttpForecastClient> {
    client: C,
}

impl<C> std::fmt::Debug for ForecastAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastAdapter")
            .field("client", &std::any::type_name::<C>())
            .finish()
    }
}

impl ForecastAdapter<HttpForecastClient> {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: ForecastConfig) -> Result<Self, ApplicationError> {
        let client = HttpForecastClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

impl<C: ForecastClient> ForecastAdapter<C> {
    /// Wrap an existing client
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Map integration forecast error to application error
    fn map_error(err: ForecastClientError) -> ApplicationError {
        ApplicationError::Forecast(err.to_string())
    }
}

#[async_trait]
impl<C: ForecastClient> ForecastPort for ForecastAdapter<C> {
    #[instrument(skip(self, request), fields(date = %request.date))]
    async fn forecast(&self, request: &ForecastRequest) -> Result<PredictionResult, ApplicationError> {
        let instance = serde_json::to_value(request)
            .map_err(|e| ApplicationError::Internal(format!("Cannot encode request: {e}")))?;

        let (predicted, observed) = tokio::try_join!(
            self.client.predict(&instance),
            self.client.observed(request.date)
        )
        .map_err(Self::map_error)?;

        let result = PredictionResult::predicted(predicted.tempmax, predicted.tempmin);
        let result = match observed {
            Some(actual) => result.with_actuals(actual.tempmax, actual.tempmin),
            None => result,
        };

        debug!(
            predicted_max = result.predicted_max,
            predicted_min = result.predicted_min,
            has_actuals = result.has_actuals(),
            "Forecast retrieved"
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
