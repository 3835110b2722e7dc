//! Form controller - one user's form session
//!
//! Mediates between the selected date, the record store, user edits and the
//! forecast and summarization collaborators.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use chrono::NaiveDate;
use domain::{
    FieldSet, ObservationField, SessionState, SubmissionOutcome, Summary, ValidationWarning,
};
use tracing::{debug, info, instrument, warn};

use super::summary_prompt::build_summary_prompt;
use crate::{
    error::ApplicationError,
    ports::{ForecastPort, ForecastRequest, RecordStorePort, SummarizationPort},
};

/// Timeouts applied to the two calls made by a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTimeouts {
    /// Upper bound for the forecast call
    pub forecast: Duration,
    /// Upper bound for the summarization call
    pub summary: Duration,
}

impl Default for SubmitTimeouts {
    fn default() -> Self {
        Self {
            forecast: Duration::from_secs(30),
            summary: Duration::from_secs(30),
        }
    }
}

/// Collaborators shared by every form session
#[derive(Clone)]
pub struct FormDependencies {
    /// Loaded record store
    pub records: Arc<dyn RecordStorePort>,
    /// Forecast service
    pub forecast: Arc<dyn ForecastPort>,
    /// Summarization service
    pub summarizer: Arc<dyn SummarizationPort>,
    /// Submission timeouts
    pub timeouts: SubmitTimeouts,
}

impl fmt::Debug for FormDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDependencies")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

/// State of a single form session
///
/// Every mutating operation takes `&mut self`, so operations on one session
/// are serialized by construction.
pub struct FormController {
    deps: FormDependencies,
    state: SessionState,
    fields: Option<FieldSet>,
    last_outcome: Option<SubmissionOutcome>,
    last_error: Option<String>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("state", &self.state)
            .field("date", &self.selected_date())
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Create an idle session
    pub const fn new(deps: FormDependencies) -> Self {
        Self {
            deps,
            state: SessionState::Idle,
            fields: None,
            last_outcome: None,
            last_error: None,
        }
    }

    /// Current session state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Current field set, if a date has been selected
    pub const fn fields(&self) -> Option<&FieldSet> {
        self.fields.as_ref()
    }

    /// Date of the current field set
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.fields.as_ref().map(FieldSet::date)
    }

    /// Result of the last successful submission since the date was selected
    pub const fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Message of the last failed submission since the date was selected
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Select a date and populate every field from its record
    ///
    /// On failure the session is left exactly as it was.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn select_date(&mut self, date: NaiveDate) -> Result<&FieldSet, ApplicationError> {
        let record = self.deps.records.lookup(date)?;

        let fields = FieldSet::from_record(&record);
        let warnings = fields.warnings();
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "Record contains values that fail strict parsing");
        }

        self.state = SessionState::DateSelected;
        self.last_outcome = None;
        self.last_error = None;
        debug!(%date, "Date selected");
        Ok(&*self.fields.insert(fields))
    }

    /// Overwrite one field by name
    ///
    /// Only the field's existence is checked. Text that fails strict parsing
    /// is stored and reported as a warning.
    pub fn edit_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<ValidationWarning>, ApplicationError> {
        let field: ObservationField = name.parse()?;
        self.edit(field, value)
    }

    /// Overwrite one field
    pub fn edit(
        &mut self,
        field: ObservationField,
        value: impl Into<String>,
    ) -> Result<Option<ValidationWarning>, ApplicationError> {
        let fields = self.fields.as_mut().ok_or_else(|| {
            ApplicationError::InvalidOperation("select a date before editing fields".into())
        })?;

        let warning = fields.set(field, value);
        if let Some(w) = &warning {
            debug!(warning = %w, "Field edited with non-conforming text");
        }
        self.state = SessionState::FieldsEdited;
        Ok(warning)
    }

    /// Send the current fields to the forecast service, then summarize
    ///
    /// The summarization service is only called after a successful forecast.
    /// A failure leaves the field set untouched.
    #[instrument(skip(self), fields(date = ?self.selected_date()))]
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, ApplicationError> {
        let request = self
            .fields
            .as_ref()
            .map(ForecastRequest::from_field_set)
            .ok_or_else(|| {
                ApplicationError::InvalidOperation("select a date before submitting".into())
            })?;

        self.state = SessionState::Submitting;
        let result = Self::run_submission(&self.deps, &request).await;

        match &result {
            Ok(outcome) => {
                info!(
                    predicted_max = outcome.prediction.predicted_max,
                    predicted_min = outcome.prediction.predicted_min,
                    "Submission completed"
                );
                self.state = SessionState::ResultsReady;
                self.last_outcome = Some(outcome.clone());
                self.last_error = None;
            },
            Err(e) => {
                warn!(error = %e, "Submission failed");
                self.state = SessionState::SubmissionFailed;
                self.last_outcome = None;
                self.last_error = Some(e.to_string());
            },
        }

        result
    }

    /// Discard the field set and return to `Idle`
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.fields = None;
        self.last_outcome = None;
        self.last_error = None;
    }

    async fn run_submission(
        deps: &FormDependencies,
        request: &ForecastRequest,
    ) -> Result<SubmissionOutcome, ApplicationError> {
        let prediction = with_timeout(
            deps.timeouts.forecast,
            deps.forecast.forecast(request),
            "forecast",
        )
        .await
        .map_err(into_forecast_error)?;

        let prompt = build_summary_prompt(&prediction);

        let text = with_timeout(
            deps.timeouts.summary,
            deps.summarizer.summarize(&prompt),
            "summary",
        )
        .await
        .map_err(into_summary_error)?;

        Ok(SubmissionOutcome {
            prediction,
            summary: Summary { text, prompt },
        })
    }
}

async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ApplicationError>>,
    what: &str,
) -> Result<T, ApplicationError> {
    tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
        Err(ApplicationError::Internal(format!(
            "{what} call timed out after {}ms",
            limit.as_millis()
        )))
    })
}

fn into_forecast_error(err: ApplicationError) -> ApplicationError {
    match err {
        ApplicationError::Forecast(_) => err,
        other => ApplicationError::Forecast(other.to_string()),
    }
}

fn into_summary_error(err: ApplicationError) -> ApplicationError {
    match err {
        ApplicationError::Summary(_) => err,
        other => ApplicationError::Summary(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use domain::{PredictionResult, WeatherRecord};

    use super::*;
    use crate::ports::{LookupError, MockForecastPort, MockRecordStorePort, MockSummarizationPort};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_for(date: NaiveDate) -> WeatherRecord {
        WeatherRecord::from_fn(date, |f| match f {
            ObservationField::Sunrise => "06:45:10".to_string(),
            ObservationField::Sunset => "19:02:33".to_string(),
            other => format!("{}.{}", other.index() + 10, date.format("%d")),
        })
    }

    fn store_covering(first: NaiveDate, last: NaiveDate) -> MockRecordStorePort {
        let mut store = MockRecordStorePort::new();
        store.expect_lookup().returning(move |d| {
            if d >= first && d <= last {
                Ok(record_for(d))
            } else {
                Err(LookupError::NotFound(d))
            }
        });
        store
    }

    fn controller(
        store: MockRecordStorePort,
        forecast: MockForecastPort,
        summarizer: MockSummarizationPort,
    ) -> FormController {
        FormController::new(FormDependencies {
            records: Arc::new(store),
            forecast: Arc::new(forecast),
            summarizer: Arc::new(summarizer),
            timeouts: SubmitTimeouts::default(),
        })
    }

    fn default_store() -> MockRecordStorePort {
        store_covering(date(2023, 2, 5), date(2023, 7, 22))
    }

    #[test]
    fn new_controller_is_idle() {
        let c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        assert_eq!(c.state(), SessionState::Idle);
        assert!(c.fields().is_none());
        let debug = format!("{c:?}");
        assert!(debug.contains("FormController"));
    }

    #[test]
    fn select_date_copies_record_verbatim() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        let d = date(2023, 3, 9);
        let expected = record_for(d);

        let fields = c.select_date(d).unwrap().clone();
        for (field, text) in expected.iter() {
            assert_eq!(fields.get(field).raw(), text);
        }
        assert_eq!(c.state(), SessionState::DateSelected);
        assert_eq!(c.selected_date(), Some(d));
    }

    #[test]
    fn select_date_outside_range_is_selection_error() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        let err = c.select_date(date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, ApplicationError::Selection { .. }));
        assert!(c.fields().is_none());
        assert_eq!(c.state(), SessionState::Idle);
    }

    #[test]
    fn failed_selection_keeps_previous_fields() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        c.select_date(date(2023, 4, 1)).unwrap();
        c.edit(ObservationField::Dew, "1.0").unwrap();
        let before = c.fields().cloned();

        assert!(c.select_date(date(2022, 12, 31)).is_err());
        assert_eq!(c.fields().cloned(), before);
        assert_eq!(c.state(), SessionState::FieldsEdited);
    }

    #[test]
    fn duplicate_record_is_integrity_error() {
        let mut store = MockRecordStorePort::new();
        store
            .expect_lookup()
            .returning(|d| Err(LookupError::Duplicate { date: d, count: 2 }));
        let mut c = controller(store, MockForecastPort::new(), MockSummarizationPort::new());

        let err = c.select_date(date(2023, 5, 5)).unwrap_err();
        assert!(matches!(err, ApplicationError::Integrity { count: 2, .. }));
    }

    #[test]
    fn edit_before_select_is_rejected() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        let err = c.edit_field("dew", "3").unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidOperation(_)));
    }

    #[test]
    fn edit_unknown_field_is_rejected() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        c.select_date(date(2023, 2, 5)).unwrap();
        let err = c.edit_field("temperature", "3").unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[test]
    fn edit_field_is_idempotent() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        c.select_date(date(2023, 2, 5)).unwrap();
        c.edit_field("Wind Speed", "14.2").unwrap();
        let once = c.fields().cloned();
        c.edit_field("Wind Speed", "14.2").unwrap();
        assert_eq!(c.fields().cloned(), once);
        assert_eq!(c.state(), SessionState::FieldsEdited);
    }

    #[test]
    fn edit_with_free_text_warns() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        c.select_date(date(2023, 2, 5)).unwrap();
        let warning = c.edit_field("sunrise", "dawn").unwrap();
        assert_eq!(warning.unwrap().field, ObservationField::Sunrise);
        assert_eq!(
            c.fields().unwrap().get(ObservationField::Sunrise).raw(),
            "dawn"
        );
    }

    #[tokio::test]
    async fn submit_forwards_fields_and_summarizes() {
        let mut forecast = MockForecastPort::new();
        forecast
            .expect_forecast()
            .withf(|req| req.feature(ObservationField::Dew) == Some("99"))
            .times(1)
            .returning(|_| Ok(PredictionResult::predicted(101.0, -12.0).with_actuals(99.0, -8.0)));

        let mut summarizer = MockSummarizationPort::new();
        summarizer
            .expect_summarize()
            .withf(|prompt| {
                prompt.contains("101.00")
                    && prompt.contains("-12.00")
                    && prompt.contains("extreme")
                    && prompt.contains("extremely hot")
            })
            .times(1)
            .returning(|_| Ok("Brutal extremes ahead.".to_string()));

        let mut c = controller(default_store(), forecast, summarizer);
        c.select_date(date(2023, 7, 1)).unwrap();
        c.edit_field("dew", "99").unwrap();

        let outcome = c.submit().await.unwrap();
        assert!((outcome.prediction.predicted_max - 101.0).abs() < f64::EPSILON);
        assert_eq!(outcome.prediction.actual_min, Some(-8.0));
        assert_eq!(outcome.summary.text, "Brutal extremes ahead.");
        assert_eq!(c.state(), SessionState::ResultsReady);
        assert_eq!(c.last_outcome(), Some(&outcome));
    }

    #[tokio::test]
    async fn forecast_failure_skips_summarization() {
        let mut forecast = MockForecastPort::new();
        forecast.expect_forecast().returning(|_| {
            Err(ApplicationError::Forecast("connection refused".to_string()))
        });
        let mut summarizer = MockSummarizationPort::new();
        summarizer.expect_summarize().never();

        let mut c = controller(default_store(), forecast, summarizer);
        c.select_date(date(2023, 2, 5)).unwrap();
        let before = c.fields().cloned();

        let err = c.submit().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Forecast(_)));
        assert_eq!(c.state(), SessionState::SubmissionFailed);
        assert_eq!(c.fields().cloned(), before);
        assert!(c.last_error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn non_forecast_errors_from_forecast_port_become_forecast_errors() {
        let mut forecast = MockForecastPort::new();
        forecast
            .expect_forecast()
            .returning(|_| Err(ApplicationError::Internal("bad payload".to_string())));
        let mut summarizer = MockSummarizationPort::new();
        summarizer.expect_summarize().never();

        let mut c = controller(default_store(), forecast, summarizer);
        c.select_date(date(2023, 2, 5)).unwrap();
        let err = c.submit().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Forecast(msg) if msg.contains("bad payload")));
    }

    #[tokio::test]
    async fn summary_failure_is_summary_error_and_keeps_fields() {
        let mut forecast = MockForecastPort::new();
        forecast
            .expect_forecast()
            .returning(|_| Ok(PredictionResult::predicted(70.0, 50.0)));
        let mut summarizer = MockSummarizationPort::new();
        summarizer
            .expect_summarize()
            .times(1)
            .returning(|_| Err(ApplicationError::Internal("HTTP 500".to_string())));

        let mut c = controller(default_store(), forecast, summarizer);
        c.select_date(date(2023, 2, 5)).unwrap();
        c.edit_field("humidity", "55").unwrap();
        let before = c.fields().cloned();

        let err = c.submit().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Summary(_)));
        assert_eq!(c.fields().cloned(), before);
        assert!(c.last_outcome().is_none());
    }

    #[tokio::test]
    async fn submit_without_date_is_rejected() {
        let mut forecast = MockForecastPort::new();
        forecast.expect_forecast().never();
        let mut c = controller(default_store(), forecast, MockSummarizationPort::new());
        let err = c.submit().await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidOperation(_)));
        assert_eq!(c.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn new_selection_after_results_discards_them() {
        let mut forecast = MockForecastPort::new();
        forecast
            .expect_forecast()
            .returning(|_| Ok(PredictionResult::predicted(70.0, 50.0)));
        let mut summarizer = MockSummarizationPort::new();
        summarizer
            .expect_summarize()
            .returning(|_| Ok("Mild.".to_string()));

        let mut c = controller(default_store(), forecast, summarizer);
        c.select_date(date(2023, 2, 5)).unwrap();
        c.edit_field("dew", "0").unwrap();
        c.submit().await.unwrap();

        c.select_date(date(2023, 2, 6)).unwrap();
        assert_eq!(c.state(), SessionState::DateSelected);
        assert!(c.last_outcome().is_none());
        assert_eq!(
            c.fields().unwrap().get(ObservationField::Dew).raw(),
            record_for(date(2023, 2, 6)).get(ObservationField::Dew)
        );
    }

    #[tokio::test]
    async fn slow_forecast_times_out_as_forecast_error() {
        struct SlowForecast;

        #[async_trait::async_trait]
        impl ForecastPort for SlowForecast {
            async fn forecast(
                &self,
                _request: &ForecastRequest,
            ) -> Result<PredictionResult, ApplicationError> {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(PredictionResult::predicted(0.0, 0.0))
            }

            async fn is_available(&self) -> bool {
                true
            }
        }

        let mut summarizer = MockSummarizationPort::new();
        summarizer.expect_summarize().never();

        let mut c = FormController::new(FormDependencies {
            records: Arc::new(default_store()),
            forecast: Arc::new(SlowForecast),
            summarizer: Arc::new(summarizer),
            timeouts: SubmitTimeouts {
                forecast: Duration::from_millis(20),
                summary: Duration::from_millis(20),
            },
        });
        c.select_date(date(2023, 2, 5)).unwrap();
        let err = c.submit().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Forecast(msg) if msg.contains("timed out")));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut c = controller(
            default_store(),
            MockForecastPort::new(),
            MockSummarizationPort::new(),
        );
        c.select_date(date(2023, 2, 5)).unwrap();
        c.reset();
        assert_eq!(c.state(), SessionState::Idle);
        assert!(c.fields().is_none());
    }
}
