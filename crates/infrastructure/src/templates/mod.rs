//! Template engine module for rendering the weather form page
//!
//! Uses Tera with the page template embedded at compile time. HTML output is
//! auto-escaped, so field text is rendered exactly as entered.

use std::{collections::HashMap, sync::Arc};

use domain::{FieldSet, FieldValue, ObservationField, PredictionResult, SessionState, SubmissionOutcome};
use serde::Serialize;
use tera::{Context, Tera, Value};
use thiserror::Error;

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// One input of the form
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    /// Input name (source column name)
    pub name: &'static str,
    /// Visible label
    pub label: &'static str,
    /// Current text
    pub value: String,
    /// Strict-parse warning for the current text
    pub warning: Option<String>,
}

/// Temperatures shown read-only under the form
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureView {
    /// Predicted maximum, two decimals
    pub predicted_max: String,
    /// Predicted minimum, two decimals
    pub predicted_min: String,
    /// Observed maximum, if known
    pub actual_max: Option<String>,
    /// Observed minimum, if known
    pub actual_min: Option<String>,
}

impl From<&PredictionResult> for TemperatureView {
    fn from(p: &PredictionResult) -> Self {
        let fmt = |v: f64| format!("{v:.2}");
        Self {
            predicted_max: fmt(p.rounded_max()),
            predicted_min: fmt(p.rounded_min()),
            actual_max: p.actual_max.map(fmt),
            actual_min: p.actual_min.map(fmt),
        }
    }
}

/// Everything the form page shows
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormPageData {
    /// First selectable date
    pub min_date: Option<String>,
    /// Last selectable date
    pub max_date: Option<String>,
    /// Currently selected date
    pub selected_date: Option<String>,
    /// Session state name
    pub state: String,
    /// Inputs grouped by form row
    pub rows: Vec<Vec<FieldView>>,
    /// Forecast numbers after a successful submit
    pub temperatures: Option<TemperatureView>,
    /// Generated summary after a successful submit
    pub summary: Option<String>,
    /// Error message of the last failed operation
    pub error: Option<String>,
}

impl FormPageData {
    /// Page for the given selectable range with nothing selected
    #[must_use]
    pub fn new(range: Option<(chrono::NaiveDate, chrono::NaiveDate)>) -> Self {
        Self {
            min_date: range.map(|(first, _)| first.to_string()),
            max_date: range.map(|(_, last)| last.to_string()),
            state: SessionState::Idle.to_string(),
            rows: Self::build_rows(None),
            ..Default::default()
        }
    }

    /// Show a field set
    #[must_use]
    pub fn with_fields(mut self, fields: &FieldSet, state: SessionState) -> Self {
        self.selected_date = Some(fields.date().to_string());
        self.state = state.to_string();
        self.rows = Self::build_rows(Some(fields));
        self
    }

    /// Show a submission outcome
    #[must_use]
    pub fn with_outcome(mut self, outcome: &SubmissionOutcome) -> Self {
        self.temperatures = Some(TemperatureView::from(&outcome.prediction));
        self.summary = Some(outcome.summary.text.clone());
        self
    }

    /// Show an error message
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    fn build_rows(fields: Option<&FieldSet>) -> Vec<Vec<FieldView>> {
        FORM_LAYOUT
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&field| {
                        let value = fields.map(|f| f.get(field));
                        FieldView {
                            name: field.wire_name(),
                            label: field.label(),
                            value: value.map(|v| v.raw().to_string()).unwrap_or_default(),
                            warning: value.and_then(FieldValue::warning).map(str::to_string),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Input order of the three form rows
const FORM_LAYOUT: [&[ObservationField]; 3] = [
    &[
        ObservationField::Dew,
        ObservationField::Humidity,
        ObservationField::CloudCover,
        ObservationField::PrecipCover,
        ObservationField::SeaLevelPressure,
    ],
    &[
        ObservationField::Sunrise,
        ObservationField::Sunset,
        ObservationField::UvIndex,
        ObservationField::SolarEnergy,
        ObservationField::SolarRadiation,
    ],
    &[
        ObservationField::Visibility,
        ObservationField::WindDir,
        ObservationField::WindGust,
        ObservationField::WindSpeed,
    ],
];

/// Embedded templates - compiled into the binary
mod embedded {
    pub const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Weather Forecast</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 2rem; }
        .row { display: flex; gap: 1rem; margin-bottom: 1rem; }
        .field { display: flex; flex-direction: column; flex: 1; }
        .warning { color: #b36b00; font-size: 0.8rem; }
        .error { color: #b00020; }
        .results input { background: #f3f3f3; }
    </style>
</head>
<body>
    <h1>Weather Forecast</h1>
    {% if error %}<p class="error">{{ error }}</p>{% endif %}
    <form method="get" action="/">
        <label for="date">Select a date</label>
        <input type="date" id="date" name="date"{% if min_date %} min="{{ min_date }}"{% endif %}{% if max_date %} max="{{ max_date }}"{% endif %}{% if selected_date %} value="{{ selected_date }}"{% endif %}>
        <button type="submit">Load</button>
    </form>
    <form method="post" action="/">
        {% if selected_date %}<input type="hidden" name="date" value="{{ selected_date }}">{% endif %}
        {% for row in rows %}
        <div class="row">
            {% for field in row %}
            <div class="field">
                <label for="{{ field.name }}">{{ field.label }}</label>
                <input type="text" id="{{ field.name }}" name="{{ field.name }}" value="{{ field.value }}">
                {% if field.warning %}<span class="warning">{{ field.warning }}</span>{% endif %}
            </div>
            {% endfor %}
        </div>
        {% endfor %}
        <button type="submit"{% if not selected_date %} disabled{% endif %}>Submit</button>
    </form>
    <div class="results">
        <div class="row">
            <div class="field"><label>Actual Max Temperature</label><input readonly value="{% if temperatures and temperatures.actual_max %}{{ temperatures.actual_max }}{% endif %}"></div>
            <div class="field"><label>Actual Min Temperature</label><input readonly value="{% if temperatures and temperatures.actual_min %}{{ temperatures.actual_min }}{% endif %}"></div>
        </div>
        <div class="row">
            <div class="field"><label>Predicted Max Temperature</label><input readonly value="{% if temperatures %}{{ temperatures.predicted_max }}{% endif %}"></div>
            <div class="field"><label>Predicted Min Temperature</label><input readonly value="{% if temperatures %}{{ temperatures.predicted_min }}{% endif %}"></div>
        </div>
        {% if summary %}<h2>Summary</h2><p>{{ summary | linebreaksbr | safe }}</p>{% endif %}
    </div>
</body>
</html>
"#;
}

/// Name of the embedded form page template
pub const FORM_PAGE: &str = "form/page.html";

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

impl TemplateEngine {
    /// Create the engine with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_template(FORM_PAGE, embedded::FORM_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        tera.register_filter("linebreaksbr", linebreaksbr_filter);

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render the form page
    pub fn render_form_page(&self, data: &FormPageData) -> Result<String, TemplateError> {
        let context = Context::from_serialize(data)?;
        self.tera
            .render(FORM_PAGE, &context)
            .map_err(TemplateError::from)
    }
}

/// Escape HTML, then turn newlines into `<br>`
fn linebreaksbr_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("linebreaksbr", "value", String, value);
    let escaped = tera::escape_html(&s);
    Ok(Value::String(
        escaped.replace("\r\n", "<br>").replace('\n', "<br>"),
    ))
}
