//! Form session API
//!
//! Each session wraps one form controller. A request that arrives while
//! another request on the same session is still running gets 409.

use application::{ApplicationError, SessionGuard, parse_date};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{
    FieldSet, PredictionResult, SessionId, SessionState, SubmissionOutcome, ValidationWarning,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// One field as shown to the client
#[derive(Debug, Serialize)]
pub struct FieldEntry {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Snapshot of a session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: SessionId,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub fields: Vec<FieldEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionView {
    fn from_guard(id: SessionId, guard: &SessionGuard) -> Self {
        let outcome = guard.last_outcome();
        Self {
            id,
            state: guard.state(),
            date: guard.selected_date().map(|d| d.to_string()),
            fields: guard.fields().map(field_entries).unwrap_or_default(),
            prediction: outcome.map(|o| o.prediction),
            summary: outcome.map(|o| o.summary.text.clone()),
            error: guard.last_error().map(str::to_string),
        }
    }
}

fn field_entries(fields: &FieldSet) -> Vec<FieldEntry> {
    fields
        .iter()
        .map(|(field, value)| FieldEntry {
            name: field.wire_name(),
            label: field.label(),
            value: value.raw().to_string(),
            warning: value.warning().map(str::to_string),
        })
        .collect()
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(raw).map_err(|_| ApiError::bad_request(format!("Invalid session id: {raw}")))
}

fn acquire(state: &AppState, raw: &str) -> Result<(SessionId, SessionGuard), ApiError> {
    let id = parse_session_id(raw)?;
    let guard = state.sessions.acquire(id)?;
    Ok((id, guard))
}

/// Created session
#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub id: SessionId,
    pub state: SessionState,
}

/// Start a new idle session
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedSession>), ApiError> {
    let id = state.sessions.create()?;
    info!(session_id = %id, "Session started");
    Ok((
        StatusCode::CREATED,
        Json(CreatedSession {
            id,
            state: SessionState::Idle,
        }),
    ))
}

/// Current state of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let (id, guard) = acquire(&state, &id)?;
    Ok(Json(SessionView::from_guard(id, &guard)))
}

/// Drop a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApplicationError::NotFound(format!("Session {id}")).into())
    }
}

/// Body of a date selection
#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: String,
}

/// Select a date and populate the fields from its record
#[instrument(skip(state, body), fields(date = %body.date))]
pub async fn select_date(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SelectDateRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let (id, mut guard) = acquire(&state, &id)?;
    let date = parse_date(&body.date).map_err(ApplicationError::from)?;
    guard.select_date(date)?;
    Ok(Json(SessionView::from_guard(id, &guard)))
}

/// Body of a field edit
#[derive(Debug, Deserialize)]
pub struct EditFieldRequest {
    pub value: String,
}

/// Result of a field edit
#[derive(Debug, Serialize)]
pub struct EditFieldResponse {
    pub field: &'static str,
    pub value: String,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ValidationWarning>,
}

/// Overwrite one field
pub async fn edit_field(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
    Json(body): Json<EditFieldRequest>,
) -> Result<Json<EditFieldResponse>, ApiError> {
    let (_, mut guard) = acquire(&state, &id)?;
    let field: domain::ObservationField = name.parse().map_err(ApplicationError::from)?;
    let warning = guard.edit(field, body.value.clone())?;
    Ok(Json(EditFieldResponse {
        field: field.wire_name(),
        value: body.value,
        state: guard.state(),
        warning,
    }))
}

/// Result of a successful submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub state: SessionState,
    pub prediction: PredictionResult,
    pub summary: String,
    pub prompt: String,
}

impl SubmitResponse {
    fn new(state: SessionState, outcome: SubmissionOutcome) -> Self {
        Self {
            state,
            prediction: outcome.prediction,
            summary: outcome.summary.text,
            prompt: outcome.summary.prompt,
        }
    }
}

/// Forecast the current fields and summarize the result
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let (_, mut guard) = acquire(&state, &id)?;
    let outcome = guard.submit().await?;
    Ok(Json(SubmitResponse::new(guard.state(), outcome)))
}
