//! Read-only access to the record source

use application::{ApplicationError, parse_date};
use axum::{
    Json,
    extract::{Path, State},
};
use domain::WeatherRecord;
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Covered dates, ascending
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub count: usize,
    pub first: Option<String>,
    pub last: Option<String>,
    pub dates: Vec<String>,
}

/// List every date the record source covers
pub async fn list_dates(State(state): State<AppState>) -> Json<DatesResponse> {
    let dates = state.records().covered_dates();
    Json(DatesResponse {
        count: dates.len(),
        first: dates.first().map(ToString::to_string),
        last: dates.last().map(ToString::to_string),
        dates: dates.iter().map(ToString::to_string).collect(),
    })
}

/// Return one record with its values exactly as stored
#[instrument(skip(state))]
pub async fn get_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let date = parse_date(&date).map_err(ApplicationError::from)?;
    let record = state
        .records()
        .lookup(date)
        .map_err(ApplicationError::from)?;
    Ok(Json(record))
}
