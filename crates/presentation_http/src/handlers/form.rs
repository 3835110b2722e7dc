//! HTML form page
//!
//! The page is stateless on the server: the POST carries the selected date
//! and every input, so each request replays them on a fresh controller.

use std::collections::HashMap;

use application::{ApplicationError, FormController, parse_date};
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use domain::ObservationField;
use infrastructure::FormPageData;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Query of the date selector
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Render the form, optionally populated for a date
#[instrument(skip(state))]
pub async fn show_form(State(state): State<AppState>, Query(query): Query<DateQuery>) -> Response {
    let page = FormPageData::new(state.records().covered_range());
    let mut controller = state.transient_controller();

    let date = query.date.as_deref().map(str::trim).filter(|d| !d.is_empty());
    let (status, page) = match date {
        None => (StatusCode::OK, page),
        Some(raw) => match select(&mut controller, raw) {
            Ok(()) => (StatusCode::OK, populated(page, &controller)),
            Err(err) => failed(page, &controller, &err),
        },
    };

    render(&state, status, &page)
}

/// Apply the posted inputs and submit them
#[instrument(skip(state, form))]
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let page = FormPageData::new(state.records().covered_range());
    let mut controller = state.transient_controller();

    let Some(raw_date) = form.get("date").map(String::as_str) else {
        let err = ApiError::bad_request("Select a date before submitting");
        return render(&state, err.status(), &page.with_error(err.public_message()));
    };

    if let Err(err) = select(&mut controller, raw_date) {
        let (status, page) = failed(page, &controller, &err);
        return render(&state, status, &page);
    }

    for field in ObservationField::ALL {
        if let Some(value) = form.get(field.wire_name()) {
            if let Err(e) = controller.edit(field, value.as_str()) {
                warn!(field = field.wire_name(), error = %e, "Form edit rejected");
            }
        }
    }

    let (status, page) = match controller.submit().await {
        Ok(outcome) => {
            debug!("Form submission completed");
            (
                StatusCode::OK,
                populated(page, &controller).with_outcome(&outcome),
            )
        },
        Err(err) => failed(page, &controller, &ApiError::from(err)),
    };

    render(&state, status, &page)
}

fn select(controller: &mut FormController, raw: &str) -> Result<(), ApiError> {
    let date = parse_date(raw).map_err(ApplicationError::from)?;
    controller.select_date(date)?;
    Ok(())
}

fn populated(page: FormPageData, controller: &FormController) -> FormPageData {
    match controller.fields() {
        Some(fields) => page.with_fields(fields, controller.state()),
        None => page,
    }
}

fn failed(
    page: FormPageData,
    controller: &FormController,
    err: &ApiError,
) -> (StatusCode, FormPageData) {
    (
        err.status(),
        populated(page, controller).with_error(err.public_message()),
    )
}

fn render(state: &AppState, status: StatusCode, page: &FormPageData) -> Response {
    match state.templates.render_form_page(page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => ApiError::Internal {
            code: "template_error",
            message: e.to_string(),
        }
        .into_response(),
    }
}
