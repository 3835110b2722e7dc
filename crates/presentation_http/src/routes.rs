//! Route definitions

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Form page
        .route(
            "/",
            get(handlers::form::show_form).post(handlers::form::submit_form),
        )
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Record source (v1)
        .route("/v1/dates", get(handlers::records::list_dates))
        .route("/v1/records/{date}", get(handlers::records::get_record))
        // Form sessions (v1)
        .route("/v1/sessions", post(handlers::sessions::create_session))
        .route(
            "/v1/sessions/{id}",
            get(handlers::sessions::get_session).delete(handlers::sessions::delete_session),
        )
        .route(
            "/v1/sessions/{id}/date",
            post(handlers::sessions::select_date),
        )
        .route(
            "/v1/sessions/{id}/fields/{name}",
            put(handlers::sessions::edit_field),
        )
        .route("/v1/sessions/{id}/submit", post(handlers::sessions::submit))
        // Attach state
        .with_state(state)
}
