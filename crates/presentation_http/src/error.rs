//! API error handling
//!
//! Every failure leaves the server as `{"error", "code", "details"}` JSON.
//! In production mode internal errors return a generic message and no details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Not found: {message}")]
    NotFound { code: &'static str, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream service failed: {message}")]
    BadGateway { code: &'static str, message: String },

    #[error("Internal error: {message}")]
    Internal { code: &'static str, message: String },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Request that could not be understood
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "bad_request",
            message: message.into(),
        }
    }

    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { code, .. }
            | Self::NotFound { code, .. }
            | Self::BadGateway { code, .. }
            | Self::Internal { code, .. } => *code,
            Self::Conflict(_) => "session_busy",
        }
    }

    /// Message safe to show to the user
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::BadGateway { message, .. }
            | Self::Conflict(message) => message.clone(),
            Self::Internal { .. } => "An internal error occurred".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Internal { message, .. } if should_expose_details() => Some(message.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal { .. }) {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.public_message(),
            code: self.code().to_string(),
            details: self.details(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            ApplicationError::Selection { .. } | ApplicationError::NotFound(_) => {
                Self::NotFound { code, message }
            },
            ApplicationError::Domain(_) | ApplicationError::InvalidOperation(_) => {
                Self::BadRequest { code, message }
            },
            ApplicationError::SessionBusy(_) => Self::Conflict(message),
            ApplicationError::Forecast(_) | ApplicationError::Summary(_) => {
                Self::BadGateway { code, message }
            },
            ApplicationError::Load(_)
            | ApplicationError::Integrity { .. }
            | ApplicationError::Configuration(_)
            | ApplicationError::Internal(_) => Self::Internal { code, message },
        }
    }
}
