//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub records: RecordsStatus,
    pub forecast: ServiceStatus,
    pub summarization: ServiceStatus,
}

/// Loaded record source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsStatus {
    pub dates: usize,
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Status of an external service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
}

/// Readiness check - records loaded and both services reachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let records = state.records();
    let range = records.covered_range();
    let deps = state.sessions.dependencies();

    let (forecast_healthy, summary_healthy) =
        tokio::join!(deps.forecast.is_available(), deps.summarizer.is_available());

    let ready = range.is_some() && forecast_healthy && summary_healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            records: RecordsStatus {
                dates: records.date_count(),
                first: range.map(|(first, _)| first.to_string()),
                last: range.map(|(_, last)| last.to_string()),
            },
            forecast: ServiceStatus {
                healthy: forecast_healthy,
            },
            summarization: ServiceStatus {
                healthy: summary_healthy,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_version() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn readiness_response_serialization() {
        let resp = ReadinessResponse {
            ready: false,
            records: RecordsStatus {
                dates: 0,
                first: None,
                last: None,
            },
            forecast: ServiceStatus { healthy: true },
            summarization: ServiceStatus { healthy: false },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["records"]["dates"], 0);
        assert_eq!(json["summarization"]["healthy"], false);
    }
}
