//! Integration tests for the forecast client using wiremock
//!
//! These tests run the client against a mock HTTP server covering the model
//! and warehouse endpoints and their failure modes.

use chrono::NaiveDate;
use integration_forecast::{
    ForecastClient, ForecastClientError, ForecastConfig, HttpForecastClient,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

fn instance() -> serde_json::Value {
    json!({
        "datetime": "2023-07-04",
        "dew": "61.2",
        "humidity": "54.9",
        "sunrise": "05:32:10"
    })
}

/// Create a test client pointed at the mock server
fn create_test_client(mock_server: &MockServer, warehouse: bool) -> HttpForecastClient {
    let config = ForecastConfig {
        model_url: format!("{}/v1/models/temperature:predict", mock_server.uri()),
        warehouse_url: warehouse.then(|| format!("{}/warehouse/daily", mock_server.uri())),
        api_key: None,
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    HttpForecastClient::new(config).expect("Failed to create client")
}

async fn setup_model_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/models/temperature:predict"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Model endpoint
// ============================================================================

#[tokio::test]
async fn test_predict_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/temperature:predict"))
        .and(body_partial_json(json!({
            "instances": [{"datetime": "2023-07-04", "dew": "61.2"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"tempmax": 88.4, "tempmin": 67.1}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, false);
    let pair = client.predict(&instance()).await.unwrap();

    assert!((pair.tempmax - 88.4).abs() < f64::EPSILON);
    assert!((pair.tempmin - 67.1).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_predict_accepts_string_and_nested_numbers() {
    let mock_server = MockServer::start().await;
    setup_model_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"tempmax": "101.0", "tempmin": {"value": -12}}]
        })),
    )
    .await;

    let client = create_test_client(&mock_server, false);
    let pair = client.predict(&instance()).await.unwrap();

    assert!((pair.tempmax - 101.0).abs() < f64::EPSILON);
    assert!((pair.tempmin + 12.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_predict_empty_predictions() {
    let mock_server = MockServer::start().await;
    setup_model_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({"predictions": []})),
    )
    .await;

    let client = create_test_client(&mock_server, false);
    let err = client.predict(&instance()).await.unwrap_err();
    assert!(matches!(err, ForecastClientError::EmptyPrediction));
}

#[tokio::test]
async fn test_predict_malformed_body() {
    let mock_server = MockServer::start().await;
    setup_model_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let client = create_test_client(&mock_server, false);
    let err = client.predict(&instance()).await.unwrap_err();
    assert!(matches!(err, ForecastClientError::ParseError(_)));
}

#[tokio::test]
async fn test_predict_server_error() {
    let mock_server = MockServer::start().await;
    setup_model_mock(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server, false);
    let err = client.predict(&instance()).await.unwrap_err();
    assert!(matches!(err, ForecastClientError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_predict_rate_limited() {
    let mock_server = MockServer::start().await;
    setup_model_mock(&mock_server, ResponseTemplate::new(429)).await;

    let client = create_test_client(&mock_server, false);
    let err = client.predict(&instance()).await.unwrap_err();
    assert!(matches!(err, ForecastClientError::RateLimitExceeded));
}

#[tokio::test]
async fn test_predict_client_error() {
    let mock_server = MockServer::start().await;
    setup_model_mock(&mock_server, ResponseTemplate::new(400)).await;

    let client = create_test_client(&mock_server, false);
    let err = client.predict(&instance()).await.unwrap_err();
    assert!(matches!(err, ForecastClientError::RequestFailed(_)));
}

#[tokio::test]
async fn test_predict_sends_bearer_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer model-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"tempmax": 70, "tempmin": 50}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ForecastConfig {
        model_url: format!("{}/predict", mock_server.uri()),
        api_key: Some("model-key".to_string()),
        timeout_secs: 5,
        ..Default::default()
    };
    let client = HttpForecastClient::new(config).unwrap();
    assert!(client.predict(&instance()).await.is_ok());
}

#[tokio::test]
async fn test_connection_refused() {
    let config = ForecastConfig {
        model_url: "http://127.0.0.1:1/predict".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let client = HttpForecastClient::new(config).unwrap();
    let err = client.predict(&instance()).await.unwrap_err();
    assert!(matches!(
        err,
        ForecastClientError::ConnectionFailed(_) | ForecastClientError::RequestFailed(_)
    ));
}

// ============================================================================
// Warehouse endpoint
// ============================================================================

#[tokio::test]
async fn test_observed_returns_first_row() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/warehouse/daily"))
        .and(query_param("date", "2023-07-04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [{"tempmax": "90.1", "tempmin": "68.0"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, true);
    let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
    let pair = client.observed(date).await.unwrap().unwrap();

    assert!((pair.tempmax - 90.1).abs() < f64::EPSILON);
    assert!((pair.tempmin - 68.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_observed_without_rows() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/warehouse/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, true);
    let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
    assert!(client.observed(date).await.unwrap().is_none());
}

#[tokio::test]
async fn test_observed_disabled_without_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, false);
    let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
    assert!(client.observed(date).await.unwrap().is_none());
}

#[tokio::test]
async fn test_observed_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/warehouse/daily"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, true);
    let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
    let err = client.observed(date).await.unwrap_err();
    assert!(matches!(err, ForecastClientError::ServiceUnavailable(_)));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_is_healthy() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, false);
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn test_is_unhealthy_on_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, false);
    assert!(!client.is_healthy().await);
}
