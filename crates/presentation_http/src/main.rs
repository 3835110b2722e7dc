//! WeatherDesk HTTP Server
//!
//! Main entry point for the form page and session API.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{FormDependencies, SessionRegistry};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use infrastructure::{
    AppConfig, CsvRecordStore, Environment, ForecastAdapter, SummarizationAdapter,
    TemplateEngine, init_telemetry,
};
use presentation_http::{
    error::set_expose_internal_errors, middleware, routes, server, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// How often idle sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _telemetry = init_telemetry(&config.telemetry)?;

    info!("WeatherDesk v{} starting...", env!("CARGO_PKG_VERSION"));
    for warning in config.warnings() {
        warn!("{warning}");
    }
    set_expose_internal_errors(config.environment == Environment::Development);

    let records = CsvRecordStore::open(&config.records.csv_path).with_context(|| {
        format!(
            "Failed to load weather records from {}",
            config.records.csv_path.display()
        )
    })?;

    let forecast = ForecastAdapter::with_config(config.forecast.to_forecast_config())?;
    let summarizer = SummarizationAdapter::with_config(config.summarization.to_textgen_config())?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model_url = %config.forecast.model_url,
        warehouse = config.forecast.warehouse_url.is_some(),
        summarization_url = %config.summarization.base_url,
        "Configuration loaded"
    );

    let deps = FormDependencies {
        records: Arc::new(records),
        forecast: Arc::new(forecast),
        summarizer: Arc::new(summarizer),
        timeouts: config.submit_timeouts(),
    };
    let sessions = Arc::new(SessionRegistry::new(
        deps,
        config.sessions.to_registry_config(),
    ));
    spawn_session_sweeper(Arc::clone(&sessions));

    let state = AppState {
        sessions,
        templates: Arc::new(TemplateEngine::new()?),
        config: Arc::new(config.clone()),
    };

    let app = routes::create_router(state);

    let app = if config.server.cors_enabled {
        app.layer(cors_layer(&config.server.allowed_origins))
    } else {
        app
    };

    // Outermost layers are added last
    let app = app
        .layer(DefaultBodyLimit::max(config.server.max_body_size_json_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    server::serve(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("Server shutdown complete");

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    }
}

fn spawn_session_sweeper(sessions: Arc<SessionRegistry>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            sessions.evict_expired();
        }
    });
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
