//! WeatherDesk CLI
//!
//! Inspect the record source and run forecasts from the terminal.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Context;
use application::{FormController, FormDependencies, RecordStorePort};
use clap::Parser;
use infrastructure::{
    AppConfig, CsvRecordStore, ForecastAdapter, SummarizationAdapter, TelemetryConfig,
    init_telemetry,
};
use presentation_cli::{Cli, Commands, endpoint_url, log_filter_from_verbosity, output};
use tracing::debug;

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn open_records(config: &AppConfig) -> anyhow::Result<CsvRecordStore> {
    CsvRecordStore::open(&config.records.csv_path).with_context(|| {
        format!(
            "Failed to load weather records from {}",
            config.records.csv_path.display()
        )
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _telemetry = init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        ..TelemetryConfig::default()
    })?;

    match &cli.command {
        Commands::Dates { all } => {
            let config = load_config(&cli)?;
            let records = open_records(&config)?;
            println!("{}", output::format_dates(&records.covered_dates(), *all));
        },

        Commands::Lookup { date, json } => {
            let config = load_config(&cli)?;
            let records = open_records(&config)?;
            let record = records
                .lookup(*date)
                .map_err(application::ApplicationError::from)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let fields = domain::FieldSet::from_record(&record);
                print!("{}", output::format_fields(&fields));
            }
        },

        Commands::Submit { date, set } => {
            let config = load_config(&cli)?;
            let records = open_records(&config)?;

            let deps = FormDependencies {
                records: Arc::new(records),
                forecast: Arc::new(ForecastAdapter::with_config(
                    config.forecast.to_forecast_config(),
                )?),
                summarizer: Arc::new(SummarizationAdapter::with_config(
                    config.summarization.to_textgen_config(),
                )?),
                timeouts: config.submit_timeouts(),
            };

            let mut controller = FormController::new(deps);
            controller.select_date(*date)?;
            for assignment in set {
                if let Some(warning) = controller.edit_field(&assignment.name, &*assignment.value)? {
                    println!("⚠️  {warning}");
                }
            }
            debug!(state = %controller.state(), "Submitting");

            if let Some(fields) = controller.fields() {
                println!("{}", output::format_fields(fields));
            }
            let outcome = controller.submit().await?;
            println!("{}", output::format_outcome(&outcome));
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(url, "/ready")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                    std::process::exit(0);
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
