//! CLI entry point for the airport flight-schedule summariser.
//!
//! `report` fetches one day of flights and prints the summary as JSON;
//! `health` prints a liveness body.

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use flight_stats::analyzers::analyzer::run_request;
use flight_stats::config::AppConfig;
use flight_stats::error::{ErrorResponse, HealthResponse};
use flight_stats::infra::{AirportApiClient, LocalSource};
use flight_stats::output::{print_pretty, print_summary, write_json};
use flight_stats::query::RawParams;
use flight_stats::services::FlightSource;
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "flight_stats")]
#[command(about = "Summarise an airport's daily flight schedule", long_about = None)]
struct Cli {
    /// Optional JSON config file (also read from FLIGHTS_CONFIG)
    #[arg(long, global = true, env = "FLIGHTS_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch flights for one day and print the summary report
    Report {
        /// today, yesterday, tomorrow or day_after_tomorrow
        #[arg(long, default_value = "today")]
        date: String,

        /// domestic or international
        #[arg(long = "flight-type", default_value = "domestic")]
        flight_type: String,

        /// arrival or departure
        #[arg(long = "flight-direction")]
        flight_direction: Option<String>,

        /// Read a saved payload from a file or URL instead of the schedule API
        #[arg(long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Acquisition timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print a liveness body
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/flight_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("flight_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            date,
            flight_type,
            flight_direction,
            source,
            timeout,
            pretty,
        } => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let timeout = timeout.map(Duration::from_secs).unwrap_or(config.timeout());

            let source: Box<dyn FlightSource> = match source {
                Some(location) => Box::new(LocalSource::new(location, timeout)),
                None => Box::new(AirportApiClient::from_config(&config)?),
            };
            info!(source = source.name(), timeout_secs = timeout.as_secs(), "Flight source ready");

            let params = RawParams {
                date,
                flight_type,
                flight_direction,
            };
            let today = Local::now().date_naive();

            match run_request(source.as_ref(), &params, today, timeout).await {
                Ok(report) => {
                    print_pretty(&report);
                    print_summary(&report);
                    write_json(std::io::stdout().lock(), &report, pretty)?;
                }
                Err(e) => {
                    let status = e.status_code();
                    error!(status, error = %e, "Flight request failed");
                    write_json(std::io::stdout().lock(), &ErrorResponse::from(&e), pretty)?;
                    return Ok(ExitCode::from(if status == 400 { 2 } else { 1 }));
                }
            }
        }
        Commands::Health => {
            write_json(std::io::stdout().lock(), &HealthResponse::ok(), false)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
