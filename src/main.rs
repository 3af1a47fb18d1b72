//! Public health data services entry point.

use std::net::SocketAddr;

use axum::Router;
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use public_health_api::api::{create_dashboard_router, create_stats_router, DashboardState, StatsState};
use public_health_api::config::Config;
use public_health_api::dashboard::DashboardClient;
use public_health_api::dataset::HealthDataset;
use public_health_api::metrics;
use public_health_api::utils::shutdown_signal;

/// Public health statistics and City Health Dashboard services.
#[derive(Parser, Debug)]
#[command(name = "public-health-api")]
#[command(about = "HTTP services for exploring public health statistics")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve HTML views over the global health statistics CSV.
    Stats {
        /// HTTP server port (defaults to PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// CSV dataset path (defaults to HEALTH_STATS_CSV).
        #[arg(long)]
        csv: Option<String>,
    },

    /// Serve the City Health Dashboard proxy.
    Dashboard {
        /// HTTP server port (defaults to PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print an overview of the statistics dataset.
    Summary {
        /// CSV dataset path (defaults to HEALTH_STATS_CSV).
        #[arg(long)]
        csv: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();
    let config = Config::load();

    // Initialize logging
    let verbose = args.verbose || config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let filter = if verbose {
        EnvFilter::new("public_health_api=debug,tower_http=debug,info")
    } else {
        let directive = config
            .as_ref()
            .map(|c| c.rust_log.clone())
            .unwrap_or_else(|_| "info".to_string());
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Command::CheckConfig => cmd_check_config(config),
        Command::Stats { port, csv } => cmd_stats(config?, port, csv).await,
        Command::Dashboard { port } => cmd_dashboard(config?, port).await,
        Command::Summary { csv } => cmd_summary(config?, csv),
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PUBLIC HEALTH DATA API - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate each service's settings independently
    let mut failed = false;

    print!("Validating statistics service... ");
    match config.validate_stats() {
        Ok(()) => println!("OK"),
        Err(e) => {
            failed = true;
            println!("FAILED");
            println!("  Error: {}", e);
        }
    }

    print!("Validating dashboard proxy... ");
    match config.validate_dashboard() {
        Ok(()) => println!("OK"),
        Err(e) => {
            failed = true;
            println!("FAILED");
            println!("  Error: {}", e);
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Dataset: {}", config.health_stats_csv);
    println!("  Dashboard API: {}", config.dashboard_api_url);
    println!(
        "  Dashboard API Key: {}",
        if config.api_key().is_some() { "present" } else { "missing" }
    );
    println!("  Upstream Timeout: {}ms", config.http_timeout_ms);
    println!("======================================================================");

    if failed {
        println!("CONFIGURATION CHECK FAILED");
        println!("======================================================================");
        return Err(anyhow::anyhow!("Configuration validation failed"));
    }

    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the statistics service.
async fn cmd_stats(
    mut config: Config,
    port: Option<u16>,
    csv: Option<String>,
) -> anyhow::Result<()> {
    if let Some(csv) = csv {
        config.health_stats_csv = csv;
    }

    if let Err(e) = config.validate_stats() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Loading dataset from {}", config.health_stats_csv);
    let dataset = HealthDataset::load(&config.health_stats_csv).map_err(|e| {
        error!("Error loading CSV file: {}", e);
        e
    })?;

    let mut state = StatsState::new(dataset);
    if let Some(handle) = install_metrics() {
        state = state.with_metrics(handle);
    }

    serve(create_stats_router(state), port.unwrap_or(config.port)).await
}

/// Run the dashboard proxy service.
async fn cmd_dashboard(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Err(e) = config.validate_dashboard() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let client = DashboardClient::new(&config)?;
    info!("Proxying City Health Dashboard at {}", client.base_url());

    let mut state = DashboardState::new(client);
    if let Some(handle) = install_metrics() {
        state = state.with_metrics(handle);
    }

    serve(create_dashboard_router(state), port.unwrap_or(config.port)).await
}

/// Print an overview of the statistics dataset.
fn cmd_summary(config: Config, csv: Option<String>) -> anyhow::Result<()> {
    let path = csv.unwrap_or(config.health_stats_csv);
    let dataset = HealthDataset::load(&path)?;
    let summary = dataset.summary();

    println!("======================================================================");
    println!("PUBLIC HEALTH DATA API - DATASET SUMMARY");
    println!("======================================================================");
    println!("  Source: {}", dataset.source());
    println!("  Rows: {}", summary.rows);
    println!("  Countries: {}", summary.countries);
    println!("  Diseases: {}", summary.diseases);
    match summary.years {
        Some((first, last)) => println!("  Years: {} - {}", first, last),
        None => println!("  Years: none"),
    }
    println!("======================================================================");

    Ok(())
}

/// Install the Prometheus recorder, continuing without metrics on failure.
fn install_metrics() -> Option<PrometheusHandle> {
    match metrics::install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    }
}

/// Bind and serve until a shutdown signal arrives.
async fn serve(router: Router, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
