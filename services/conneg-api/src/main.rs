//! Conneg API Server
//!
//! Serves configured resources in every profile, media type and language
//! they offer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use conneg_api::build_router;
use conneg_api::config::ServiceConfig;
use conneg_api::state::AppState;

/// Conneg API Server
#[derive(Parser, Debug)]
#[command(name = "conneg-api")]
#[command(about = "Content negotiation by profile server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "CONNEG_LISTEN_ADDR")]
    listen: String,

    /// Directory of resource configuration files
    #[arg(long, default_value = "config/resources", env = "CONNEG_CONFIG_DIR")]
    config_dir: String,

    /// Base URL for instance URIs
    #[arg(long, default_value = "http://localhost:8080", env = "CONNEG_BASE_URL")]
    base_url: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "CONNEG_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting conneg API server");

    let config = ServiceConfig::load_from_dir(&args.config_dir)
        .with_context(|| format!("Failed to load resources from {}", args.config_dir))?;
    info!(resources = config.resources.len(), "Loaded resource configuration");

    let state = Arc::new(AppState::new(config, args.base_url).with_metrics(prometheus_handle));
    let app = build_router(state);

    // Parse listen address
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Conneg API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
