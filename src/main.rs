//! Game of Life HTTP server (default binary).
//!
//! Reads configuration from `LIFE_*` environment variables, checks the port, creates
//! the shared grid and serves until Ctrl-C.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use life_server::adapter::{check_tcp_listen_available, run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env();

    check_tcp_listen_available(&config.host, config.port)
        .with_context(|| format!("cannot listen on {}:{}", config.host, config.port))?;

    let engine = config.build_engine()?;
    let dims = engine.dimensions();
    info!(rows = dims.rows, cols = dims.cols, "grid initialized");

    run_server(config, engine, None, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
