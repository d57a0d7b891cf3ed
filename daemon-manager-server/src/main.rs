//! Daemon Manager
//!
//! Exposes start/stop/restart/status of one systemd service over HTTP.
//!
//! Architecture:
//! - Arguments: name, unit directory and port from flags or environment
//! - Logging: stderr plus the append-only `daemon-manager.log`
//! - API: four GET routes under `/{name}` calling the service controller

mod api;
mod cli;
mod logging;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use daemon_manager_core::{IdCommand, ServiceController, Systemctl};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(Path::new(logging::LOG_FILE))?;

    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            if e.use_stderr() {
                tracing::error!("Invalid arguments: {}", e.kind());
            }
            e.exit();
        }
    };

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            cli::report_invalid(&e, &mut std::io::stdout().lock())
                .context("Failed to print usage")?;
            return Err(e);
        }
    };

    println!("name={}", config.record.name());
    println!("path={}", config.record.unit_directory().display());
    println!("port={}", config.port);

    tracing::info!(
        "Managing {} from {}",
        config.record.unit_name(),
        config.record.unit_directory().display()
    );

    let controller = Arc::new(ServiceController::new(
        config.record,
        Box::new(Systemctl::with_program(config.systemctl)),
        Box::new(IdCommand),
    ));

    // Build router with all API endpoints
    let app = api::create_router(controller);

    println!("Server listening on port {}...", config.port);
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind {}: {}", config.bind_addr, e))
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .inspect_err(|e| tracing::error!("Server error: {}", e))
        .context("Failed to start server")?;

    Ok(())
}
