//! Request echo server.
//!
//! Accepts any request on any path and method, prints it to stdout as an
//! indented JSON record and answers `200 OK` with an empty body.
//!
//! ```text
//!     Client Request ──▶ listener ──▶ catch-all route ──▶ echo handler ──▶ 200
//!                                                              │
//!                                                              ▼
//!                                                   stdout: record + separator
//! ```

use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use request_echo::cli::Cli;
use request_echo::http::HttpServer;
use request_echo::lifecycle::{drain, signals, Shutdown};
use request_echo::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.observability)?;

    tracing::info!("request-echo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_size = config.limits.max_body_size,
        log_format = ?config.observability.log_format,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        res = &mut server_task => {
            res??;
            return Ok(());
        }
        signal = signals::wait_for_signal() => {
            let signal = signal?;
            tracing::info!(signal, "Shutdown signal received");
        }
    }

    shutdown.trigger();
    if let Some(res) = drain(server_task, grace).await {
        res??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
