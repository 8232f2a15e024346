//! flightdesk HTTP server.
//!
//! Starts an axum server exposing the flight lookups as JSON, with
//! structured logging and graceful shutdown on SIGTERM/SIGINT.

use flightdesk::config::{load_config, resolve_config_path};
use flightdesk::logging::{init_tracing, LogOutput};
use flightdesk::{app, open_store, AppState};
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let (config_path, config_source) = resolve_config_path();

    let config = match load_config(Some(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration from {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging, LogOutput::Stdout);

    tracing::info!(
        source = config_source,
        path = %config_path,
        "resolved startup configuration path"
    );

    let data = match open_store(&config.database) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, path = %config.database.path, "failed to open flight store");
            return ExitCode::FAILURE;
        }
    };

    let app = app(AppState { data });
    let addr = SocketAddr::new(config.server.host, config.server.port);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind address");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "starting flightdesk server");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("flightdesk server shut down");
    ExitCode::SUCCESS
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
