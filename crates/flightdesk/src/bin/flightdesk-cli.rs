//! flightdesk interactive menu.
//!
//! Runs the text menu on stdin/stdout. The session ends on the exit option,
//! end of input, or Ctrl+C. On Ctrl+C the process exits without waiting for
//! the session thread still blocked on stdin.

use flightdesk::config::{load_config, resolve_config_path};
use flightdesk::logging::{init_tracing, LogOutput};
use flightdesk::open_store;
use flightdesk::shell::{SessionOutcome, Shell};
use std::io::BufReader;
use std::process::ExitCode;

fn main() -> ExitCode {
    let (config_path, config_source) = resolve_config_path();

    let config = match load_config(Some(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration from {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging, LogOutput::Stderr);
    tracing::debug!(source = config_source, path = %config_path, "resolved configuration path");

    let data = match open_store(&config.database) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, path = %config.database.path, "failed to open flight store");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    // Stdout stays unlocked between writes so the interrupt path can still
    // reach the terminal while the session waits on stdin.
    let shell = Shell::new(
        data,
        config.charts,
        BufReader::new(std::io::stdin()),
        std::io::stdout(),
    );
    let outcome = runtime.block_on(shell.run_until(interrupted()));
    runtime.shutdown_background();

    match outcome {
        SessionOutcome::Finished => ExitCode::SUCCESS,
        SessionOutcome::Interrupted => {
            eprintln!();
            tracing::info!("received SIGINT, session closed");
            ExitCode::SUCCESS
        }
        SessionOutcome::Failed(e) => {
            tracing::error!(error = %e, "interactive session failed");
            ExitCode::FAILURE
        }
    }
}

/// Completes on Ctrl+C. Never completes if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
