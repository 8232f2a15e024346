//! flightdesk application logic: the HTTP API, the interactive menu, and
//! the startup plumbing both binaries share.

pub mod api;
pub mod config;
pub mod logging;
pub mod shell;

use axum::{routing::get, Extension, Json, Router};
use config::DatabaseConfig;
use flightdesk_db::{DbRuntimeSettings, FlightData, MigrationError, PoolError};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Flight lookups over the process-wide connection pool.
    pub data: FlightData,
}

/// Errors that prevent the flight store from being opened.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The configured store does not exist and creating it is disabled.
    #[error("flight store '{0}' does not exist (set database.migrate to create it)")]
    MissingStore(String),

    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// No connection was available for running migrations.
    #[error("failed to get database connection for migrations: {0}")]
    Connection(#[from] r2d2::Error),

    /// A schema migration failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Opens the flight store described by `config`.
///
/// Builds the connection pool and, when `config.migrate` is set, creates the
/// store and any missing tables. Without `migrate` the store must already
/// exist. The returned handle owns the pool; dropping the last clone
/// releases every connection.
///
/// # Errors
///
/// Returns `StartupError` if the store is missing, the pool cannot be built,
/// or migrations fail.
pub fn open_store(config: &DatabaseConfig) -> Result<FlightData, StartupError> {
    if !config.migrate && config.path != ":memory:" && !Path::new(&config.path).exists() {
        return Err(StartupError::MissingStore(config.path.clone()));
    }

    let pool = flightdesk_db::create_pool(
        &config.path,
        DbRuntimeSettings {
            busy_timeout_ms: config.busy_timeout_ms,
            pool_max_size: config.pool_max_size,
            create_if_missing: config.migrate,
            ..DbRuntimeSettings::default()
        },
    )?;

    if config.migrate {
        let conn = pool.get()?;
        let applied = flightdesk_db::run_migrations(&conn)?;
        if applied > 0 {
            tracing::info!(count = applied, "applied database migrations");
        }
    }

    tracing::info!(path = %config.path, "opened flight store");
    Ok(FlightData::new(pool))
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/flight/{id}", get(api::get_flight_handler))
        .route("/flights/date", get(api::get_flights_by_date_handler))
        .route(
            "/flights/delays/airline",
            get(api::get_delays_by_airline_handler),
        )
        .route(
            "/flights/delays/airport",
            get(api::get_delays_by_airport_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
