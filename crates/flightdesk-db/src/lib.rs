//! Data access layer for flightdesk.
//!
//! Provides SQLite connection pooling (via `r2d2`), embedded schema
//! migrations, the fixed set of flight lookups, and [`FlightData`], the
//! single entry point both presentation shells query through.
//!
//! # Design decisions
//!
//! - **Read-only lookups**: every query is one parameter-bound `SELECT`;
//!   user input is never interpolated into SQL.
//! - **Typed failures**: lookups return `Result<Vec<FlightRow>, DataError>`.
//!   An empty vector always means "no matching rows"; an unreachable store
//!   or a failing statement is a distinct [`DataError`].
//! - **Connection per call**: a pooled connection is checked out for the
//!   duration of one lookup and returned before the call completes.

mod access;
mod migrations;
mod pool;
pub mod queries;

pub use access::{DataError, FlightData};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use queries::FlightQuery;
