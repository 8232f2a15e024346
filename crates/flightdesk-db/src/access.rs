//! `FlightData`: the single entry point for flight lookups.

use crate::pool::DbPool;
use crate::queries::{substring_pattern, FlightQuery};
use chrono::NaiveDate;
use flightdesk_types::FlightRow;
use rusqlite::types::{ToSql, ValueRef};
use rusqlite::{named_params, Row};
use serde_json::{Number, Value};
use std::fmt;
use thiserror::Error;

/// Errors returned by flight lookups.
///
/// Callers can tell an unavailable store apart from a lookup that simply
/// matched nothing (`Ok` with an empty vector).
#[derive(Debug, Error)]
pub enum DataError {
    /// No pooled connection could be acquired.
    #[error("flight data store unavailable: {0}")]
    Unavailable(#[from] r2d2::Error),

    /// SQLite failed to prepare, execute, or read the query.
    #[error("flight query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Day, month, and year do not form a calendar date.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Day of month.
        day: u32,
        /// Month of year.
        month: u32,
        /// Year.
        year: i32,
    },
}

/// Read-only access to the flight records store.
///
/// Holds a handle to the connection pool; cloning is cheap and shares the
/// same pool. The pool is released when the last clone is dropped.
#[derive(Clone)]
pub struct FlightData {
    pool: DbPool,
}

impl fmt::Debug for FlightData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlightData")
            .field("pool_max_size", &self.pool.max_size())
            .finish()
    }
}

impl FlightData {
    /// Wraps an existing connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Returns the flight with the given id, joined to its airline.
    ///
    /// At most one row is returned.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the store is unavailable or the query fails.
    pub fn flight_by_id(&self, flight_id: i64) -> Result<Vec<FlightRow>, DataError> {
        self.execute(FlightQuery::ById, named_params! { ":id": flight_id })
    }

    /// Returns delayed flights of every airline whose name contains
    /// `airline` (case rules follow SQLite's `LIKE`: ASCII case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the store is unavailable or the query fails.
    pub fn delayed_flights_by_airline(&self, airline: &str) -> Result<Vec<FlightRow>, DataError> {
        let pattern = substring_pattern(airline);
        self.execute(
            FlightQuery::DelayedByAirline,
            named_params! { ":airline": pattern },
        )
    }

    /// Returns delayed flights departing from `airport`.
    ///
    /// The code is uppercased before matching.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the store is unavailable or the query fails.
    pub fn delayed_flights_by_airport(&self, airport: &str) -> Result<Vec<FlightRow>, DataError> {
        let airport = airport.trim().to_ascii_uppercase();
        self.execute(
            FlightQuery::DelayedByAirport,
            named_params! { ":airport": airport },
        )
    }

    /// Returns every flight on the given calendar day, regardless of the
    /// stored time component.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidDate` if the parts do not form a date, or
    /// another `DataError` if the store is unavailable or the query fails.
    pub fn flights_by_date(
        &self,
        day: u32,
        month: u32,
        year: i32,
    ) -> Result<Vec<FlightRow>, DataError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DataError::InvalidDate { day, month, year })?;
        let flight_date = date.format("%Y-%m-%d").to_string();
        self.execute(
            FlightQuery::ByDate,
            named_params! { ":flight_date": flight_date },
        )
    }

    fn execute(
        &self,
        query: FlightQuery,
        params: &[(&str, &dyn ToSql)],
    ) -> Result<Vec<FlightRow>, DataError> {
        let result = self.run(query, params);
        match &result {
            Ok(rows) => {
                tracing::debug!(query = query.as_str(), rows = rows.len(), "flight lookup finished");
            }
            Err(e) => {
                tracing::error!(query = query.as_str(), error = %e, "flight lookup failed");
            }
        }
        result
    }

    fn run(
        &self,
        query: FlightQuery,
        params: &[(&str, &dyn ToSql)],
    ) -> Result<Vec<FlightRow>, DataError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(query.sql())?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params)?;
        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            results.push(map_row(row, &names)?);
        }

        Ok(results)
    }
}

fn map_row(row: &Row<'_>, names: &[String]) -> rusqlite::Result<FlightRow> {
    let mut mapped = FlightRow::new();
    for (idx, name) in names.iter().enumerate() {
        mapped.insert(name.clone(), to_json(row.get_ref(idx)?));
    }
    Ok(mapped)
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
