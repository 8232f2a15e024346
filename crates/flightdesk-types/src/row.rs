//! Row-mapping returned by every flight lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised when a row lacks a column a consumer requires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    /// The column is absent from the result set.
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),

    /// The column exists but holds a value of the wrong type.
    #[error("column '{0}' has an unexpected type")]
    WrongType(&'static str),
}

/// A single query result record, exposed as ordered column-name → value
/// pairs.
///
/// Column order follows the `SELECT` list. Lookups are case-insensitive,
/// matching SQLite's own treatment of column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightRow {
    columns: Map<String, Value>,
}

impl FlightRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. A later column with the same name replaces the
    /// earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.columns.insert(name.into(), value);
    }

    /// Returns the underlying ordered map.
    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks up a column by name, ignoring ASCII case.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column).or_else(|| {
            self.columns
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        })
    }

    /// Flight identifier (`FLIGHT_ID`, falling back to `ID`).
    pub fn id(&self) -> Result<i64, RowError> {
        let value = self
            .get("FLIGHT_ID")
            .or_else(|| self.get("ID"))
            .ok_or(RowError::MissingColumn("ID"))?;
        value.as_i64().ok_or(RowError::WrongType("ID"))
    }

    /// Origin airport code.
    pub fn origin(&self) -> Result<&str, RowError> {
        self.require_str("ORIGIN_AIRPORT")
    }

    /// Destination airport code.
    pub fn destination(&self) -> Result<&str, RowError> {
        self.require_str("DESTINATION_AIRPORT")
    }

    /// Airline display name.
    pub fn airline(&self) -> Result<&str, RowError> {
        self.require_str("AIRLINE")
    }

    /// Departure delay in minutes. A `NULL` delay counts as on time (0).
    pub fn delay(&self) -> Result<i64, RowError> {
        match self.get("DELAY").ok_or(RowError::MissingColumn("DELAY"))? {
            Value::Null => Ok(0),
            Value::Number(n) => n
                .as_i64()
                // REAL delays are truncated toward zero.
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or(RowError::WrongType("DELAY")),
            _ => Err(RowError::WrongType("DELAY")),
        }
    }

    /// Stored flight date, if the query selected it.
    pub fn flight_date(&self) -> Option<&str> {
        self.get("FLIGHT_DATE").and_then(Value::as_str)
    }

    fn require_str(&self, column: &'static str) -> Result<&str, RowError> {
        self.get(column)
            .ok_or(RowError::MissingColumn(column))?
            .as_str()
            .ok_or(RowError::WrongType(column))
    }
}

impl From<Map<String, Value>> for FlightRow {
    fn from(columns: Map<String, Value>) -> Self {
        Self { columns }
    }
}
