//! Shared types and input validation for flightdesk.
//!
//! This crate holds the pieces every other crate agrees on: the
//! [`FlightRow`] row-mapping returned by the data layer, and the parsers
//! that turn raw user input (menu prompts, query-string parameters) into
//! validated values before anything touches the database.
//!
//! Both presentation shells validate through these functions, so an input
//! rejected by the CLI is rejected by the HTTP API for the same reason.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod row;

pub use row::{FlightRow, RowError};

/// Length of an IATA airport code.
pub const IATA_CODE_LEN: usize = 3;

/// Textual pattern accepted for date input (`DD/MM/YYYY`).
pub const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";

/// Errors produced while validating user input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Airport code is not exactly three ASCII letters.
    #[error("invalid IATA code '{0}': expected 3 letters")]
    InvalidAirportCode(String),

    /// Date string does not match `DD/MM/YYYY`.
    #[error("{0}")]
    InvalidDate(#[from] chrono::ParseError),

    /// Flight identifier is not an integer.
    #[error("invalid flight ID '{0}'")]
    InvalidFlightId(String),
}

/// A validated, uppercase IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Parses and normalizes an airport code.
    ///
    /// The input must be exactly three alphabetic characters; it is
    /// uppercased so `"jfk"` and `"JFK"` name the same airport.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidAirportCode` for any other input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.chars().count() != IATA_CODE_LEN
            || !trimmed.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ValidationError::InvalidAirportCode(input.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}

/// Parses a `DD/MM/YYYY` date string into a calendar date.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDate` if the input does not match the
/// pattern or names a day that does not exist.
pub fn parse_flight_date(input: &str) -> Result<NaiveDate, ValidationError> {
    Ok(NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT)?)
}

/// Parses a flight identifier.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFlightId` if the input is not an integer.
pub fn parse_flight_id(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFlightId(input.to_string()))
}
