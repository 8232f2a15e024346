//! The fixed set of flight lookups.
//!
//! Each query binds exactly one named parameter. All four join `flights`
//! to `airlines` so every row carries the airline's display name under the
//! `AIRLINE` column and the departure delay under `DELAY`.

/// Flight joined to its airline, by exact id. Binds `:id`.
///
/// `flights.*` already carries the `AIRLINE` foreign key; the joined name
/// comes later in the select list and replaces it in the mapped row.
pub const FLIGHT_BY_ID: &str = "
    SELECT
        flights.*,
        airlines.name AS AIRLINE,
        flights.ID AS FLIGHT_ID,
        flights.DEPARTURE_DELAY AS DELAY
    FROM flights
    JOIN airlines ON flights.AIRLINE = airlines.id
    WHERE flights.ID = :id
";

/// Delayed flights of airlines whose name matches a `LIKE` pattern.
/// Binds `:airline`.
pub const DELAYED_FLIGHTS_BY_AIRLINE: &str = r"
    SELECT
        flights.ID,
        flights.ORIGIN_AIRPORT,
        flights.DESTINATION_AIRPORT,
        flights.DEPARTURE_DELAY AS DELAY,
        airlines.name AS AIRLINE
    FROM flights
    JOIN airlines ON flights.AIRLINE = airlines.id
    WHERE airlines.name LIKE :airline ESCAPE '\'
      AND flights.DEPARTURE_DELAY > 0
";

/// Delayed flights departing from an origin airport. Binds `:airport`.
pub const DELAYED_FLIGHTS_BY_AIRPORT: &str = "
    SELECT
        flights.ID,
        flights.ORIGIN_AIRPORT,
        flights.DESTINATION_AIRPORT,
        flights.DEPARTURE_DELAY AS DELAY,
        airlines.name AS AIRLINE
    FROM flights
    JOIN airlines ON flights.AIRLINE = airlines.id
    WHERE flights.ORIGIN_AIRPORT = :airport
      AND flights.DEPARTURE_DELAY > 0
";

/// All flights on a calendar day, ignoring any stored time of day.
/// Binds `:flight_date` as `YYYY-MM-DD`.
pub const FLIGHTS_BY_DATE: &str = "
    SELECT
        flights.ID,
        flights.ORIGIN_AIRPORT,
        flights.DESTINATION_AIRPORT,
        flights.DEPARTURE_DELAY AS DELAY,
        airlines.name AS AIRLINE,
        flights.FLIGHT_DATE
    FROM flights
    JOIN airlines ON flights.AIRLINE = airlines.id
    WHERE DATE(flights.FLIGHT_DATE) = :flight_date
";

/// Identifies one of the lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightQuery {
    /// Single flight by id.
    ById,
    /// Delayed flights by airline name substring.
    DelayedByAirline,
    /// Delayed flights by origin airport.
    DelayedByAirport,
    /// Flights on a calendar date.
    ByDate,
}

impl FlightQuery {
    /// SQL template for this lookup.
    pub fn sql(self) -> &'static str {
        match self {
            Self::ById => FLIGHT_BY_ID,
            Self::DelayedByAirline => DELAYED_FLIGHTS_BY_AIRLINE,
            Self::DelayedByAirport => DELAYED_FLIGHTS_BY_AIRPORT,
            Self::ByDate => FLIGHTS_BY_DATE,
        }
    }

    /// Short name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ById => "flight_by_id",
            Self::DelayedByAirline => "delayed_by_airline",
            Self::DelayedByAirport => "delayed_by_airport",
            Self::ByDate => "flights_by_date",
        }
    }
}

/// Builds the `LIKE` pattern matching `substring` anywhere in a name.
///
/// `%`, `_` and `\` in the input are escaped so they match literally.
pub fn substring_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for c in substring.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
