//! Shared fixtures for flightdesk integration tests.

use flightdesk::config::DatabaseConfig;
use flightdesk::open_store;
use flightdesk_db::FlightData;
use tempfile::NamedTempFile;

/// Opens a migrated, file-backed store seeded with a small data set.
///
/// Keep the returned file alive for the duration of the test.
pub fn seeded_store() -> (NamedTempFile, FlightData) {
    let temp_file = NamedTempFile::new().expect("should create temp file");
    let config = DatabaseConfig {
        path: temp_file.path().to_str().expect("utf-8 path").to_string(),
        pool_max_size: 2,
        migrate: true,
        ..DatabaseConfig::default()
    };
    let data = open_store(&config).expect("store should open");

    let conn = rusqlite::Connection::open(temp_file.path()).expect("should open seed connection");
    conn.execute_batch(
        "INSERT INTO airlines (id, name) VALUES
            (1, 'Delta Air Lines Inc.'),
            (2, 'American Airlines Inc.');
         INSERT INTO flights (ID, FLIGHT_DATE, ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY, AIRLINE) VALUES
            (1, '2015-12-25 06:30:00', 'JFK', 'LAX', 25, 1),
            (2, '2015-12-25 18:05:00', 'JFK', 'ATL', 0, 1),
            (3, '2015-12-25', 'LAX', 'ORD', -4, 2),
            (4, '2015-12-26 00:00:00', 'JFK', 'SFO', 40, 2);",
    )
    .expect("seed should succeed");

    (temp_file, data)
}
