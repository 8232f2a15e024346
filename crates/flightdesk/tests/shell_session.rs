mod common;

use flightdesk::config::ChartsConfig;
use flightdesk::shell::{SessionOutcome, Shell};
use flightdesk_db::FlightData;
use std::io::{self, BufReader, Cursor, Read, Write};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn charts_config(chart_dir: &Path) -> ChartsConfig {
    ChartsConfig {
        output_dir: chart_dir.to_path_buf(),
        open_viewer: false,
    }
}

/// Runs a full session over `input` and returns everything written.
fn run_session(data: FlightData, chart_dir: &Path, input: &str) -> String {
    let mut output: Vec<u8> = Vec::new();
    Shell::new(data, charts_config(chart_dir), input.as_bytes(), &mut output)
        .run()
        .expect("session should not fail on in-memory io");
    String::from_utf8(output).expect("output should be utf-8")
}

fn chart_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn shows_welcome_and_menu_then_exits() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "5\n");

    assert!(output.starts_with("Welcome to Flight Data Manager:\nMenu:\n1. Show flight by ID\n"));
    assert!(output.contains("4. Show delayed flights by airport\n5. Exit\n"));
    assert!(output.ends_with("Goodbye.\n"));
}

#[test]
fn end_of_input_ends_session() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "");
    assert!(output.ends_with("Goodbye.\n"));
}

#[test]
fn invalid_menu_selection_reprompts() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "9\nabc\nquit\n");
    assert_eq!(output.matches("Invalid selection. Please try again.").count(), 2);
}

#[test]
fn flight_by_id_retries_until_numeric() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "1\nfour\n4\nq\n");

    assert!(output.contains("Invalid input. Please enter a valid numeric flight ID."));
    assert!(output.contains("Got 1 results.\n4. JFK -> SFO by American Airlines Inc., Delay: 40 Minutes\n"));
    assert_eq!(chart_count(charts.path()), 0, "id lookups are not charted");
}

#[test]
fn flights_by_date_prints_and_charts() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "2\n2015-12-25\n25/12/2015\n5\n");

    assert!(output.contains("Invalid date format. Try again:"));
    assert!(output.contains("Got 3 results."));
    assert!(output.contains("2. JFK -> ATL by Delta Air Lines Inc.\n"));
    assert!(output.contains("Chart saved to "));
    assert_eq!(chart_count(charts.path()), 1);
}

#[test]
fn date_without_flights_is_reported_without_chart() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "2\n01/01/2016\n5\n");

    assert!(output.contains("Got 0 results.\nNo flights found for this date."));
    assert_eq!(chart_count(charts.path()), 0);
}

#[test]
fn delayed_by_airline_matches_substring() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "3\ndelta\n5\n");

    assert!(output.contains("Got 1 results.\n1. JFK -> LAX by Delta Air Lines Inc., Delay: 25 Minutes\n"));
    assert_eq!(chart_count(charts.path()), 1);
}

#[test]
fn delayed_by_airline_without_matches() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "3\nLufthansa\n5\n");
    assert!(output.contains("No delays found for this airline."));
}

#[test]
fn delayed_by_airport_validates_and_normalizes_code() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "4\nJFKX\nj1k\njfk\n5\n");

    assert_eq!(
        output
            .matches("Invalid IATA code. Use a valid 3-letter code.")
            .count(),
        2
    );
    assert!(output.contains("Got 2 results."));
    assert_eq!(chart_count(charts.path()), 1);
}

#[test]
fn end_of_input_inside_prompt_ends_session() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "4\nXX");
    assert!(output.ends_with("Goodbye.\n"));
}

#[test]
fn store_failure_is_reported_as_unavailable() {
    let manager = r2d2_sqlite::SqliteConnectionManager::file("/nonexistent-dir/flights.sqlite3")
        .with_flags(rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY);
    let pool = r2d2::Pool::builder()
        .min_idle(Some(0))
        .connection_timeout(std::time::Duration::from_millis(100))
        .build_unchecked(manager);
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(FlightData::new(pool), charts.path(), "3\ndelta\n5\n");

    assert!(output.contains("Flight data is unavailable:"));
    assert!(!output.contains("No delays found"));
}

#[test]
fn airline_text_keeps_inner_spaces() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    let output = run_session(data, charts.path(), "3\nAir Lines\n5\n");
    assert!(output.contains("Got 1 results.\n1. JFK -> LAX by Delta Air Lines Inc., Delay: 25 Minutes\n"));
}

#[test]
fn airline_text_is_matched_unchanged() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();

    // No airline name contains " delta" with the leading space.
    let output = run_session(data, charts.path(), "3\n delta\n5\n");
    assert!(output.contains("Got 0 results.\nNo delays found for this airline."));
}

/// Input that blocks until a chunk is sent; a dropped sender reads as end
/// of input.
struct ChannelInput(mpsc::Receiver<Vec<u8>>);

impl Read for ChannelInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.recv() {
            Ok(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            Err(_) => Ok(0),
        }
    }
}

/// Writer shared with the test, locked only for the length of each write.
#[derive(Clone, Default)]
struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn interrupt_ends_session_blocked_on_input() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    let output = SharedOutput::default();

    let shell = Shell::new(
        data,
        charts_config(charts.path()),
        BufReader::new(ChannelInput(rx)),
        output.clone(),
    );

    let watched = output.clone();
    let menu_shown = async move {
        while !watched.text().contains("5. Exit") {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };

    let outcome = tokio::time::timeout(Duration::from_secs(5), shell.run_until(menu_shown))
        .await
        .expect("interrupt should end the session promptly");
    assert!(matches!(outcome, SessionOutcome::Interrupted), "got {outcome:?}");

    // The session is still waiting for input; the terminal must stay usable.
    assert!(
        output.0.try_lock().is_ok(),
        "a session waiting on input must not hold the output"
    );

    drop(tx);
}

#[tokio::test]
async fn run_until_reports_normal_exit() {
    let (_file, data) = common::seeded_store();
    let charts = tempfile::tempdir().unwrap();
    let output = SharedOutput::default();

    let shell = Shell::new(
        data,
        charts_config(charts.path()),
        Cursor::new(b"5\n".to_vec()),
        output.clone(),
    );

    let outcome = shell.run_until(std::future::pending()).await;
    assert!(matches!(outcome, SessionOutcome::Finished), "got {outcome:?}");
    assert!(output.text().ends_with("Goodbye.\n"));
}
