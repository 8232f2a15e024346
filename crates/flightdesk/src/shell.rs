//! Interactive text menu over the flight lookups.
//!
//! The shell reads one line at a time from any `BufRead` and writes to any
//! `Write`, so the binary drives it with stdin/stdout and tests drive it
//! with in-memory buffers. The session ends on the exit option, a quit
//! word, or end of input.

use crate::config::ChartsConfig;
use chrono::Datelike;
use flightdesk_chart::ChartError;
use flightdesk_db::{DataError, FlightData};
use flightdesk_types::{parse_flight_date, parse_flight_id, AirportCode, FlightRow};
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FlightById,
    FlightsByDate,
    DelayedByAirline,
    DelayedByAirport,
    Exit,
}

const MENU: &[(MenuChoice, &str)] = &[
    (MenuChoice::FlightById, "Show flight by ID"),
    (MenuChoice::FlightsByDate, "Show flights by date"),
    (MenuChoice::DelayedByAirline, "Show delayed flights by airline"),
    (MenuChoice::DelayedByAirport, "Show delayed flights by airport"),
    (MenuChoice::Exit, "Exit"),
];

impl MenuChoice {
    /// Parses a menu selection: its number, or a quit word for `Exit`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if ["q", "quit", "exit"]
            .iter()
            .any(|word| input.eq_ignore_ascii_case(word))
        {
            return Some(Self::Exit);
        }
        let number: usize = input.parse().ok()?;
        MENU.get(number.checked_sub(1)?).map(|(choice, _)| *choice)
    }
}

/// Whether the session continues after an operation.
enum Flow {
    Continue,
    Quit,
}

/// How a session driven by [`Shell::run_until`] ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The user exited or input ended.
    Finished,
    /// The interrupt completed first.
    Interrupted,
    /// Terminal I/O failed or the session task panicked.
    Failed(String),
}

/// A single interactive session.
pub struct Shell<R, W> {
    data: FlightData,
    charts: ChartsConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a session reading from `input` and writing to `output`.
    pub fn new(data: FlightData, charts: ChartsConfig, input: R, output: W) -> Self {
        Self {
            data,
            charts,
            input,
            output,
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Flight Data Manager:")?;
        loop {
            let Some(choice) = self.select()? else {
                break;
            };
            tracing::debug!(?choice, "menu selection");

            let flow = match choice {
                MenuChoice::FlightById => self.flight_by_id()?,
                MenuChoice::FlightsByDate => self.flights_by_date()?,
                MenuChoice::DelayedByAirline => self.delayed_by_airline()?,
                MenuChoice::DelayedByAirport => self.delayed_by_airport()?,
                MenuChoice::Exit => Flow::Quit,
            };
            if let Flow::Quit = flow {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        tracing::info!("interactive session ended");
        Ok(())
    }

    /// Prints the menu and reads lines until a valid choice is entered.
    /// Returns `None` at end of input.
    fn select(&mut self) -> io::Result<Option<MenuChoice>> {
        writeln!(self.output, "Menu:")?;
        for (idx, (_, label)) in MENU.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, label)?;
        }
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if let Some(choice) = MenuChoice::parse(&line) {
                return Ok(Some(choice));
            }
            writeln!(self.output, "Invalid selection. Please try again.")?;
        }
    }

    fn flight_by_id(&mut self) -> io::Result<Flow> {
        let flight_id = loop {
            let Some(line) = self.prompt("Enter flight ID: ")? else {
                return Ok(Flow::Quit);
            };
            match parse_flight_id(&line) {
                Ok(id) => break id,
                Err(_) => writeln!(
                    self.output,
                    "Invalid input. Please enter a valid numeric flight ID."
                )?,
            }
        };

        match self.data.flight_by_id(flight_id) {
            Ok(rows) => self.print_results(&rows)?,
            Err(e) => self.report_unavailable(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn flights_by_date(&mut self) -> io::Result<Flow> {
        let date = loop {
            let Some(line) = self.prompt("Enter date in DD/MM/YYYY format: ")? else {
                return Ok(Flow::Quit);
            };
            match parse_flight_date(&line) {
                Ok(date) => break date,
                Err(e) => writeln!(self.output, "Invalid date format. Try again: {e}")?,
            }
        };

        match self
            .data
            .flights_by_date(date.day(), date.month(), date.year())
        {
            Ok(rows) => {
                self.print_results(&rows)?;
                if rows.is_empty() {
                    writeln!(self.output, "No flights found for this date.")?;
                } else {
                    let outcome = flightdesk_chart::plot_flights_by_date(&rows, self.chart_dir());
                    self.emit_chart(outcome)?;
                }
            }
            Err(e) => self.report_unavailable(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn delayed_by_airline(&mut self) -> io::Result<Flow> {
        let Some(airline) = self.prompt("Enter airline name: ")? else {
            return Ok(Flow::Quit);
        };

        match self.data.delayed_flights_by_airline(&airline) {
            Ok(rows) => {
                self.print_results(&rows)?;
                if rows.is_empty() {
                    writeln!(self.output, "No delays found for this airline.")?;
                } else {
                    let outcome = flightdesk_chart::plot_delays_by_airline(&rows, self.chart_dir());
                    self.emit_chart(outcome)?;
                }
            }
            Err(e) => self.report_unavailable(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn delayed_by_airport(&mut self) -> io::Result<Flow> {
        let airport = loop {
            let Some(line) = self.prompt("Enter origin airport IATA code: ")? else {
                return Ok(Flow::Quit);
            };
            match AirportCode::parse(&line) {
                Ok(code) => break code,
                Err(_) => writeln!(
                    self.output,
                    "Invalid IATA code. Use a valid 3-letter code."
                )?,
            }
        };

        match self.data.delayed_flights_by_airport(airport.as_str()) {
            Ok(rows) => {
                self.print_results(&rows)?;
                if rows.is_empty() {
                    writeln!(self.output, "No delays found for this airport.")?;
                } else {
                    let outcome = flightdesk_chart::plot_delays_by_airport(&rows, self.chart_dir());
                    self.emit_chart(outcome)?;
                }
            }
            Err(e) => self.report_unavailable(&e)?,
        }
        Ok(Flow::Continue)
    }

    /// Prints the result count and one line per flight.
    fn print_results(&mut self, rows: &[FlightRow]) -> io::Result<()> {
        writeln!(self.output, "Got {} results.", rows.len())?;
        for row in rows {
            match format_flight(row) {
                Ok(line) => writeln!(self.output, "{line}")?,
                Err(e) => {
                    writeln!(self.output, "Error showing results: {e}")?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn report_unavailable(&mut self, error: &DataError) -> io::Result<()> {
        writeln!(self.output, "Flight data is unavailable: {error}")
    }

    fn chart_dir(&self) -> &Path {
        &self.charts.output_dir
    }

    /// Reports a rendered chart and, if configured, hands it to the
    /// desktop viewer without waiting for it.
    fn emit_chart(&mut self, outcome: Result<PathBuf, ChartError>) -> io::Result<()> {
        match outcome {
            Ok(path) => {
                writeln!(self.output, "Chart saved to {}", path.display())?;
                if self.charts.open_viewer {
                    if let Err(e) = open::that_detached(&path) {
                        tracing::warn!(path = %path.display(), error = %e, "failed to open chart viewer");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "chart rendering failed");
                writeln!(self.output, "Could not render chart: {e}")?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Reads one line without its terminator. Returns `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R, W> Shell<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    /// Runs the session on the blocking pool until it ends or `interrupt`
    /// completes.
    ///
    /// A session parked on input cannot be joined, so on interrupt its task
    /// is abandoned together with the shell it owns. The writer must not be
    /// held locked across reads, or nothing else can write to it afterwards.
    pub async fn run_until<F>(mut self, interrupt: F) -> SessionOutcome
    where
        F: Future<Output = ()>,
    {
        let session = tokio::task::spawn_blocking(move || self.run());

        tokio::select! {
            joined = session => match joined {
                Ok(Ok(())) => SessionOutcome::Finished,
                Ok(Err(e)) => SessionOutcome::Failed(e.to_string()),
                Err(e) => SessionOutcome::Failed(e.to_string()),
            },
            () = interrupt => SessionOutcome::Interrupted,
        }
    }
}

/// Formats one result line, appending the delay only when the flight left
/// late.
pub fn format_flight(row: &FlightRow) -> Result<String, flightdesk_types::RowError> {
    let id = row.id()?;
    let origin = row.origin()?;
    let destination = row.destination()?;
    let airline = row.airline()?;
    let delay = row.delay()?;

    let mut line = format!("{id}. {origin} -> {destination} by {airline}");
    if delay > 0 {
        line.push_str(&format!(", Delay: {delay} Minutes"));
    }
    Ok(line)
}
