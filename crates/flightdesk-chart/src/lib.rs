//! Bar-chart rendering for flight result sets.
//!
//! Each renderer reduces a result set to a [`BarSeries`] (one category label
//! and one delay per row) and writes an SVG bar chart into an output
//! directory. Rendering never waits on a viewer: the caller gets the path of
//! the written file and decides what to do with it.

mod render;
mod series;

use flightdesk_types::{FlightRow, RowError};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use render::render_bar_chart;
pub use series::{BarSeries, ChartKind};

/// Errors that can occur while producing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// There are no rows to plot.
    #[error("cannot chart an empty result set")]
    EmptySeries,

    /// A row lacks a column the chart needs.
    #[error("cannot chart row: {0}")]
    Row(#[from] RowError),

    /// The output directory could not be created.
    #[error("chart output error: {0}")]
    Io(#[from] std::io::Error),

    /// The drawing backend failed.
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

/// Charts delays per row, labelled by airline.
///
/// # Errors
///
/// Returns `ChartError` if `rows` is empty, a row lacks a required column,
/// or the chart cannot be written.
pub fn plot_delays_by_airline(rows: &[FlightRow], out_dir: &Path) -> Result<PathBuf, ChartError> {
    plot(ChartKind::ByAirline, rows, out_dir)
}

/// Charts delays per row, labelled by destination airport.
///
/// # Errors
///
/// Returns `ChartError` if `rows` is empty, a row lacks a required column,
/// or the chart cannot be written.
pub fn plot_delays_by_airport(rows: &[FlightRow], out_dir: &Path) -> Result<PathBuf, ChartError> {
    plot(ChartKind::ByAirport, rows, out_dir)
}

/// Charts delays per row, labelled by `ORIGIN->DEST` route.
///
/// # Errors
///
/// Returns `ChartError` if `rows` is empty, a row lacks a required column,
/// or the chart cannot be written.
pub fn plot_flights_by_date(rows: &[FlightRow], out_dir: &Path) -> Result<PathBuf, ChartError> {
    plot(ChartKind::ByDate, rows, out_dir)
}

fn plot(kind: ChartKind, rows: &[FlightRow], out_dir: &Path) -> Result<PathBuf, ChartError> {
    let series = BarSeries::from_rows(kind, rows)?;
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    std::fs::create_dir_all(out_dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let path = out_dir.join(format!("{}-{stamp}.svg", kind.file_stem()));

    render_bar_chart(kind, &series, &path)?;
    tracing::info!(
        chart = kind.file_stem(),
        bars = series.len(),
        path = %path.display(),
        "rendered chart"
    );

    Ok(path)
}
