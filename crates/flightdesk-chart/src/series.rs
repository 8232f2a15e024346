//! Reduction of result rows to plottable series.

use flightdesk_types::{FlightRow, RowError};

/// The three chart shapes, one per charted lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Delayed flights by airline: bars labelled by airline name.
    ByAirline,
    /// Delayed flights by airport: bars labelled by destination.
    ByAirport,
    /// Flights on a date: bars labelled by route.
    ByDate,
}

impl ChartKind {
    /// Chart caption.
    pub fn title(self) -> &'static str {
        match self {
            Self::ByAirline => "Flight Delays by Airline",
            Self::ByAirport => "Flight Delay by Destination Airport",
            Self::ByDate => "Flight Delays on Date",
        }
    }

    /// X-axis description.
    pub fn x_desc(self) -> &'static str {
        match self {
            Self::ByAirline => "Airline",
            Self::ByAirport => "Destination Airport",
            Self::ByDate => "Flight Route",
        }
    }

    /// Prefix of the written file name.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::ByAirline => "delays-by-airline",
            Self::ByAirport => "delays-by-airport",
            Self::ByDate => "flights-by-date",
        }
    }

    /// Category label for a single row.
    pub fn label(self, row: &FlightRow) -> Result<String, RowError> {
        match self {
            Self::ByAirline => row.airline().map(str::to_string),
            Self::ByAirport => row.destination().map(str::to_string),
            Self::ByDate => Ok(format!("{}->{}", row.origin()?, row.destination()?)),
        }
    }
}

/// Parallel label/delay sequences, one entry per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarSeries {
    /// Category label per bar.
    pub labels: Vec<String>,
    /// Delay in minutes per bar.
    pub delays: Vec<i64>,
}

impl BarSeries {
    /// Builds the series for `kind`, preserving row order.
    ///
    /// # Errors
    ///
    /// Returns `RowError` if any row lacks the label or delay column.
    pub fn from_rows(kind: ChartKind, rows: &[FlightRow]) -> Result<Self, RowError> {
        let mut series = Self {
            labels: Vec::with_capacity(rows.len()),
            delays: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            series.labels.push(kind.label(row)?);
            series.delays.push(row.delay()?);
        }
        Ok(series)
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Y-axis range covering every delay and the zero baseline.
    pub fn delay_range(&self) -> std::ops::Range<i64> {
        let min = self.delays.iter().copied().min().unwrap_or(0).min(0);
        let max = self.delays.iter().copied().max().unwrap_or(0).max(0);
        min..max + 1
    }

    /// Length of the longest label, in characters.
    pub fn longest_label(&self) -> usize {
        self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(origin: &str, dest: &str, airline: &str, delay: serde_json::Value) -> FlightRow {
        let mut row = FlightRow::new();
        row.insert("ORIGIN_AIRPORT", json!(origin));
        row.insert("DESTINATION_AIRPORT", json!(dest));
        row.insert("AIRLINE", json!(airline));
        row.insert("DELAY", delay);
        row
    }

    fn rows() -> Vec<FlightRow> {
        vec![
            row("JFK", "LAX", "Delta Air Lines Inc.", json!(25)),
            row("LAX", "ORD", "American Airlines Inc.", json!(null)),
            row("ORD", "ATL", "Delta Air Lines Inc.", json!(-3)),
        ]
    }

    #[test]
    fn airline_series_labels_by_airline() {
        let series = BarSeries::from_rows(ChartKind::ByAirline, &rows()).unwrap();
        assert_eq!(
            series.labels,
            ["Delta Air Lines Inc.", "American Airlines Inc.", "Delta Air Lines Inc."]
        );
        assert_eq!(series.delays, [25, 0, -3]);
    }

    #[test]
    fn airport_series_labels_by_destination() {
        let series = BarSeries::from_rows(ChartKind::ByAirport, &rows()).unwrap();
        assert_eq!(series.labels, ["LAX", "ORD", "ATL"]);
    }

    #[test]
    fn date_series_labels_by_route() {
        let series = BarSeries::from_rows(ChartKind::ByDate, &rows()).unwrap();
        assert_eq!(series.labels, ["JFK->LAX", "LAX->ORD", "ORD->ATL"]);
    }

    #[test]
    fn delay_range_includes_baseline() {
        let series = BarSeries::from_rows(ChartKind::ByDate, &rows()).unwrap();
        assert_eq!(series.delay_range(), -3..26);

        let empty = BarSeries::default();
        assert_eq!(empty.delay_range(), 0..1);
    }

    #[test]
    fn missing_label_column_fails() {
        let mut bad = FlightRow::new();
        bad.insert("DELAY", json!(5));
        let err = BarSeries::from_rows(ChartKind::ByAirport, &[bad]).unwrap_err();
        assert_eq!(err, RowError::MissingColumn("DESTINATION_AIRPORT"));
    }
}
