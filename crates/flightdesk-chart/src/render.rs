//! SVG bar-chart drawing.

use crate::series::{BarSeries, ChartKind};
use crate::ChartError;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::Path;

const CHART_HEIGHT: u32 = 600;
const BAR_WIDTH: u32 = 40;

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Draws `series` as a bar chart into an SVG file at `path`.
///
/// Category tick labels are rotated so long airline names and routes stay
/// readable.
///
/// # Errors
///
/// Returns `ChartError::EmptySeries` for an empty series, or
/// `ChartError::Draw` if the backend fails.
pub fn render_bar_chart(kind: ChartKind, series: &BarSeries, path: &Path) -> Result<(), ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let bars = series.len();
    let width = (bars as u32).saturating_mul(BAR_WIDTH).saturating_add(200).clamp(640, 4_000);
    let label_area = (series.longest_label() as u32 * 7 + 24).clamp(48, 240);

    let root = SVGBackend::new(path, (width, CHART_HEIGHT + label_area)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(label_area)
        .y_label_area_size(64)
        .build_cartesian_2d((0..bars).into_segmented(), series.delay_range())
        .map_err(draw_err)?;

    let label_for = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(idx) => series.labels.get(*idx).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(kind.x_desc())
        .y_desc("Delay (minutes)")
        .x_labels(bars)
        .x_label_formatter(&label_for)
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(2)
                .data(series.delays.iter().enumerate().map(|(idx, delay)| (idx, *delay))),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
