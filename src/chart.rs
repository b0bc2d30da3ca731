//! Chart rendering.
//!
//! Draws a set of named series as connected lines with point markers and
//! writes one PNG artifact. Axis semantics come from the report's
//! [`ChartSpec`]; the gridline style is a fixed house style shared by every
//! report. Any existing file at the output path is overwritten.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::error::ReportError;
use crate::schema::{ChartSpec, XScale};
use crate::series::Series;

const BOLD_GRID: RGBColor = RGBColor(170, 170, 170);
const LIGHT_GRID: RGBColor = RGBColor(220, 220, 220);
const MARKER_SIZE: u32 = 3;

/// Render `series` to a PNG at `path`.
pub fn render(series: &[Series], spec: &ChartSpec, path: &Path) -> Result<(), ReportError> {
    let (x_min, x_max, y_max) = bounds(series);
    debug!(
        series = series.len(),
        points = series.iter().map(|s| s.points.len()).sum::<usize>(),
        output = %path.display(),
        "rendering chart"
    );

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    let show_legend = spec.legend && series.len() > 1;

    match spec.x_scale {
        XScale::ErrorRate => {
            // Descending log axis: the leftmost x is the largest (least
            // precise) error rate.
            let mut chart = ChartBuilder::on(&root)
                .caption(spec.title, ("sans-serif", 24))
                .margin(20)
                .set_label_area_size(LabelAreaPosition::Left, 70)
                .set_label_area_size(LabelAreaPosition::Bottom, 45)
                .build_cartesian_2d(((x_max * 1.2)..(x_min / 1.2)).log_scale(), 0.0..y_top)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc(spec.x_label)
                .y_desc(spec.y_label)
                .bold_line_style(BOLD_GRID.mix(0.6))
                .light_line_style(LIGHT_GRID.mix(0.6))
                .draw()
                .map_err(render_err)?;

            for (idx, s) in series.iter().enumerate() {
                let color = Palette99::pick(idx).to_rgba();
                let drawn = chart
                    .draw_series(
                        LineSeries::new(s.points.iter().copied(), color)
                            .point_size(MARKER_SIZE),
                    )
                    .map_err(render_err)?;
                if show_legend {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color)
                    });
                }
            }

            if show_legend {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(render_err)?;
            }
        }
        XScale::Linear => {
            let pad = ((x_max - x_min) * 0.05).max(1.0);
            let mut chart = ChartBuilder::on(&root)
                .caption(spec.title, ("sans-serif", 24))
                .margin(20)
                .set_label_area_size(LabelAreaPosition::Left, 70)
                .set_label_area_size(LabelAreaPosition::Bottom, 45)
                .build_cartesian_2d((x_min - pad)..(x_max + pad), 0.0..y_top)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc(spec.x_label)
                .y_desc(spec.y_label)
                .bold_line_style(BOLD_GRID.mix(0.6))
                .light_line_style(LIGHT_GRID.mix(0.6))
                .draw()
                .map_err(render_err)?;

            for (idx, s) in series.iter().enumerate() {
                let color = Palette99::pick(idx).to_rgba();
                let drawn = chart
                    .draw_series(
                        LineSeries::new(s.points.iter().copied(), color)
                            .point_size(MARKER_SIZE),
                    )
                    .map_err(render_err)?;
                if show_legend {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color)
                    });
                }
            }

            if show_legend {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(render_err)?;
            }
        }
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn bounds(series: &[Series]) -> (f64, f64, f64) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }
    if !x_min.is_finite() || !x_max.is_finite() {
        (1e-3, 1.0, 1.0)
    } else {
        (x_min, x_max, y_max)
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Render(err.to_string())
}
