//! Chart rendering for the dashboard page.
//!
//! Draws the four delta series as a 2x2 grid of line charts and encodes
//! the document for inline embedding, so the page needs no server-side
//! image files.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::full_palette::ORANGE;

use crate::data::{Entity, SeriesSnapshot};
use crate::error::RenderError;

/// Rendered chart dimensions in pixels.
const WIDTH: u32 = 900;
const HEIGHT: u32 = 620;

/// Panel order, titles and line colors, top-left to bottom-right.
///
/// The candidates panel keeps its historical bare title.
const PANELS: [(Entity, &str, RGBColor); 4] = [
    (Entity::Chunks, "Chunks/min", BLUE),
    (Entity::Clones, "Clones/min", ORANGE),
    (Entity::Files, "Files/min", GREEN),
    (Entity::Candidates, "Candidates", RED),
];

/// Render the delta chart as an SVG document.
///
/// Each panel plots one entity's recorded deltas against the sample index
/// (ticks with no change record no point, so the x axis is not wall-clock
/// aligned). Empty series produce empty axes rather than an error.
pub fn render(snapshot: &SeriesSnapshot) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let areas = root.split_evenly((2, 2));
        for ((entity, title, color), area) in PANELS.iter().zip(areas.iter()) {
            draw_panel(area, snapshot.series(*entity), title, color)?;
        }

        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    series: &[u64],
    title: &str,
    color: &RGBColor,
) -> Result<(), RenderError> {
    let x_end = series.len().max(1) as i32;
    let y_end = series.iter().copied().max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(8)
        .x_label_area_size(28)
        .y_label_area_size(44)
        .build_cartesian_2d(0..x_end, 0..y_end)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("min")
        .y_desc("items processed")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, &v)| (i as i32, v)),
            color,
        ))
        .map_err(draw_err)?;

    Ok(())
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// Encode a rendered document as a data URI for an `<img>` tag.
pub fn data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg))
}
