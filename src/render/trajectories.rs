//! Contour + trajectory chart
//!
//! Filled gray contour of the Himmelblau surface with a colorbar, overlaid
//! with every optimizer path and a star on each final iterate. Only the
//! highlighted learning rate gets legend entries so the legend stays at one
//! line per method.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use super::style::{gray_band, method_color, star_vertices, Figure};
use crate::aggregate::trajectories;
use crate::experiment::{ExperimentRow, LearningRate};
use crate::surface::SurfaceGrid;
use crate::Result;

/// Contour fill opacity
const CONTOUR_ALPHA: f64 = 0.8;

/// Trajectory line opacity
const PATH_ALPHA: f64 = 0.7;

/// Share of the canvas width given to the contour panel (rest is colorbar)
const MAIN_PANEL_SHARE: f64 = 0.86;

/// Inputs of the trajectory chart
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryPlot<'a> {
    /// Sampled surface
    pub grid: &'a SurfaceGrid,
    /// Number of filled bands
    pub levels: usize,
    /// Raw trace rows
    pub rows: &'a [ExperimentRow],
    /// Methods in colour order (baseline first)
    pub methods: &'a [&'a str],
    /// Learning rate whose paths get a legend label
    pub highlight_lr: f64,
}

/// Draw the contour, colorbar, and trajectories.
///
/// # Errors
///
/// Returns error if drawing or writing the PNG fails
#[allow(clippy::cast_possible_truncation)]
pub fn render(path: &Path, plot: &TrajectoryPlot<'_>, dpi: u32) -> Result<()> {
    let figure = Figure::new(12.0, 8.0, dpi);
    let (width, _) = figure.pixels();
    let root = BitMapBackend::new(path, figure.pixels()).into_drawing_area();
    root.fill(&WHITE)?;

    let split = (f64::from(width) * MAIN_PANEL_SHARE).round() as i32;
    let (main_area, bar_area) = root.split_horizontally(split);

    let grid = plot.grid;
    let x_min = grid.xs().first().copied().unwrap_or(-1.0);
    let x_max = grid.xs().last().copied().unwrap_or(1.0);
    let y_min = grid.ys().first().copied().unwrap_or(-1.0);
    let y_max = grid.ys().last().copied().unwrap_or(1.0);

    let mut chart = ChartBuilder::on(&main_area)
        .caption(
            "Optimizer Trajectories on Himmelblau Function",
            figure.bold(16.0),
        )
        .margin(figure.px(10.0))
        .x_label_area_size(figure.px(28.0))
        .y_label_area_size(figure.px(32.0))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let (dx, dy) = grid.cell_size();
    chart.draw_series(grid.samples().map(|(x, y, z)| {
        let band = grid.level_index(z, plot.levels);
        Rectangle::new(
            [
                ((x - dx / 2.0).max(x_min), (y - dy / 2.0).max(y_min)),
                ((x + dx / 2.0).min(x_max), (y + dy / 2.0).min(y_max)),
            ],
            gray_band(band, plot.levels).mix(CONTOUR_ALPHA).filled(),
        )
    }))?;

    chart
        .configure_mesh()
        .x_desc("X")
        .y_desc("Y")
        .label_style(figure.font(10.0))
        .axis_desc_style(figure.font(12.0))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(WHITE.mix(0.0))
        .draw()?;

    let legend_len = figure.px(16.0);
    let star_radius = figure.px(5.0);
    let mut labelled = false;
    for (m, &method) in plot.methods.iter().enumerate() {
        let color = method_color(m);
        let line = color.mix(PATH_ALPHA).stroke_width(figure.stroke(1.5));

        for trajectory in trajectories(plot.rows, method) {
            let series =
                chart.draw_series(LineSeries::new(trajectory.path.iter().copied(), line))?;
            if let Some(label) = legend_label(method, trajectory.lr, plot.highlight_lr) {
                labelled = true;
                series.label(label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + legend_len, y)], line)
                });
            }

            if let Some(end) = trajectory.final_point() {
                let outline: Vec<(i32, i32)> = star_vertices(star_radius)
                    .into_iter()
                    .chain(star_vertices(star_radius).into_iter().take(1))
                    .collect();
                chart.draw_series(std::iter::once(
                    EmptyElement::at(end)
                        + Polygon::new(star_vertices(star_radius), color.filled())
                        + PathElement::new(outline, BLACK.stroke_width(figure.stroke(0.5))),
                ))?;
            }
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .label_font(figure.font(10.0))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    draw_colorbar(&bar_area, grid, plot.levels, &figure)?;

    root.present()?;
    info!(path = %path.display(), size = ?figure.pixels(), "wrote trajectories");
    Ok(())
}

/// Legend text for a trajectory, or `None` unless `lr` is the highlighted rate.
#[must_use]
pub fn legend_label(method: &str, lr: LearningRate, highlight_lr: f64) -> Option<String> {
    lr.approx_eq(highlight_lr).then(|| format!("{method} α={lr}"))
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    grid: &SurfaceGrid,
    levels: usize,
    figure: &Figure,
) -> Result<()> {
    let bounds = grid.levels(levels);
    let (z_min, z_max) = (grid.min(), grid.max().max(grid.min() + f64::EPSILON));

    let mut bar = ChartBuilder::on(area)
        .margin_top(figure.px(40.0))
        .margin_bottom(figure.px(38.0))
        .margin_right(figure.px(6.0))
        .y_label_area_size(figure.px(40.0))
        .build_cartesian_2d(0.0..1.0, z_min..z_max)?;

    bar.draw_series(bounds.windows(2).enumerate().map(|(band, edge)| {
        Rectangle::new(
            [(0.0, edge[0]), (1.0, edge[1])],
            gray_band(band, levels).mix(CONTOUR_ALPHA).filled(),
        )
    }))?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc("Himmelblau Function Value")
        .label_style(figure.font(9.0))
        .axis_desc_style(figure.font(10.0))
        .draw()?;

    Ok(())
}
