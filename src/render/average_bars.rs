//! Average execution time per method, labelled with the value

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use super::style::{method_color, Figure};
use crate::{Error, Result};

/// Bar fill opacity
const BAR_ALPHA: f64 = 0.7;

/// Bar width in x units
const BAR_WIDTH: f64 = 0.8;

/// Gap between a bar top and its label, in data units (ms)
const LABEL_OFFSET: f64 = 1.0;

/// Text drawn above a bar.
#[must_use]
pub fn bar_label(mean_ms: f64) -> String {
    format!("{mean_ms:.1}ms")
}

/// Draw one bar per method with its mean time.
///
/// `averages[i]` belongs to `methods[i]`.
///
/// # Errors
///
/// Returns error if the slices differ in length, or drawing or writing the
/// PNG fails
#[allow(clippy::cast_precision_loss)]
pub fn render(path: &Path, methods: &[&str], averages: &[f64], dpi: u32) -> Result<()> {
    if methods.len() != averages.len() {
        return Err(Error::InvalidInput(format!(
            "{} methods but {} averages",
            methods.len(),
            averages.len()
        )));
    }

    let figure = Figure::new(10.0, 6.0, dpi);
    let root = BitMapBackend::new(path, figure.pixels()).into_drawing_area();
    root.fill(&WHITE)?;

    let n = methods.len().max(1);
    let top = averages
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    let y_max = (top + LABEL_OFFSET) * 1.15 + f64::EPSILON;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Execution Time Comparison", figure.font(14.0))
        .margin(figure.px(10.0))
        .x_label_area_size(figure.px(30.0))
        .y_label_area_size(figure.px(45.0))
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)?;

    let method_label = |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = i as usize;
        methods.get(idx).map(|m| (*m).to_string()).unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n * 2 + 1)
        .x_label_formatter(&method_label)
        .x_desc("Method")
        .y_desc("Average Time (ms)")
        .label_style(figure.font(10.0))
        .axis_desc_style(figure.font(12.0))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(WHITE.mix(0.0))
        .draw()?;

    chart.draw_series(averages.iter().enumerate().map(|(i, &mean)| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, mean)],
            method_color(i).mix(BAR_ALPHA).filled(),
        )
    }))?;

    let label_style = figure
        .bold(10.0)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(averages.iter().enumerate().map(|(i, &mean)| {
        Text::new(bar_label(mean), (i as f64, mean + LABEL_OFFSET), label_style.clone())
    }))?;

    root.present()?;
    info!(path = %path.display(), size = ?figure.pixels(), "wrote average execution time");
    Ok(())
}
