//! Convergence chart: one panel per method, one line per learning rate

use std::path::Path;

use plotters::prelude::*;
use tracing::{info, warn};

use super::style::{hue, padded_range, Figure};
use crate::aggregate::{curves_for_method, LossCurve};
use crate::Result;

/// Hues cycled through for learning-rate lines
const LINE_HUES: usize = 6;

/// Draw mean loss per step for each method side by side.
///
/// # Errors
///
/// Returns error if drawing or writing the PNG fails
#[allow(clippy::cast_precision_loss)]
pub fn render(path: &Path, curves: &[LossCurve], methods: &[&str], dpi: u32) -> Result<()> {
    let figure = Figure::new(12.0, 5.0, dpi);
    let root = BitMapBackend::new(path, figure.pixels()).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, methods.len().max(1)));
    for (panel, &method) in panels.iter().zip(methods) {
        let method_curves = curves_for_method(curves, method);
        if method_curves.is_empty() {
            warn!(method, "no trace rows for method; drawing empty panel");
        }

        let points = || method_curves.iter().flat_map(|c| c.points.iter());
        let x_range = padded_range(points().map(|p| p.step as f64), 0.02);
        let y_range = padded_range(points().map(|p| p.mean_loss), 0.05);

        let mut chart = ChartBuilder::on(panel)
            .caption(format!("{method} - Convergence"), figure.font(12.0))
            .margin(figure.px(8.0))
            .x_label_area_size(figure.px(24.0))
            .y_label_area_size(figure.px(40.0))
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Step")
            .y_desc("Loss")
            .label_style(figure.font(9.0))
            .axis_desc_style(figure.font(10.0))
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(WHITE)
            .draw()?;

        let legend_len = figure.px(16.0);
        for (i, curve) in method_curves.iter().enumerate() {
            let style = hue(i, LINE_HUES).stroke_width(figure.stroke(1.5));
            chart
                .draw_series(LineSeries::new(
                    curve.points.iter().map(|p| (p.step as f64, p.mean_loss)),
                    style,
                ))?
                .label(format!("{method} α={}", curve.lr))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], style));
        }

        if !method_curves.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .label_font(figure.font(9.0))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
    }

    root.present()?;
    info!(path = %path.display(), size = ?figure.pixels(), "wrote loss curves");
    Ok(())
}
