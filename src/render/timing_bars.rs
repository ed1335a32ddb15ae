//! Grouped bar chart of execution time per method and learning rate

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use super::style::{hue, Figure};
use crate::aggregate::TimingPivot;
use crate::Result;

/// Width of one method's bar group in x units
const GROUP_WIDTH: f64 = 0.8;

/// Draw one bar group per method, one bar per learning rate.
///
/// # Errors
///
/// Returns error if drawing or writing the PNG fails
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn render(path: &Path, pivot: &TimingPivot, dpi: u32) -> Result<()> {
    let figure = Figure::new(12.0, 8.0, dpi);
    let root = BitMapBackend::new(path, figure.pixels()).into_drawing_area();
    root.fill(&WHITE)?;

    let methods = pivot.methods();
    let lrs = pivot.learning_rates();
    let n_methods = methods.len().max(1);
    let y_max = pivot.max_value().filter(|v| *v > 0.0).unwrap_or(1.0) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Execution Time by Method and Learning Rate", figure.font(14.0))
        .margin(figure.px(10.0))
        .x_label_area_size(figure.px(30.0))
        .y_label_area_size(figure.px(45.0))
        .build_cartesian_2d(-0.5..(n_methods as f64 - 0.5), 0.0..y_max)?;

    let method_label = |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        methods.get(i as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_methods * 2 + 1)
        .x_label_formatter(&method_label)
        .x_desc("Method")
        .y_desc("Execution Time (ms)")
        .label_style(figure.font(10.0))
        .axis_desc_style(figure.font(12.0))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(WHITE.mix(0.0))
        .draw()?;

    // Legend heading
    chart
        .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
        .label("Learning Rate")
        .legend(|(x, y)| EmptyElement::at((x, y)));

    let bar_width = GROUP_WIDTH / lrs.len().max(1) as f64;
    let swatch = figure.px(5.0);
    for (j, lr) in lrs.iter().enumerate() {
        let style = hue(j, lrs.len()).filled();
        let bars = methods.iter().enumerate().filter_map(|(i, method)| {
            let value = pivot.get(method, *lr)?;
            let x0 = i as f64 - GROUP_WIDTH / 2.0 + j as f64 * bar_width;
            Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, value)], style))
        });

        chart
            .draw_series(bars)?
            .label(lr.to_string())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], style)
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(figure.font(10.0))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    info!(path = %path.display(), size = ?figure.pixels(), "wrote execution time by learning rate");
    Ok(())
}
