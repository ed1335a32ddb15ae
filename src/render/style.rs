//! Figure sizing and palette shared by the chart routines
//!
//! Figures are specified in inches and points like a print layout, then
//! rasterized at the configured DPI.

use plotters::prelude::*;
use plotters::style::{FontDesc, FontStyle};
use std::ops::Range;

/// Physical figure size rasterized at a fixed DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    dpi: u32,
}

impl Figure {
    /// Figure of `width_in × height_in` inches at `dpi`.
    #[must_use]
    pub const fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    /// Canvas size in pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixels(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Length in typographic points converted to pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn px(&self, points: f64) -> i32 {
        (points * f64::from(self.dpi) / 72.0).round().max(1.0) as i32
    }

    /// Stroke width in pixels for a line of `points` thickness.
    #[must_use]
    pub fn stroke(&self, points: f64) -> u32 {
        self.px(points).unsigned_abs()
    }

    /// Sans-serif font of `points` size.
    #[must_use]
    pub fn font(&self, points: f64) -> FontDesc<'static> {
        ("sans-serif", f64::from(self.px(points))).into_font()
    }

    /// Bold sans-serif font of `points` size.
    #[must_use]
    pub fn bold(&self, points: f64) -> FontDesc<'static> {
        self.font(points).style(FontStyle::Bold)
    }
}

/// Method colours: baseline cyan, candidate red.
#[must_use]
pub const fn method_color(index: usize) -> RGBColor {
    if index % 2 == 0 {
        CYAN
    } else {
        RED
    }
}

/// `i`-th of `n` hues evenly spaced around the colour wheel.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn hue(i: usize, n: usize) -> HSLColor {
    let n = n.max(1);
    HSLColor((i % n) as f64 / n as f64, 0.65, 0.5)
}

/// Gray ramp colour of contour band `band` out of `levels` (black to white).
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn gray_band(band: usize, levels: usize) -> RGBColor {
    let t = if levels > 1 {
        band.min(levels - 1) as f64 / (levels - 1) as f64
    } else {
        0.5
    };
    let g = (t * 255.0).round() as u8;
    RGBColor(g, g, g)
}

/// Axis range covering `values` with `pad` fraction of headroom on each side.
///
/// Degenerate input (empty, non-finite, or a single value) still yields a
/// non-empty range.
#[must_use]
pub fn padded_range<I: IntoIterator<Item = f64>>(values: I, pad: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        let half = (lo.abs() * 0.05).max(0.5);
        return (lo - half)..(hi + half);
    }
    (lo - span * pad)..(hi + span * pad)
}

/// Pixel vertices of a five-pointed star centred on the origin, top point up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn star_vertices(radius: i32) -> Vec<(i32, i32)> {
    let outer = f64::from(radius);
    let inner = outer * 0.4;
    (0..10)
        .map(|k| {
            let r = if k % 2 == 0 { outer } else { inner };
            let angle = -std::f64::consts::FRAC_PI_2 + f64::from(k) * std::f64::consts::PI / 5.0;
            (
                (r * angle.cos()).round() as i32,
                (r * angle.sin()).round() as i32,
            )
        })
        .collect()
}
