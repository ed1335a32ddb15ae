//! Himmelblau test surface
//!
//! `f(x, y) = (x² + y − 11)² + (x + y² − 7)²` has four global minima with
//! value 0:
//!
//! | x          | y          |
//! |------------|------------|
//! | 3.0        | 2.0        |
//! | -2.805118  | 3.131312   |
//! | -3.779310  | -3.283186  |
//! | 3.584428   | -1.848126  |
//!
//! The trajectory chart draws it as a filled contour under the optimizer
//! paths.

/// Default half-width of the sampled square `[-bound, bound]²`.
pub const DEFAULT_BOUND: f64 = 6.0;

/// Default number of samples per axis.
pub const DEFAULT_RESOLUTION: usize = 400;

/// Default number of filled contour bands.
pub const DEFAULT_LEVELS: usize = 50;

/// Evaluate Himmelblau's function.
#[must_use]
pub fn himmelblau(x: f64, y: f64) -> f64 {
    (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2)
}

/// `n` evenly spaced samples from `start` to `end` inclusive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Himmelblau values sampled on a square grid.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Row-major: `values[row * xs.len() + col]` is `f(xs[col], ys[row])`
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl SurfaceGrid {
    /// Sample `resolution × resolution` points spanning `[-bound, bound]²`.
    #[must_use]
    pub fn evaluate(bound: f64, resolution: usize) -> Self {
        let xs = linspace(-bound, bound, resolution);
        let ys = xs.clone();

        let values: Vec<f64> = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| himmelblau(x, y)))
            .collect();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            xs,
            ys,
            values,
            min,
            max,
        }
    }

    /// Sample positions along x.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Sample positions along y.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Value at grid cell `(row, col)`.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.xs.len() + col]
    }

    /// Smallest sampled value.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest sampled value.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// `n + 1` band boundaries from `min` to `max`.
    #[must_use]
    pub fn levels(&self, n: usize) -> Vec<f64> {
        linspace(self.min, self.max, n + 1)
    }

    /// Filled band (`0..n`) containing `z`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn level_index(&self, z: f64, n: usize) -> usize {
        let span = self.max - self.min;
        if n == 0 || span <= 0.0 {
            return 0;
        }
        let t = ((z - self.min) / span).clamp(0.0, 1.0);
        ((t * n as f64) as usize).min(n - 1)
    }

    /// Iterate `(x, y, z)` over every sample.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.ys.iter().enumerate().flat_map(move |(row, &y)| {
            self.xs
                .iter()
                .enumerate()
                .map(move |(col, &x)| (x, y, self.value(row, col)))
        })
    }

    /// Spacing between neighbouring samples along each axis.
    #[must_use]
    pub fn cell_size(&self) -> (f64, f64) {
        let step = |v: &[f64]| if v.len() > 1 { v[1] - v[0] } else { 0.0 };
        (step(&self.xs), step(&self.ys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_minimum() {
        assert!(himmelblau(3.0, 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_other_minima_near_zero() {
        for (x, y) in [(-2.805_118, 3.131_312), (-3.779_310, -3.283_186), (3.584_428, -1.848_126)] {
            assert!(himmelblau(x, y) < 1e-6, "f({x}, {y}) = {}", himmelblau(x, y));
        }
    }

    #[test]
    fn test_known_value() {
        // (0² + 0 − 11)² + (0 + 0² − 7)² = 121 + 49
        assert!((himmelblau(0.0, 0.0) - 170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-6.0, 6.0, 400);
        assert_eq!(v.len(), 400);
        assert!((v[0] + 6.0).abs() < f64::EPSILON);
        assert!((v[399] - 6.0).abs() < 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn test_grid_matches_function() {
        let grid = SurfaceGrid::evaluate(6.0, 25);
        assert_eq!(grid.xs().len(), 25);
        assert_eq!(grid.samples().count(), 625);
        for (x, y, z) in grid.samples() {
            assert!((z - himmelblau(x, y)).abs() < f64::EPSILON);
        }
        assert!(grid.min() >= 0.0);
        assert!(grid.max() > grid.min());
    }

    #[test]
    fn test_grid_corner_is_maximum() {
        // Quartic growth puts the largest sample at the (6, 6) corner
        let grid = SurfaceGrid::evaluate(6.0, 11);
        assert!((grid.value(10, 10) - grid.max()).abs() < f64::EPSILON);
        assert!((grid.max() - himmelblau(6.0, 6.0)).abs() < 1e-6);
        assert!(grid.value(0, 0) < grid.max());
    }

    #[test]
    fn test_level_index_bounds() {
        let grid = SurfaceGrid::evaluate(6.0, 41);
        assert_eq!(grid.levels(50).len(), 51);
        assert_eq!(grid.level_index(grid.min(), 50), 0);
        assert_eq!(grid.level_index(grid.max(), 50), 49);
        assert_eq!(grid.level_index(-1.0, 50), 0);
        assert_eq!(grid.level_index(grid.max() * 2.0, 50), 49);
    }
}
