//! Chained Rosenbrock objective over `n` parameters
//!
//! `f(w) = Σ_{i<n-1} 100·(w[i+1] − w[i]²)² + (1 − w[i])²`, minimum 0 at
//! `w = (1, …, 1)`.

/// Objective value. Fewer than two parameters give 0.
#[must_use]
pub fn rosenbrock(params: &[f64]) -> f64 {
    params
        .windows(2)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            100.0 * (b - a * a).powi(2) + (1.0 - a).powi(2)
        })
        .sum()
}

/// Analytic gradient of [`rosenbrock`].
#[must_use]
pub fn rosenbrock_grad(params: &[f64]) -> Vec<f64> {
    let n = params.len();
    if n < 2 {
        return vec![0.0; n];
    }

    (0..n)
        .map(|i| {
            let w = params[i];
            // coupling to the previous parameter
            let back = if i > 0 {
                200.0 * (w - params[i - 1] * params[i - 1])
            } else {
                0.0
            };
            // coupling to the next parameter
            let forward = if i + 1 < n {
                -400.0 * w * (params[i + 1] - w * w) - 2.0 * (1.0 - w)
            } else {
                0.0
            };
            back + forward
        })
        .collect()
}
