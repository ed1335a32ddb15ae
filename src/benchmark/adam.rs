//! Adam optimizer with bias-corrected moment estimates

/// Adam hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamParams {
    /// Step size `α`
    pub lr: f64,
    /// First-moment decay `β₁`
    pub beta1: f64,
    /// Second-moment decay `β₂`
    pub beta2: f64,
    /// Denominator guard `ε`
    pub eps: f64,
}

impl Default for AdamParams {
    fn default() -> Self {
        Self {
            lr: 0.01,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
        }
    }
}

/// Optimizer state for one parameter vector.
///
/// One instance per point; the batch run keeps a separate `Adam` for each
/// point so points can be stepped on different threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Adam {
    params: AdamParams,
    m: Vec<f64>,
    v: Vec<f64>,
}

impl Adam {
    /// Optimizer for `dim` parameters with default betas and step size `lr`.
    #[must_use]
    pub fn new(dim: usize, lr: f64) -> Self {
        Self::with_params(
            dim,
            AdamParams {
                lr,
                ..AdamParams::default()
            },
        )
    }

    /// Optimizer for `dim` parameters with explicit hyperparameters.
    #[must_use]
    pub fn with_params(dim: usize, params: AdamParams) -> Self {
        Self {
            params,
            m: vec![0.0; dim],
            v: vec![0.0; dim],
        }
    }

    /// Hyperparameters.
    #[must_use]
    pub const fn params(&self) -> AdamParams {
        self.params
    }

    /// Apply update number `t` (1-based) to `w` in place.
    ///
    /// `w`, `grad` and the optimizer must share a dimension; extra entries in
    /// the longer slice are left untouched.
    pub fn step(&mut self, w: &mut [f64], grad: &[f64], t: i32) {
        let AdamParams {
            lr,
            beta1,
            beta2,
            eps,
        } = self.params;
        let m_correction = 1.0 - beta1.powi(t);
        let v_correction = 1.0 - beta2.powi(t);

        for (((w, g), m), v) in w
            .iter_mut()
            .zip(grad)
            .zip(self.m.iter_mut())
            .zip(self.v.iter_mut())
        {
            *m = beta1 * *m + (1.0 - beta1) * g;
            *v = beta2 * *v + (1.0 - beta2) * g * g;
            let m_hat = *m / m_correction;
            let v_hat = *v / v_correction;
            *w -= lr * m_hat / (v_hat.sqrt() + eps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_moves_by_lr_against_gradient() {
        let mut opt = Adam::new(2, 0.1);
        let mut w = [1.0, -1.0];

        opt.step(&mut w, &[4.0, -0.5], 1);

        assert!((w[0] - 0.9).abs() < 1e-6);
        assert!((w[1] + 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_constant_gradient_moves_lr_per_step() {
        let mut opt = Adam::new(1, 0.01);
        let mut w = [0.0];
        for t in 1..=3 {
            opt.step(&mut w, &[2.0], t);
        }
        assert!((w[0] + 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_second_step_uses_accumulated_moments() {
        let p = AdamParams::default();
        let mut opt = Adam::with_params(1, p);
        let mut w = [0.0];
        opt.step(&mut w, &[1.0], 1);
        let after_first = w[0];
        opt.step(&mut w, &[-3.0], 2);

        let m = p.beta1 * (1.0 - p.beta1) * 1.0 + (1.0 - p.beta1) * -3.0;
        let v = p.beta2 * (1.0 - p.beta2) * 1.0 + (1.0 - p.beta2) * 9.0;
        let m_hat = m / (1.0 - p.beta1.powi(2));
        let v_hat = v / (1.0 - p.beta2.powi(2));
        let expected = after_first - p.lr * m_hat / (v_hat.sqrt() + p.eps);
        assert!((w[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_gradient_is_a_no_op() {
        let mut opt = Adam::new(3, 0.1);
        let mut w = [0.5, -2.0, 3.0];
        opt.step(&mut w, &[0.0, 0.0, 0.0], 1);
        assert_eq!(w, [0.5, -2.0, 3.0]);
    }

    #[test]
    fn test_default_hyperparameters() {
        let p = Adam::new(4, 0.001).params();
        assert!((p.lr - 0.001).abs() < f64::EPSILON);
        assert!((p.beta1 - 0.9).abs() < f64::EPSILON);
        assert!((p.beta2 - 0.999).abs() < f64::EPSILON);
        assert!((p.eps - 1e-8).abs() < f64::EPSILON);
    }
}
