//! Mean loss per step
//!
//! Repeated trials logged at the same `(method, lr, step)` collapse to one
//! point carrying their arithmetic mean.

use std::collections::BTreeMap;

use tracing::debug;

use crate::experiment::{ExperimentRow, LearningRate};

/// Mean loss of all rows logged at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMean {
    /// Step number
    pub step: i64,
    /// Arithmetic mean of the loss values at this step
    pub mean_loss: f64,
    /// Number of rows averaged
    pub samples: usize,
}

/// Convergence curve of one `(method, lr)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct LossCurve {
    /// Optimizer method name
    pub method: String,
    /// Learning rate
    pub lr: LearningRate,
    /// One point per distinct step, ascending
    pub points: Vec<StepMean>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Group rows by `(method, lr, step)` and average the loss.
///
/// Curves come back ordered by method name, then learning rate.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_loss_by_step(rows: &[ExperimentRow]) -> Vec<LossCurve> {
    let mut groups: BTreeMap<(&str, LearningRate), BTreeMap<i64, Accumulator>> = BTreeMap::new();

    for row in rows {
        let acc = groups
            .entry((row.method(), row.lr()))
            .or_default()
            .entry(row.step())
            .or_default();
        acc.sum += row.loss();
        acc.count += 1;
    }

    let curves: Vec<LossCurve> = groups
        .into_iter()
        .map(|((method, lr), steps)| LossCurve {
            method: method.to_string(),
            lr,
            points: steps
                .into_iter()
                .map(|(step, acc)| StepMean {
                    step,
                    mean_loss: acc.sum / acc.count as f64,
                    samples: acc.count,
                })
                .collect(),
        })
        .collect();

    debug!(rows = rows.len(), curves = curves.len(), "aggregated loss curves");
    curves
}

/// Curves belonging to one method, in learning-rate order.
#[must_use]
pub fn curves_for_method<'a>(curves: &'a [LossCurve], method: &str) -> Vec<&'a LossCurve> {
    curves.iter().filter(|c| c.method == method).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(method: &str, lr: f64, step: i64, loss: f64) -> ExperimentRow {
        ExperimentRow::new(method, lr, step, 0.0, 0.0, loss)
    }

    #[test]
    fn test_repeated_steps_are_averaged() {
        let rows = vec![
            row("Adam_Sequential", 0.1, 1, 4.0),
            row("Adam_Sequential", 0.1, 1, 6.0),
            row("Adam_Sequential", 0.1, 2, 3.0),
        ];

        let curves = mean_loss_by_step(&rows);
        assert_eq!(curves.len(), 1);
        assert_eq!(
            curves[0].points,
            vec![
                StepMean { step: 1, mean_loss: 5.0, samples: 2 },
                StepMean { step: 2, mean_loss: 3.0, samples: 1 },
            ]
        );
    }

    #[test]
    fn test_steps_sorted_even_when_input_is_not() {
        let rows = vec![
            row("Adam_Parallel", 0.01, 3, 1.0),
            row("Adam_Parallel", 0.01, 1, 3.0),
            row("Adam_Parallel", 0.01, 2, 2.0),
        ];

        let curves = mean_loss_by_step(&rows);
        let steps: Vec<i64> = curves[0].points.iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn test_groups_split_by_method_and_lr() {
        let rows = vec![
            row("Adam_Sequential", 0.1, 1, 1.0),
            row("Adam_Parallel", 0.1, 1, 2.0),
            row("Adam_Sequential", 0.01, 1, 3.0),
        ];

        let curves = mean_loss_by_step(&rows);
        let keys: Vec<(&str, f64)> = curves
            .iter()
            .map(|c| (c.method.as_str(), c.lr.value()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Adam_Parallel", 0.1),
                ("Adam_Sequential", 0.01),
                ("Adam_Sequential", 0.1),
            ]
        );

        let sequential = curves_for_method(&curves, "Adam_Sequential");
        assert_eq!(sequential.len(), 2);
        assert!(sequential[0].lr < sequential[1].lr);
    }

    #[test]
    fn test_empty_input_yields_no_curves() {
        assert!(mean_loss_by_step(&[]).is_empty());
    }
}
