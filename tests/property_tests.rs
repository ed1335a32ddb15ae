//! Property-based tests for the aggregation layer
//!
//! - Mean loss stays within the min/max of its group
//! - Sample counts add up to the input row count
//! - Pivot cells agree with the rows they came from
//! - Run with ProptestConfig::with_cases(100)

use optim_trace_report::aggregate::{mean_loss_by_step, mean_time, trajectories, TimingPivot};
use optim_trace_report::experiment::{ExperimentRow, LearningRate, TimingRow};
use optim_trace_report::report::{speedup, time_reduction_pct};
use optim_trace_report::surface::{himmelblau, SurfaceGrid};
use optim_trace_report::Error;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

const METHODS: [&str; 2] = ["Adam_Sequential", "Adam_Parallel"];
const LRS: [f64; 3] = [0.1, 0.01, 0.001];

fn arb_trace_row() -> impl Strategy<Value = ExperimentRow> {
    (
        0usize..METHODS.len(),
        0usize..LRS.len(),
        0i64..20,
        -6.0f64..6.0,
        -6.0f64..6.0,
        0.0f64..500.0,
    )
        .prop_map(|(m, l, step, x, y, loss)| {
            ExperimentRow::new(METHODS[m], LRS[l], step, x, y, loss)
        })
}

/// Timing rows with every `(method, lr)` pair present exactly once
fn arb_full_timing() -> impl Strategy<Value = Vec<TimingRow>> {
    proptest::collection::vec(1.0f64..1000.0, METHODS.len() * LRS.len()).prop_map(|times| {
        let mut rows = Vec::with_capacity(times.len());
        for (i, ms) in times.into_iter().enumerate() {
            rows.push(TimingRow::new(METHODS[i % METHODS.len()], LRS[i / METHODS.len()], ms));
        }
        rows
    })
}

// ============================================================================
// Mean loss
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every step mean lies between the smallest and largest loss it averages
    #[test]
    fn prop_step_mean_bounded(rows in proptest::collection::vec(arb_trace_row(), 1..200)) {
        for curve in mean_loss_by_step(&rows) {
            for point in &curve.points {
                let losses: Vec<f64> = rows
                    .iter()
                    .filter(|r| {
                        r.method() == curve.method && r.lr() == curve.lr && r.step() == point.step
                    })
                    .map(ExperimentRow::loss)
                    .collect();
                let lo = losses.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = losses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert_eq!(losses.len(), point.samples);
                prop_assert!(point.mean_loss >= lo - 1e-9);
                prop_assert!(point.mean_loss <= hi + 1e-9);
            }
        }
    }

    /// No row is dropped or counted twice
    #[test]
    fn prop_samples_sum_to_rows(rows in proptest::collection::vec(arb_trace_row(), 0..200)) {
        let total: usize = mean_loss_by_step(&rows)
            .iter()
            .flat_map(|c| c.points.iter())
            .map(|p| p.samples)
            .sum();
        prop_assert_eq!(total, rows.len());
    }

    /// Steps within a curve are strictly ascending
    #[test]
    fn prop_curve_steps_ascending(rows in proptest::collection::vec(arb_trace_row(), 1..200)) {
        for curve in mean_loss_by_step(&rows) {
            for pair in curve.points.windows(2) {
                prop_assert!(pair[0].step < pair[1].step);
            }
        }
    }

    /// Trajectories keep every row of their method
    #[test]
    fn prop_trajectories_partition_rows(
        rows in proptest::collection::vec(arb_trace_row(), 0..200)
    ) {
        for method in METHODS {
            let points: usize = trajectories(&rows, method).iter().map(|t| t.path.len()).sum();
            let expected = rows.iter().filter(|r| r.method() == method).count();
            prop_assert_eq!(points, expected);
        }
    }
}

// ============================================================================
// Timing pivot and speedup
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each pivot cell holds exactly the time of its source row
    #[test]
    fn prop_pivot_cells_match_rows(rows in arb_full_timing()) {
        let pivot = TimingPivot::from_rows(&rows).unwrap();
        prop_assert_eq!(pivot.methods().len(), METHODS.len());
        prop_assert_eq!(pivot.learning_rates().len(), LRS.len());
        for row in &rows {
            prop_assert_eq!(pivot.get(row.method(), row.lr()), Some(row.execution_time_ms()));
        }
    }

    /// Repeating any row makes the pivot fail
    #[test]
    fn prop_pivot_rejects_duplicates(rows in arb_full_timing(), pick in 0usize..6) {
        let mut rows = rows;
        let dup = rows[pick].clone();
        rows.push(dup);
        let is_duplicate = matches!(
            TimingPivot::from_rows(&rows),
            Err(Error::DuplicateTiming { .. })
        );
        prop_assert!(is_duplicate);
    }

    /// The mean lies between the method's fastest and slowest run
    #[test]
    fn prop_mean_time_bounded(rows in arb_full_timing()) {
        for method in METHODS {
            let times: Vec<f64> = rows
                .iter()
                .filter(|r| r.method() == method)
                .map(TimingRow::execution_time_ms)
                .collect();
            let mean = mean_time(&rows, method).unwrap();
            let lo = times.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
        }
    }

    /// Speedup above one exactly when time is saved
    #[test]
    fn prop_speedup_agrees_with_reduction(b in 1.0f64..1000.0, c in 1.0f64..1000.0) {
        let s = speedup(b, c);
        let r = time_reduction_pct(b, c);
        prop_assert!(s > 0.0);
        prop_assert_eq!(s > 1.0, r > 0.0);
        prop_assert!((r - (1.0 - 1.0 / s) * 100.0).abs() < 1e-6);
    }
}

// ============================================================================
// Surface
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Himmelblau is a sum of squares
    #[test]
    fn prop_himmelblau_non_negative(x in -10.0f64..10.0, y in -10.0f64..10.0) {
        prop_assert!(himmelblau(x, y) >= 0.0);
    }

    /// Every grid value falls in a valid band
    #[test]
    fn prop_level_index_in_range(resolution in 2usize..30, levels in 1usize..60) {
        let grid = SurfaceGrid::evaluate(6.0, resolution);
        for (_, _, z) in grid.samples() {
            prop_assert!(grid.level_index(z, levels) < levels);
        }
    }

    /// Learning rates compare by value
    #[test]
    fn prop_learning_rate_ordering(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (la, lb) = (LearningRate::new(a), LearningRate::new(b));
        prop_assert_eq!(la < lb, a < b);
        prop_assert_eq!(la == lb, a.to_bits() == b.to_bits());
    }
}
