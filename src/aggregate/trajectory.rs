//! Optimizer trajectories in the `(x, y)` plane

use crate::experiment::{ExperimentRow, LearningRate};

/// Ordered iterate positions of one `(method, lr)` run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Learning rate of the run
    pub lr: LearningRate,
    /// Iterates in file order
    pub path: Vec<(f64, f64)>,
}

impl Trajectory {
    /// Position after the last logged step.
    #[must_use]
    pub fn final_point(&self) -> Option<(f64, f64)> {
        self.path.last().copied()
    }
}

/// Trajectories of `method`, one per learning rate in order of first
/// appearance.
#[must_use]
pub fn trajectories(rows: &[ExperimentRow], method: &str) -> Vec<Trajectory> {
    let mut out: Vec<Trajectory> = Vec::new();

    for row in rows.iter().filter(|r| r.method() == method) {
        let point = (row.x(), row.y());
        match out.iter_mut().find(|t| t.lr == row.lr()) {
            Some(trajectory) => trajectory.path.push(point),
            None => out.push(Trajectory {
                lr: row.lr(),
                path: vec![point],
            }),
        }
    }

    out
}
