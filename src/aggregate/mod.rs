//! Grouped aggregates over benchmark rows
//!
//! - [`loss`]: mean loss per `(method, lr, step)` for the convergence chart
//! - [`trajectory`]: raw iterate paths for the contour overlay
//! - [`pivot`]: wide timing table and per-method mean times

pub mod loss;
pub mod pivot;
pub mod trajectory;

pub use loss::{curves_for_method, mean_loss_by_step, LossCurve, StepMean};
pub use pivot::{mean_time, TimingPivot};
pub use trajectory::{trajectories, Trajectory};
