//! Chart rendering (plotters bitmap backend)
//!
//! Four independent routines, each writing one PNG:
//!
//! | File                         | Routine                  |
//! |------------------------------|--------------------------|
//! | `loss_curves.png`            | [`loss_curves::render`]  |
//! | `trajectories.png`           | [`trajectories::render`] |
//! | `execution_time_by_lr.png`   | [`timing_bars::render`]  |
//! | `average_execution_time.png` | [`average_bars::render`] |
//!
//! None reads another's output, so they can run in any order.

pub mod average_bars;
pub mod loss_curves;
pub mod style;
pub mod timing_bars;
pub mod trajectories;

pub use average_bars::bar_label;
pub use style::Figure;
pub use trajectories::TrajectoryPlot;

/// Convergence chart file name
pub const LOSS_CURVES_FILE: &str = "loss_curves.png";

/// Contour + trajectory chart file name
pub const TRAJECTORIES_FILE: &str = "trajectories.png";

/// Grouped timing chart file name
pub const EXECUTION_TIME_BY_LR_FILE: &str = "execution_time_by_lr.png";

/// Average timing chart file name
pub const AVERAGE_EXECUTION_TIME_FILE: &str = "average_execution_time.png";

/// All chart file names in render order
pub const CHART_FILES: [&str; 4] = [
    LOSS_CURVES_FILE,
    TRAJECTORIES_FILE,
    EXECUTION_TIME_BY_LR_FILE,
    AVERAGE_EXECUTION_TIME_FILE,
];
