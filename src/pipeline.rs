//! Run-to-completion report pipeline: load → aggregate → plot → summarize
//!
//! A failure aborts the run; charts written before it stay on disk.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::aggregate::{mean_loss_by_step, mean_time, TimingPivot};
use crate::config::ReportConfig;
use crate::experiment::{load_experiments, load_timings, ExperimentRow};
use crate::render::{self, TrajectoryPlot};
use crate::report::{ConsoleReport, SpeedupReport};
use crate::surface::SurfaceGrid;
use crate::Result;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Chart files, in render order
    pub charts: Vec<PathBuf>,
    /// Computed statistics
    pub speedup: SpeedupReport,
    /// Console summary text
    pub report: String,
}

/// Load both tables, write the four charts, and build the summary.
///
/// # Errors
///
/// Returns error if the configuration is invalid, an input is missing or
/// malformed, the timing table has duplicate or missing rows, or a chart
/// cannot be written
pub fn run(config: &ReportConfig) -> Result<RunOutcome> {
    config.validate()?;
    fs::create_dir_all(&config.plots_dir)?;

    let steps = load_experiments(config.experiments_path())?;
    let timings = load_timings(config.timing_path())?;
    let methods = config.methods();
    warn_missing_methods(&steps, &methods);

    let chart_path = |name: &str| config.plots_dir.join(name);
    let mut charts = Vec::with_capacity(render::CHART_FILES.len());

    let curves = mean_loss_by_step(&steps);
    let path = chart_path(render::LOSS_CURVES_FILE);
    render::loss_curves::render(&path, &curves, &methods, config.dpi)?;
    charts.push(path);

    let grid = SurfaceGrid::evaluate(config.surface_bound, config.surface_resolution);
    let plot = TrajectoryPlot {
        grid: &grid,
        levels: config.contour_levels,
        rows: &steps,
        methods: &methods,
        highlight_lr: config.highlight_lr,
    };
    let path = chart_path(render::TRAJECTORIES_FILE);
    render::trajectories::render(&path, &plot, config.dpi)?;
    charts.push(path);

    let pivot = TimingPivot::from_rows(&timings)?;
    let path = chart_path(render::EXECUTION_TIME_BY_LR_FILE);
    render::timing_bars::render(&path, &pivot, config.dpi)?;
    charts.push(path);

    let averages = methods
        .iter()
        .map(|m| mean_time(&timings, m))
        .collect::<Result<Vec<_>>>()?;
    let path = chart_path(render::AVERAGE_EXECUTION_TIME_FILE);
    render::average_bars::render(&path, &methods, &averages, config.dpi)?;
    charts.push(path);

    let speedup = SpeedupReport::compute(
        &timings,
        &pivot,
        &config.baseline_method,
        &config.candidate_method,
    )?;
    let report = ConsoleReport {
        pivot: &pivot,
        speedup: &speedup,
        plots_dir: &config.plots_dir,
    }
    .to_string();

    info!(
        charts = charts.len(),
        overall_speedup = speedup.overall_speedup,
        "report complete"
    );

    Ok(RunOutcome {
        charts,
        speedup,
        report,
    })
}

fn warn_missing_methods(steps: &[ExperimentRow], methods: &[&str]) {
    for method in methods {
        if !steps.iter().any(|r| r.method() == *method) {
            warn!(method, "method has no trace rows");
        }
    }
}
