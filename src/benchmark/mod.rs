//! Optimizer benchmark that produces the report's input tables
//!
//! For every learning rate two runs are timed over the same workload:
//!
//! - **sequential** (`Adam_Sequential`): points are optimized one after the
//!   other; every step of the first point is logged
//! - **parallel** (`Adam_Parallel`): all points advance together, one step at a
//!   time, with the points of a step spread across the rayon pool; every
//!   `parallel_log_every`-th step of the first point is logged
//!
//! The objective is the chained Rosenbrock function ([`objective`]); the
//! logged `x`/`y` are the first two parameters.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use optim_trace_report::benchmark::{self, BenchmarkConfig};
//! use optim_trace_report::config::ReportConfig;
//!
//! let results = benchmark::run(&BenchmarkConfig::default())?;
//! results.write(&ReportConfig::default())?;
//! # Ok::<(), optim_trace_report::Error>(())
//! ```

pub mod adam;
pub mod objective;

pub use adam::{Adam, AdamParams};
pub use objective::{rosenbrock, rosenbrock_grad};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{read_json, ReportConfig, DEFAULT_BASELINE_METHOD, DEFAULT_CANDIDATE_METHOD};
use crate::experiment::{ExperimentRow, TimingRow};
use crate::{Error, Result};

/// Optional benchmark configuration file looked up in the working directory
pub const BENCH_CONFIG_FILE: &str = "optim-bench.json";

/// Workload shared by both runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Step sizes to benchmark, in output order
    pub learning_rates: Vec<f64>,
    /// Adam updates per point
    pub steps: u32,
    /// Independent starting points per run
    pub points: usize,
    /// Parameters per point
    pub params: usize,
    /// Seed of the starting-point generator
    pub seed: u64,
    /// Starting parameters are drawn uniformly from `[-init_range, init_range)`
    pub init_range: f64,
    /// Parallel run logs every n-th step
    pub parallel_log_every: u32,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            learning_rates: vec![0.1, 0.01, 0.001],
            steps: 100,
            points: 50,
            params: 20,
            seed: 181_763_002,
            init_range: 5.0,
            parallel_log_every: 10,
        }
    }
}

impl BenchmarkConfig {
    /// Read `path` when it exists, otherwise fall back to the defaults
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read, parsed or
    /// validated
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            read_json(path)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the workload is runnable
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` describing the first violated setting
    pub fn validate(&self) -> Result<()> {
        if self.learning_rates.is_empty() {
            return Err(Error::InvalidInput("no learning rates configured".to_string()));
        }
        if let Some(lr) = self
            .learning_rates
            .iter()
            .find(|lr| !(lr.is_finite() && **lr > 0.0))
        {
            return Err(Error::InvalidInput(format!(
                "learning rate must be positive, got {lr}"
            )));
        }
        if self.steps == 0 || self.points == 0 || self.parallel_log_every == 0 {
            return Err(Error::InvalidInput(
                "steps, points and log interval must be positive".to_string(),
            ));
        }
        if i32::try_from(self.steps).is_err() {
            return Err(Error::InvalidInput(format!("too many steps: {}", self.steps)));
        }
        if self.params < 2 {
            return Err(Error::InvalidInput(format!(
                "need at least 2 parameters for x/y traces, got {}",
                self.params
            )));
        }
        if !(self.init_range.is_finite() && self.init_range > 0.0) {
            return Err(Error::InvalidInput(format!(
                "init range must be positive, got {}",
                self.init_range
            )));
        }
        Ok(())
    }
}

/// Rows produced by one benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkResults {
    /// Per-step trace rows, in generation order
    pub trace: Vec<ExperimentRow>,
    /// One timing row per method and learning rate
    pub timings: Vec<TimingRow>,
}

impl BenchmarkResults {
    /// Write both tables where `config` expects to read them.
    ///
    /// Returns the experiments and timing paths.
    ///
    /// # Errors
    ///
    /// Returns error if the results directory or a file cannot be written
    pub fn write(&self, config: &ReportConfig) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&config.results_dir)?;

        let experiments = config.experiments_path();
        ExperimentRow::to_table(&self.trace)?.write_csv(&experiments)?;

        let timing = config.timing_path();
        TimingRow::to_table(&self.timings)?.write_csv(&timing)?;

        Ok((experiments, timing))
    }
}

/// Run both methods at every configured learning rate.
///
/// Starting points are drawn from one seeded stream, sequential run first,
/// so the trace rows are identical across runs with the same seed. Only the
/// timings vary.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the configuration is invalid
pub fn run(config: &BenchmarkConfig) -> Result<BenchmarkResults> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut trace = Vec::new();
    let mut timings = Vec::with_capacity(config.learning_rates.len() * 2);

    for &lr in &config.learning_rates {
        let sequential_ms = run_sequential(config, lr, &mut rng, &mut trace);
        timings.push(TimingRow::new(DEFAULT_BASELINE_METHOD, lr, sequential_ms));

        let parallel_ms = run_parallel(config, lr, &mut rng, &mut trace);
        timings.push(TimingRow::new(DEFAULT_CANDIDATE_METHOD, lr, parallel_ms));

        info!(lr, sequential_ms, parallel_ms, "benchmarked learning rate");
    }

    debug!(trace_rows = trace.len(), "benchmark complete");
    Ok(BenchmarkResults { trace, timings })
}

fn random_point(rng: &mut StdRng, config: &BenchmarkConfig) -> Vec<f64> {
    (0..config.params)
        .map(|_| rng.gen_range(-config.init_range..config.init_range))
        .collect()
}

fn trace_row(method: &str, lr: f64, t: i32, w: &[f64]) -> ExperimentRow {
    ExperimentRow::new(method, lr, i64::from(t), w[0], w[1], rosenbrock(w))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

// steps fit in i32: checked by validate()
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn run_sequential(
    config: &BenchmarkConfig,
    lr: f64,
    rng: &mut StdRng,
    trace: &mut Vec<ExperimentRow>,
) -> f64 {
    let start = Instant::now();
    let steps = config.steps as i32;

    for k in 0..config.points {
        let mut w = random_point(rng, config);
        let mut opt = Adam::new(config.params, lr);

        for t in 1..=steps {
            let grad = rosenbrock_grad(&w);
            opt.step(&mut w, &grad, t);
            if k == 0 {
                trace.push(trace_row(DEFAULT_BASELINE_METHOD, lr, t, &w));
            }
        }
    }

    elapsed_ms(start)
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn run_parallel(
    config: &BenchmarkConfig,
    lr: f64,
    rng: &mut StdRng,
    trace: &mut Vec<ExperimentRow>,
) -> f64 {
    let start = Instant::now();
    let steps = config.steps as i32;
    let log_every = config.parallel_log_every as i32;

    let mut points: Vec<Vec<f64>> = (0..config.points)
        .map(|_| random_point(rng, config))
        .collect();
    let mut optimizers = vec![Adam::new(config.params, lr); config.points];

    for t in 1..=steps {
        points
            .par_iter_mut()
            .zip(optimizers.par_iter_mut())
            .for_each(|(w, opt)| {
                let grad = rosenbrock_grad(w);
                opt.step(w, &grad, t);
            });

        if t % log_every == 0 {
            trace.push(trace_row(DEFAULT_CANDIDATE_METHOD, lr, t, &points[0]));
        }
    }

    elapsed_ms(start)
}
