//! Benchmark result records
//!
//! The optimizer benchmark writes two tables:
//!
//! ```text
//! experiments.csv   method,lr,step,x,y,loss          (one row per logged step)
//! timing.csv        method,lr,execution_time_ms      (one row per (method, lr))
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use optim_trace_report::experiment::{load_experiments, load_timings};
//!
//! let steps = load_experiments("results/experiments.csv")?;
//! let timings = load_timings("results/timing.csv")?;
//! println!("{} steps, {} timing rows", steps.len(), timings.len());
//! # Ok::<(), optim_trace_report::Error>(())
//! ```

mod learning_rate;
mod timing_row;
mod trace_row;

pub use learning_rate::LearningRate;
pub use timing_row::{timing_schema, TimingRow};
pub use trace_row::{experiment_schema, ExperimentRow};

use crate::storage::Table;
use crate::Result;
use std::path::Path;

/// Load and decode `experiments.csv`.
///
/// # Errors
///
/// Returns error if the file is missing or malformed
pub fn load_experiments<P: AsRef<Path>>(path: P) -> Result<Vec<ExperimentRow>> {
    let table = Table::load_csv(path, experiment_schema())?;
    ExperimentRow::from_table(&table)
}

/// Load and decode `timing.csv`.
///
/// # Errors
///
/// Returns error if the file is missing or malformed
pub fn load_timings<P: AsRef<Path>>(path: P) -> Result<Vec<TimingRow>> {
    let table = Table::load_csv(path, timing_schema())?;
    TimingRow::from_table(&table)
}
