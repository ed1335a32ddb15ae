//! # Optimizer benchmark report
//!
//! Turns the two CSV tables written by the sequential-vs-parallel Adam
//! benchmark into four PNG charts and a console speedup summary.
//!
//! ## Pipeline
//!
//! - **Load**: `results/experiments.csv` and `results/timing.csv` into Arrow
//!   tables ([`storage`], [`experiment`])
//! - **Aggregate**: mean loss per step, trajectories, timing pivot
//!   ([`aggregate`])
//! - **Plot**: loss curves, Himmelblau contour with trajectories, grouped and
//!   average timing bars ([`render`], [`surface`])
//! - **Summarize**: per learning rate and overall speedup ([`report`])
//!
//! The two input tables can be produced by [`benchmark`], which times
//! sequential and rayon-parallel Adam on a Rosenbrock objective.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use optim_trace_report::config::ReportConfig;
//! use optim_trace_report::pipeline;
//!
//! let config = ReportConfig::builder().results_dir("results").build()?;
//! let outcome = pipeline::run(&config)?;
//! println!("{}", outcome.report);
//! # Ok::<(), optim_trace_report::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod experiment;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod storage;
pub mod surface;

pub use error::{Error, Result};
