//! Run the sequential vs parallel Adam benchmark and write
//! `results/experiments.csv` and `results/timing.csv`.
//!
//! The workload comes from `optim-bench.json` and the output location from
//! `optim-report.json` when either file exists in the working directory.

use anyhow::Context;
use optim_trace_report::benchmark::{self, BenchmarkConfig, BENCH_CONFIG_FILE};
use optim_trace_report::config::{ReportConfig, CONFIG_FILE};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let workload = BenchmarkConfig::load_or_default(BENCH_CONFIG_FILE)
        .with_context(|| format!("failed to load {BENCH_CONFIG_FILE}"))?;
    let report = ReportConfig::load_or_default(CONFIG_FILE)
        .with_context(|| format!("failed to load {CONFIG_FILE}"))?;

    let results = benchmark::run(&workload).context("benchmark failed")?;
    let (experiments, timing) = results
        .write(&report)
        .with_context(|| format!("failed to write {}", report.results_dir.display()))?;

    println!("✅ Experiment complete. Results saved to {}", experiments.display());
    println!("✅ Timing data saved to {}", timing.display());
    Ok(())
}
