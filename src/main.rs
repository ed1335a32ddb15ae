//! Render the optimizer benchmark charts from `results/` and print the
//! speedup summary.
//!
//! Run from the directory containing `results/`. Settings come from
//! `optim-report.json` in the same directory when present:
//!
//! ```text
//! RUST_LOG=debug optim-trace-report
//! ```

use anyhow::Context;
use optim_trace_report::config::{ReportConfig, CONFIG_FILE};
use optim_trace_report::pipeline;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::load_or_default(CONFIG_FILE)
        .with_context(|| format!("failed to load {CONFIG_FILE}"))?;
    let outcome = pipeline::run(&config).with_context(|| {
        format!(
            "failed to build report from {}",
            config.results_dir.display()
        )
    })?;

    println!("{}", outcome.report);
    Ok(())
}
