//! Speedup summary printed after the charts

use std::fmt;
use std::path::{Path, PathBuf};

use crate::aggregate::{mean_time, TimingPivot};
use crate::experiment::{LearningRate, TimingRow};
use crate::{Error, Result};

/// Width of the banner rules
const RULE_WIDTH: usize = 60;

/// Ratio of the baseline time to the candidate time.
#[must_use]
pub fn speedup(baseline_ms: f64, candidate_ms: f64) -> f64 {
    baseline_ms / candidate_ms
}

/// Share of the baseline time saved by the candidate, in percent.
#[must_use]
pub fn time_reduction_pct(baseline_ms: f64, candidate_ms: f64) -> f64 {
    (baseline_ms - candidate_ms) / baseline_ms * 100.0
}

/// Speedup at one learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LrSpeedup {
    /// Learning rate
    pub lr: LearningRate,
    /// Baseline time (ms)
    pub baseline_ms: f64,
    /// Candidate time (ms)
    pub candidate_ms: f64,
    /// `baseline_ms / candidate_ms`
    pub speedup: f64,
}

/// Speedup statistics of the candidate method over the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupReport {
    /// Baseline method name
    pub baseline: String,
    /// Candidate method name
    pub candidate: String,
    /// Per learning rate, in order of first appearance in the timing table
    pub per_lr: Vec<LrSpeedup>,
    /// Mean time of every method, ascending by name
    pub averages: Vec<(String, f64)>,
    /// Mean baseline time
    pub baseline_avg_ms: f64,
    /// Mean candidate time
    pub candidate_avg_ms: f64,
    /// `baseline_avg_ms / candidate_avg_ms`
    pub overall_speedup: f64,
    /// Percent of baseline time saved
    pub time_reduction_pct: f64,
}

impl SpeedupReport {
    /// Compute the report from timing rows.
    ///
    /// `pivot` supplies the method list; building it first guarantees the
    /// rows hold no duplicate `(method, lr)` pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingTiming` if a learning rate lacks a baseline or
    /// candidate row, or `Error::EmptyGroup` if either method has no rows
    pub fn compute(
        rows: &[TimingRow],
        pivot: &TimingPivot,
        baseline: &str,
        candidate: &str,
    ) -> Result<Self> {
        let mut seen: Vec<LearningRate> = Vec::new();
        for row in rows {
            if !seen.contains(&row.lr()) {
                seen.push(row.lr());
            }
        }

        let per_lr = seen
            .into_iter()
            .map(|lr| {
                let baseline_ms = first_time(rows, baseline, lr)?;
                let candidate_ms = first_time(rows, candidate, lr)?;
                Ok(LrSpeedup {
                    lr,
                    baseline_ms,
                    candidate_ms,
                    speedup: speedup(baseline_ms, candidate_ms),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let averages = pivot
            .methods()
            .iter()
            .map(|m| Ok((m.clone(), mean_time(rows, m)?)))
            .collect::<Result<Vec<_>>>()?;

        let baseline_avg_ms = mean_time(rows, baseline)?;
        let candidate_avg_ms = mean_time(rows, candidate)?;

        Ok(Self {
            baseline: baseline.to_string(),
            candidate: candidate.to_string(),
            per_lr,
            averages,
            baseline_avg_ms,
            candidate_avg_ms,
            overall_speedup: speedup(baseline_avg_ms, candidate_avg_ms),
            time_reduction_pct: time_reduction_pct(baseline_avg_ms, candidate_avg_ms),
        })
    }
}

fn first_time(rows: &[TimingRow], method: &str, lr: LearningRate) -> Result<f64> {
    rows.iter()
        .find(|r| r.method() == method && r.lr() == lr)
        .map(TimingRow::execution_time_ms)
        .ok_or_else(|| Error::MissingTiming {
            method: method.to_string(),
            lr: lr.value(),
        })
}

/// Console text: timing table, speedups, averages, summary.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReport<'a> {
    /// Wide timing table
    pub pivot: &'a TimingPivot,
    /// Computed statistics
    pub speedup: &'a SpeedupReport,
    /// Directory the charts were written to
    pub plots_dir: &'a Path,
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let s = self.speedup;

        writeln!(f, "{rule}")?;
        writeln!(f, "EXECUTION TIME ANALYSIS")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "\n📊 Execution Times (ms):")?;
        writeln!(f, "{}", self.pivot)?;

        writeln!(
            f,
            "\n⚡ Speedup Analysis ({} vs {}):",
            s.baseline, s.candidate
        )?;
        for entry in &s.per_lr {
            writeln!(f, "  LR {}: {:.2}x speedup", entry.lr, entry.speedup)?;
        }

        writeln!(f, "\n📈 Average Times:")?;
        for (method, avg) in &s.averages {
            writeln!(f, "  {method}: {avg:.2}ms")?;
        }

        writeln!(f, "\n🎯 Performance Summary:")?;
        writeln!(f, "  Overall Speedup: {:.2}x", s.overall_speedup)?;
        writeln!(f, "  Time Reduction: {:.1}%", s.time_reduction_pct)?;

        write!(
            f,
            "\n✅ All plots saved to {}/ directory!",
            display_dir(self.plots_dir).display()
        )
    }
}

fn display_dir(dir: &Path) -> PathBuf {
    dir.components().collect()
}
