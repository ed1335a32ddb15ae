//! Report configuration
//!
//! Defaults reproduce the benchmark's fixed layout: inputs under `results/`,
//! charts under `results/plots/` at 300 DPI.
//!
//! A JSON file may override any subset of fields; omitted fields keep their
//! defaults:
//!
//! ```json
//! { "dpi": 150, "highlight_lr": 0.1 }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::surface::{DEFAULT_BOUND, DEFAULT_LEVELS, DEFAULT_RESOLUTION};
use crate::{Error, Result};

/// Method measured as the reference time in speedup ratios
pub const DEFAULT_BASELINE_METHOD: &str = "Adam_Sequential";

/// Method whose speedup over the baseline is reported
pub const DEFAULT_CANDIDATE_METHOD: &str = "Adam_Parallel";

/// Only trajectories at this learning rate get a legend entry
pub const DEFAULT_HIGHLIGHT_LR: f64 = 0.01;

/// Optional configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "optim-report.json";

/// Parse a JSON settings file; fields absent from the file keep the type's
/// serde defaults.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    let value = serde_json::from_str(&text)?;
    info!(path = %path.display(), "loaded settings file");
    Ok(value)
}

/// Settings for one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory holding the benchmark CSV files
    pub results_dir: PathBuf,
    /// File name of the per-step trace table
    pub experiments_file: String,
    /// File name of the timing table
    pub timing_file: String,
    /// Output directory for charts
    pub plots_dir: PathBuf,
    /// Raster resolution in dots per inch
    pub dpi: u32,
    /// Reference method (numerator of the speedup)
    pub baseline_method: String,
    /// Compared method (denominator of the speedup)
    pub candidate_method: String,
    /// Learning rate whose trajectories are labelled
    pub highlight_lr: f64,
    /// Half-width of the contour square
    pub surface_bound: f64,
    /// Contour samples per axis
    pub surface_resolution: usize,
    /// Filled contour bands
    pub contour_levels: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            experiments_file: "experiments.csv".to_string(),
            timing_file: "timing.csv".to_string(),
            plots_dir: PathBuf::from("results/plots"),
            dpi: 300,
            baseline_method: DEFAULT_BASELINE_METHOD.to_string(),
            candidate_method: DEFAULT_CANDIDATE_METHOD.to_string(),
            highlight_lr: DEFAULT_HIGHLIGHT_LR,
            surface_bound: DEFAULT_BOUND,
            surface_resolution: DEFAULT_RESOLUTION,
            contour_levels: DEFAULT_LEVELS,
        }
    }
}

impl ReportConfig {
    /// Create a configuration builder starting from the defaults
    #[must_use]
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Read a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, `Error::Config` if it
    /// is not valid JSON for this struct, or `Error::InvalidInput` if a
    /// setting is out of range
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` when it exists, otherwise fall back to the defaults
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be loaded
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_json_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Path of the per-step trace table
    #[must_use]
    pub fn experiments_path(&self) -> PathBuf {
        self.results_dir.join(&self.experiments_file)
    }

    /// Path of the timing table
    #[must_use]
    pub fn timing_path(&self) -> PathBuf {
        self.results_dir.join(&self.timing_file)
    }

    /// Methods in chart order: baseline first
    #[must_use]
    pub fn methods(&self) -> [&str; 2] {
        [self.baseline_method.as_str(), self.candidate_method.as_str()]
    }

    /// Check invariants the renderers and reporter rely on
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` describing the first violated setting
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::InvalidInput("dpi must be positive".to_string()));
        }
        if self.surface_resolution < 2 {
            return Err(Error::InvalidInput(format!(
                "surface resolution must be at least 2, got {}",
                self.surface_resolution
            )));
        }
        if self.contour_levels == 0 {
            return Err(Error::InvalidInput(
                "contour levels must be positive".to_string(),
            ));
        }
        if !(self.surface_bound.is_finite() && self.surface_bound > 0.0) {
            return Err(Error::InvalidInput(format!(
                "surface bound must be positive, got {}",
                self.surface_bound
            )));
        }
        if self.baseline_method.is_empty() || self.candidate_method.is_empty() {
            return Err(Error::InvalidInput("method names must not be empty".to_string()));
        }
        if self.baseline_method == self.candidate_method {
            return Err(Error::InvalidInput(format!(
                "baseline and candidate method are both '{}'",
                self.baseline_method
            )));
        }
        Ok(())
    }
}

/// Builder for `ReportConfig`
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Set the input directory; charts go to `<dir>/plots` unless
    /// [`Self::plots_dir`] is called afterwards
    #[must_use]
    pub fn results_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.results_dir = dir.as_ref().to_path_buf();
        self.config.plots_dir = dir.as_ref().join("plots");
        self
    }

    /// Set the chart output directory
    #[must_use]
    pub fn plots_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.plots_dir = dir.into();
        self
    }

    /// Set the trace and timing file names
    #[must_use]
    pub fn input_files(
        mut self,
        experiments: impl Into<String>,
        timing: impl Into<String>,
    ) -> Self {
        self.config.experiments_file = experiments.into();
        self.config.timing_file = timing.into();
        self
    }

    /// Set raster resolution
    #[must_use]
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    /// Set the compared methods
    #[must_use]
    pub fn methods(mut self, baseline: impl Into<String>, candidate: impl Into<String>) -> Self {
        self.config.baseline_method = baseline.into();
        self.config.candidate_method = candidate.into();
        self
    }

    /// Set the labelled trajectory learning rate
    #[must_use]
    pub fn highlight_lr(mut self, lr: f64) -> Self {
        self.config.highlight_lr = lr;
        self
    }

    /// Set contour extent, samples per axis, and band count
    #[must_use]
    pub fn surface(mut self, bound: f64, resolution: usize, levels: usize) -> Self {
        self.config.surface_bound = bound;
        self.config.surface_resolution = resolution;
        self.config.contour_levels = levels;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns error if a setting is out of range
    pub fn build(self) -> Result<ReportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ReportConfig::default();
        assert_eq!(config.experiments_path(), PathBuf::from("results/experiments.csv"));
        assert_eq!(config.timing_path(), PathBuf::from("results/timing.csv"));
        assert_eq!(config.plots_dir, PathBuf::from("results/plots"));
        assert_eq!(config.dpi, 300);
        assert_eq!(config.methods(), ["Adam_Sequential", "Adam_Parallel"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_results_dir_moves_plots() {
        let config = ReportConfig::builder().results_dir("/tmp/run").dpi(72).build().unwrap();
        assert_eq!(config.plots_dir, PathBuf::from("/tmp/run/plots"));
        assert_eq!(config.timing_path(), PathBuf::from("/tmp/run/timing.csv"));
        assert_eq!(config.dpi, 72);
    }

    #[test]
    fn test_builder_rejects_zero_dpi() {
        let err = ReportConfig::builder().dpi(0).build().unwrap_err();
        assert!(err.to_string().contains("dpi"));
    }

    #[test]
    fn test_builder_rejects_same_methods() {
        let err = ReportConfig::builder().methods("Adam", "Adam").build().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_builder_rejects_tiny_grid() {
        assert!(ReportConfig::builder().surface(6.0, 1, 50).build().is_err());
        assert!(ReportConfig::builder().surface(6.0, 10, 0).build().is_err());
        assert!(ReportConfig::builder().surface(-1.0, 10, 5).build().is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = ReportConfig::builder()
            .results_dir("bench-out")
            .dpi(150)
            .highlight_lr(0.1)
            .build()
            .unwrap();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(ReportConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn test_json_file_partial_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "dpi": 96, "candidate_method": "Adam_Batched" }"#).unwrap();

        let config = ReportConfig::from_json_file(&path).unwrap();
        assert_eq!(config.dpi, 96);
        assert_eq!(config.candidate_method, "Adam_Batched");
        assert_eq!(config.baseline_method, DEFAULT_BASELINE_METHOD);
        assert_eq!(config.plots_dir, PathBuf::from("results/plots"));
    }

    #[test]
    fn test_json_file_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        fs::write(&path, r#"{ "dpi": 0 }"#).unwrap();
        let err = ReportConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        fs::write(&path, r#"{ "dpi": "high" }"#).unwrap();
        let err = ReportConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::load_or_default(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ReportConfig::default());
    }
}
