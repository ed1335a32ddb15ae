//! Learning rate group key

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Learning rate usable as a grouping key.
///
/// Rows are grouped by the exact value written to the CSV, so equality and
/// hashing use the bit pattern and ordering uses `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct LearningRate(f64);

impl LearningRate {
    /// Wrap a raw learning rate.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether this rate is within `1e-12` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: f64) -> bool {
        (self.0 - other).abs() < 1e-12
    }
}

impl From<f64> for LearningRate {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for LearningRate {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for LearningRate {}

impl Hash for LearningRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for LearningRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LearningRate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for LearningRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
