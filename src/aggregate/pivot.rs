//! Timing pivot: one row per method, one column per learning rate

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::experiment::{LearningRate, TimingRow};
use crate::{Error, Result};

/// Wide-format timing table.
///
/// Methods (rows) and learning rates (columns) are sorted ascending. A cell is
/// `None` when the benchmark produced no row for that combination.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPivot {
    methods: Vec<String>,
    learning_rates: Vec<LearningRate>,
    cells: Vec<Vec<Option<f64>>>,
}

impl TimingPivot {
    /// Pivot long-format timing rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateTiming` if a `(method, lr)` pair appears more
    /// than once
    pub fn from_rows(rows: &[TimingRow]) -> Result<Self> {
        let mut values: BTreeMap<(&str, LearningRate), f64> = BTreeMap::new();
        let mut methods: BTreeSet<&str> = BTreeSet::new();
        let mut learning_rates: BTreeSet<LearningRate> = BTreeSet::new();

        for row in rows {
            if values
                .insert((row.method(), row.lr()), row.execution_time_ms())
                .is_some()
            {
                return Err(Error::DuplicateTiming {
                    method: row.method().to_string(),
                    lr: row.lr().value(),
                });
            }
            methods.insert(row.method());
            learning_rates.insert(row.lr());
        }

        let cells = methods
            .iter()
            .map(|method| {
                learning_rates
                    .iter()
                    .map(|lr| values.get(&(*method, *lr)).copied())
                    .collect()
            })
            .collect();

        debug!(
            methods = methods.len(),
            learning_rates = learning_rates.len(),
            "pivoted timing table"
        );

        Ok(Self {
            methods: methods.into_iter().map(str::to_string).collect(),
            learning_rates: learning_rates.into_iter().collect(),
            cells,
        })
    }

    /// Row labels (method names, ascending).
    #[must_use]
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Column labels (learning rates, ascending).
    #[must_use]
    pub fn learning_rates(&self) -> &[LearningRate] {
        &self.learning_rates
    }

    /// Cells of one method, aligned with [`Self::learning_rates`].
    #[must_use]
    pub fn row(&self, method: &str) -> Option<&[Option<f64>]> {
        self.methods
            .iter()
            .position(|m| m == method)
            .map(|i| self.cells[i].as_slice())
    }

    /// Execution time for one `(method, lr)` pair.
    #[must_use]
    pub fn get(&self, method: &str, lr: LearningRate) -> Option<f64> {
        let col = self.learning_rates.iter().position(|l| *l == lr)?;
        self.row(method).and_then(|row| row[col])
    }

    /// Largest value in the table, if any cell is filled.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .reduce(f64::max)
    }
}

impl fmt::Display for TimingPivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_text = |v: Option<f64>| v.map_or_else(|| "NaN".to_string(), |v| format!("{v:.2}"));

        let label_width = self
            .methods
            .iter()
            .map(String::len)
            .chain(["method".len(), "lr".len()])
            .max()
            .unwrap_or(0);

        let col_widths: Vec<usize> = self
            .learning_rates
            .iter()
            .enumerate()
            .map(|(col, lr)| {
                self.cells
                    .iter()
                    .map(|row| cell_text(row[col]).len())
                    .chain(std::iter::once(lr.to_string().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<label_width$}", "lr")?;
        for (lr, width) in self.learning_rates.iter().zip(col_widths.iter().copied()) {
            write!(f, "  {:>width$}", lr.to_string())?;
        }
        writeln!(f)?;
        write!(f, "{:<label_width$}", "method")?;

        for (method, row) in self.methods.iter().zip(&self.cells) {
            writeln!(f)?;
            write!(f, "{method:<label_width$}")?;
            for (value, width) in row.iter().zip(col_widths.iter().copied()) {
                write!(f, "  {:>width$}", cell_text(*value))?;
            }
        }
        Ok(())
    }
}

/// Mean execution time of `method` across all learning rates.
///
/// # Errors
///
/// Returns `Error::EmptyGroup` if the method has no timing rows
#[allow(clippy::cast_precision_loss)]
pub fn mean_time(rows: &[TimingRow], method: &str) -> Result<f64> {
    let times: Vec<f64> = rows
        .iter()
        .filter(|r| r.method() == method)
        .map(TimingRow::execution_time_ms)
        .collect();

    if times.is_empty() {
        return Err(Error::EmptyGroup(format!("no timing rows for method '{method}'")));
    }
    Ok(times.iter().sum::<f64>() / times.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TimingRow> {
        vec![
            TimingRow::new("Adam_Sequential", 0.1, 100.0),
            TimingRow::new("Adam_Parallel", 0.1, 25.0),
            TimingRow::new("Adam_Sequential", 0.01, 80.0),
            TimingRow::new("Adam_Parallel", 0.01, 20.0),
        ]
    }

    #[test]
    fn test_pivot_sorts_methods_and_rates() {
        let pivot = TimingPivot::from_rows(&rows()).unwrap();
        assert_eq!(pivot.methods(), ["Adam_Parallel", "Adam_Sequential"]);
        let lrs: Vec<f64> = pivot.learning_rates().iter().map(|l| l.value()).collect();
        assert_eq!(lrs, vec![0.01, 0.1]);
        assert_eq!(pivot.row("Adam_Sequential"), Some(&[Some(80.0), Some(100.0)][..]));
        assert_eq!(pivot.get("Adam_Parallel", LearningRate::new(0.1)), Some(25.0));
        assert_eq!(pivot.max_value(), Some(100.0));
    }

    #[test]
    fn test_pivot_rejects_duplicates() {
        let mut rows = rows();
        rows.push(TimingRow::new("Adam_Parallel", 0.1, 30.0));

        let err = TimingPivot::from_rows(&rows).unwrap_err();
        match err {
            Error::DuplicateTiming { method, lr } => {
                assert_eq!(method, "Adam_Parallel");
                assert!((lr - 0.1).abs() < f64::EPSILON);
            }
            other => panic!("expected DuplicateTiming, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_combination_is_none() {
        let rows = vec![
            TimingRow::new("Adam_Sequential", 0.1, 100.0),
            TimingRow::new("Adam_Parallel", 0.01, 20.0),
        ];
        let pivot = TimingPivot::from_rows(&rows).unwrap();
        assert_eq!(pivot.get("Adam_Parallel", LearningRate::new(0.1)), None);
        assert_eq!(pivot.get("SGD", LearningRate::new(0.1)), None);
        assert!(pivot.to_string().contains("NaN"));
    }

    #[test]
    fn test_display_layout() {
        let pivot = TimingPivot::from_rows(&rows()).unwrap();
        let text = pivot.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("lr"));
        assert!(lines[0].contains("0.01"));
        assert_eq!(lines[1].trim_end(), "method");
        assert!(lines[2].starts_with("Adam_Parallel"));
        assert!(lines[2].contains("20.00"));
        assert!(lines[3].contains("100.00"));
    }

    #[test]
    fn test_mean_time() {
        let rows = vec![
            TimingRow::new("Adam_Sequential", 0.1, 10.0),
            TimingRow::new("Adam_Sequential", 0.01, 20.0),
            TimingRow::new("Adam_Sequential", 0.001, 30.0),
        ];
        let mean = mean_time(&rows, "Adam_Sequential").unwrap();
        assert!((mean - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_time_empty_group() {
        let err = mean_time(&rows(), "SGD").unwrap_err();
        assert!(matches!(err, Error::EmptyGroup(_)));
    }
}
