//! Trace Row - one optimizer iterate per step

use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use super::LearningRate;
use crate::storage::Table;
use crate::Result;

/// Arrow schema of `experiments.csv`: `method, lr, step, x, y, loss`.
#[must_use]
pub fn experiment_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("method", DataType::Utf8, false),
        Field::new("lr", DataType::Float64, false),
        Field::new("step", DataType::Int64, false),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
        Field::new("loss", DataType::Float64, false),
    ]))
}

/// A single logged optimizer step.
///
/// Rows of one `(method, lr)` run appear in step order in the source file;
/// that order is the trajectory order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRow {
    method: String,
    lr: LearningRate,
    step: i64,
    x: f64,
    y: f64,
    loss: f64,
}

impl ExperimentRow {
    /// Create a new trace row.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        lr: impl Into<LearningRate>,
        step: i64,
        x: f64,
        y: f64,
        loss: f64,
    ) -> Self {
        Self {
            method: method.into(),
            lr: lr.into(),
            step,
            x,
            y,
            loss,
        }
    }

    /// Decode every row of a table with [`experiment_schema`] columns.
    ///
    /// # Errors
    ///
    /// Returns error if a column is missing, mistyped, or holds empty cells
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let methods = table.utf8_column("method")?;
        let lrs = table.f64_column("lr")?;
        let steps = table.i64_column("step")?;
        let xs = table.f64_column("x")?;
        let ys = table.f64_column("y")?;
        let losses = table.f64_column("loss")?;

        let rows = methods
            .into_iter()
            .zip(lrs)
            .zip(steps)
            .zip(xs.into_iter().zip(ys))
            .zip(losses)
            .map(|((((method, lr), step), (x, y)), loss)| Self::new(method, lr, step, x, y, loss))
            .collect();
        Ok(rows)
    }

    /// Encode rows as a single-batch table with [`experiment_schema`] columns.
    ///
    /// # Errors
    ///
    /// Returns error if Arrow rejects the batch
    pub fn to_table(rows: &[Self]) -> Result<Table> {
        let schema = experiment_schema();
        let floats = |f: fn(&Self) -> f64| Float64Array::from_iter_values(rows.iter().map(f));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(rows.iter().map(Self::method))),
                Arc::new(floats(|r| r.lr.value())),
                Arc::new(Int64Array::from_iter_values(rows.iter().map(Self::step))),
                Arc::new(floats(Self::x)),
                Arc::new(floats(Self::y)),
                Arc::new(floats(Self::loss)),
            ],
        )?;
        Table::from_batches(schema, vec![batch])
    }

    /// Optimizer method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Learning rate of the run.
    #[must_use]
    pub const fn lr(&self) -> LearningRate {
        self.lr
    }

    /// Step number (1-based in benchmark output).
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// First coordinate of the iterate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Second coordinate of the iterate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Objective value after the step.
    #[must_use]
    pub const fn loss(&self) -> f64 {
        self.loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table_decodes_rows_in_order() {
        let schema = experiment_schema();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Adam_Sequential", "Adam_Parallel"])),
                Arc::new(Float64Array::from(vec![0.01, 0.1])),
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(Float64Array::from(vec![1.0, 2.0])),
                Arc::new(Float64Array::from(vec![-1.0, -2.0])),
                Arc::new(Float64Array::from(vec![10.0, 5.0])),
            ],
        )
        .unwrap();
        let table = Table::from_batches(schema, vec![batch]).unwrap();

        let rows = ExperimentRow::from_table(&table).unwrap();
        assert_eq!(
            rows,
            vec![
                ExperimentRow::new("Adam_Sequential", 0.01, 1, 1.0, -1.0, 10.0),
                ExperimentRow::new("Adam_Parallel", 0.1, 2, 2.0, -2.0, 5.0),
            ]
        );
    }

    #[test]
    fn test_to_table_round_trip() {
        let rows = vec![
            ExperimentRow::new("Adam_Sequential", 0.001, 1, 0.5, -0.25, 1234.5),
            ExperimentRow::new("Adam_Parallel", 0.001, 10, 0.75, 0.5, 99.0),
        ];
        let table = ExperimentRow::to_table(&rows).unwrap();
        assert_eq!(ExperimentRow::from_table(&table).unwrap(), rows);
    }
}
