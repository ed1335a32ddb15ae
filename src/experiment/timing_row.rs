//! Timing Row - wall-clock time of one benchmark run

use std::sync::Arc;

use arrow::array::{Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use super::LearningRate;
use crate::storage::Table;
use crate::Result;

/// Arrow schema of `timing.csv`: `method, lr, execution_time_ms`.
#[must_use]
pub fn timing_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("method", DataType::Utf8, false),
        Field::new("lr", DataType::Float64, false),
        Field::new("execution_time_ms", DataType::Float64, false),
    ]))
}

/// Execution time of one `(method, lr)` benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    method: String,
    lr: LearningRate,
    execution_time_ms: f64,
}

impl TimingRow {
    /// Create a new timing row.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        lr: impl Into<LearningRate>,
        execution_time_ms: f64,
    ) -> Self {
        Self {
            method: method.into(),
            lr: lr.into(),
            execution_time_ms,
        }
    }

    /// Decode every row of a table with [`timing_schema`] columns.
    ///
    /// # Errors
    ///
    /// Returns error if a column is missing, mistyped, or holds empty cells
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let methods = table.utf8_column("method")?;
        let lrs = table.f64_column("lr")?;
        let times = table.f64_column("execution_time_ms")?;

        Ok(methods
            .into_iter()
            .zip(lrs)
            .zip(times)
            .map(|((method, lr), ms)| Self::new(method, lr, ms))
            .collect())
    }

    /// Encode rows as a single-batch table with [`timing_schema`] columns.
    ///
    /// # Errors
    ///
    /// Returns error if Arrow rejects the batch
    pub fn to_table(rows: &[Self]) -> Result<Table> {
        let schema = timing_schema();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(rows.iter().map(Self::method))),
                Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.lr.value()))),
                Arc::new(Float64Array::from_iter_values(
                    rows.iter().map(Self::execution_time_ms),
                )),
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

    /// Wall-clock time in milliseconds.
    #[must_use]
    pub const fn execution_time_ms(&self) -> f64 {
        self.execution_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_round_trip_keeps_order() {
        let rows = vec![
            TimingRow::new("Adam_Sequential", 0.1, 41.0),
            TimingRow::new("Adam_Parallel", 0.1, 12.5),
        ];
        let table = TimingRow::to_table(&rows).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(TimingRow::from_table(&table).unwrap(), rows);
    }
}
