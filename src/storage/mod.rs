//! Table storage (Arrow record batches loaded from CSV)
//!
//! The benchmark writes two flat CSV files. Both are read with an explicit
//! schema so a malformed cell fails at load time instead of surfacing as a
//! wrong number in a chart.
//!
//! Tables are append-only: batches can be added but never edited in place.

use crate::{Error, Result};
use arrow::array::{Array, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::compute;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::SchemaRef;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// In-memory table backed by Arrow record batches
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    /// Create an empty table with the given schema
    #[must_use]
    pub const fn new(schema: SchemaRef) -> Self {
        Self {
            schema,
            batches: Vec::new(),
        }
    }

    /// Create a table from existing batches
    ///
    /// Useful for testing and benchmarking
    ///
    /// # Errors
    ///
    /// Returns error if any batch schema differs from `schema`
    pub fn from_batches(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        let mut table = Self::new(schema);
        for batch in batches {
            table.append_batch(batch)?;
        }
        Ok(table)
    }

    /// Load a headered CSV file using `schema` for column types
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened (`Error::Io`) or a row does
    /// not match the schema (`Error::Arrow`)
    pub fn load_csv<P: AsRef<Path>>(path: P, schema: SchemaRef) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let reader = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .build(file)?;

        let mut table = Self::new(schema);
        for batch in reader {
            table.append_batch(batch?)?;
        }

        info!(path = %path.display(), rows = table.num_rows(), "loaded table");
        Ok(table)
    }

    /// Write every batch to a headered CSV file, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or Arrow fails to encode a
    /// batch
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;

        let mut writer = WriterBuilder::new().with_header(true).build(file);
        for batch in &self.batches {
            writer.write(batch)?;
        }

        info!(path = %path.display(), rows = self.num_rows(), "wrote table");
        Ok(())
    }

    /// Total number of rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Append a batch
    ///
    /// # Errors
    ///
    /// Returns error if the batch schema doesn't match the table schema
    pub fn append_batch(&mut self, batch: RecordBatch) -> Result<()> {
        if batch.schema() != self.schema {
            return Err(Error::StorageError(format!(
                "Schema mismatch: expected {:?}, got {:?}",
                self.schema,
                batch.schema()
            )));
        }

        self.batches.push(batch);
        Ok(())
    }

    /// Concatenate all batches into one
    ///
    /// # Errors
    ///
    /// Returns error if Arrow fails to concatenate
    pub fn combined(&self) -> Result<RecordBatch> {
        match self.batches.as_slice() {
            [] => Ok(RecordBatch::new_empty(self.schema.clone())),
            [single] => Ok(single.clone()),
            batches => compute::concat_batches(&self.schema, batches)
                .map_err(|e| Error::StorageError(format!("Failed to combine batches: {e}"))),
        }
    }

    /// Values of a non-null `Utf8` column, in row order
    ///
    /// # Errors
    ///
    /// Returns error if the column is missing, has another type, or holds nulls
    pub fn utf8_column(&self, name: &str) -> Result<Vec<String>> {
        let batch = self.combined()?;
        let array = downcast_column::<StringArray>(&batch, name, "Utf8")?;
        Ok(array.iter().flatten().map(str::to_string).collect())
    }

    /// Values of a non-null `Float64` column, in row order
    ///
    /// # Errors
    ///
    /// Returns error if the column is missing, has another type, or holds nulls
    pub fn f64_column(&self, name: &str) -> Result<Vec<f64>> {
        let batch = self.combined()?;
        let array = downcast_column::<Float64Array>(&batch, name, "Float64")?;
        Ok(array.values().to_vec())
    }

    /// Values of a non-null `Int64` column, in row order
    ///
    /// # Errors
    ///
    /// Returns error if the column is missing, has another type, or holds nulls
    pub fn i64_column(&self, name: &str) -> Result<Vec<i64>> {
        let batch = self.combined()?;
        let array = downcast_column::<Int64Array>(&batch, name, "Int64")?;
        Ok(array.values().to_vec())
    }
}

fn downcast_column<'a, A: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
    type_name: &str,
) -> Result<&'a A> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| Error::InvalidInput(format!("Column not found: {name}")))?;

    if column.null_count() > 0 {
        return Err(Error::InvalidInput(format!(
            "Column {name} has {} empty cells",
            column.null_count()
        )));
    }

    column.as_any().downcast_ref::<A>().ok_or_else(|| {
        Error::StorageError(format!(
            "Column {name} is {:?}, expected {type_name}",
            column.data_type()
        ))
    })
}
