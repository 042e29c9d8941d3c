//! In-memory tabular dataset made of named columns

use std::fmt;

use serde_json::Value;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::schema::Schema;

/// An ordered collection of equally long, uniquely named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Columns in insertion order
    columns: Vec<Column>,

    /// Number of rows shared by every column
    row_count: usize,
}

impl Dataset {
    /// Create a new dataset from columns
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut dataset = Self::empty();
        for column in columns {
            if dataset.has_column(column.name()) {
                return Err(Error::DuplicateColumn(column.name().to_string()));
            }
            dataset.check_length(column.name(), column.len())?;
            dataset.row_count = column.len();
            dataset.columns.push(column);
        }
        Ok(dataset)
    }

    /// Create a dataset with no columns
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Get the number of rows in this dataset
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns in this dataset
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if this dataset has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    /// Check whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Get all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a reference to a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Get the values of a column by name
    pub fn values(&self, name: &str) -> Result<&[Value]> {
        self.column(name).map(Column::values)
    }

    /// Write a column, replacing an existing one of the same name or appending
    /// a new one at the end
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        let replaces_only_column = self.columns.len() == 1 && self.has_column(name);
        if !replaces_only_column {
            self.check_length(name, values.len())?;
        }

        self.row_count = values.len();
        match self.columns.iter_mut().find(|c| c.name() == name) {
            Some(column) => {
                column.replace_values(values);
            }
            None => self.columns.push(Column::new(name, values)),
        }
        Ok(())
    }

    /// Remove a column by name, returning it
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let index = self
            .columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        let column = self.columns.remove(index);
        if self.columns.is_empty() {
            self.row_count = 0;
        }
        Ok(column)
    }

    /// Describe the columns and their inferred types
    pub fn schema(&self) -> Schema {
        Schema::new(self.columns.iter().map(Column::field).collect())
    }

    /// Lend a whole column to `f` as a single array value
    ///
    /// The values are moved into the array for the duration of the call and moved
    /// back afterwards, so aggregating steps see the column without copying it.
    pub(crate) fn with_column_array<R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&Value) -> R,
    ) -> Result<R> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;

        let array = Value::Array(column.replace_values(Vec::new()));
        let result = f(&array);
        if let Value::Array(values) = array {
            column.replace_values(values);
        }
        Ok(result)
    }

    fn check_length(&self, name: &str, len: usize) -> Result<()> {
        if !self.columns.is_empty() && len != self.row_count {
            return Err(Error::LengthMismatch {
                column: name.to_string(),
                expected: self.row_count,
                actual: len,
            });
        }
        Ok(())
    }
}

impl From<Column> for Dataset {
    fn from(column: Column) -> Self {
        Self {
            row_count: column.len(),
            columns: vec![column],
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {} rows x {} columns", self.row_count, self.columns.len())?;
        for column in &self.columns {
            writeln!(f, "  {}", column.field())?;
        }
        Ok(())
    }
}
