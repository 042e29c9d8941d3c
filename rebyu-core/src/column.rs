//! Column implementation for storing named sequences of values

use serde_json::Value;

use crate::schema::{DataType, Field};

/// A named, ordered sequence of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Name of the column
    name: String,

    /// Values in row order
    values: Vec<Value>,
}

impl Column {
    /// Create a new column with the given name and values
    pub fn new<I, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the name of this column
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename this column
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the values of this column
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Get a value by row index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterate over the values in row order
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Get the length of this column (number of values)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this column is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Infer the data type of this column
    pub fn data_type(&self) -> DataType {
        DataType::infer(&self.values)
    }

    /// Describe this column as a schema field
    pub fn field(&self) -> Field {
        Field::new(&self.name, self.data_type())
    }

    /// Consume the column, returning its values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Replace the values wholesale; the dataset re-checks the length
    pub(crate) fn replace_values(&mut self, values: Vec<Value>) -> Vec<Value> {
        std::mem::replace(&mut self.values, values)
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
