//! Inferred data types for columns and step results

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Data type of a column or a result value
///
/// Types are inferred from the values themselves; they are diagnostic only and
/// never constrain what a step may write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Only null values (or no values at all)
    Null,

    /// Boolean values
    Boolean,

    /// 64-bit signed integers
    Int64,

    /// 64-bit floating point (integers mixed with floats widen to this)
    Float64,

    /// UTF-8 strings
    String,

    /// Lists of values with a common item type
    List(Box<DataType>),

    /// String-keyed maps
    Map,

    /// Values with no common type
    Object,
}

impl DataType {
    /// Infer the type of a single value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => DataType::Null,
            Value::Bool(_) => DataType::Boolean,
            Value::Number(n) if n.is_f64() => DataType::Float64,
            Value::Number(_) => DataType::Int64,
            Value::String(_) => DataType::String,
            Value::Array(items) => DataType::List(Box::new(Self::infer(items))),
            Value::Object(_) => DataType::Map,
        }
    }

    /// Infer the common type of a sequence of values
    ///
    /// Nulls are ignored, so a column with some missing cells keeps the type of
    /// its present cells.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values
            .into_iter()
            .map(Self::of)
            .fold(DataType::Null, |acc, dt| acc.unify(&dt))
    }

    /// Combine two types into the narrowest type covering both
    pub fn unify(&self, other: &DataType) -> DataType {
        match (self, other) {
            (a, b) if a == b => a.clone(),
            (DataType::Null, b) => b.clone(),
            (a, DataType::Null) => a.clone(),
            (a, b) if a.is_numeric() && b.is_numeric() => DataType::Float64,
            (DataType::List(a), DataType::List(b)) => DataType::List(Box::new(a.unify(b))),
            _ => DataType::Object,
        }
    }

    /// Check if this type is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "Null"),
            DataType::Boolean => write!(f, "Boolean"),
            DataType::Int64 => write!(f, "Int64"),
            DataType::Float64 => write!(f, "Float64"),
            DataType::String => write!(f, "String"),
            DataType::List(item_type) => write!(f, "List({item_type})"),
            DataType::Map => write!(f, "Map"),
            DataType::Object => write!(f, "Object"),
        }
    }
}

/// A named, typed column description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Name of the field
    name: String,

    /// Inferred data type of the field
    data_type: DataType,
}

impl Field {
    /// Create a new field
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }

    /// Get the name of this field
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the data type of this field
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.data_type)
    }
}

/// Ordered collection of fields describing a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Get the fields of this schema
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the position of a field by name
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Result<&Field> {
        let index = self.index_of(name)?;
        Ok(&self.fields[index])
    }
}
