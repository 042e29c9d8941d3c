//! CSV loading and saving of datasets

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde_json::Value;

use crate::column::Column;
use crate::dataset::Dataset;
use crate::error::Result;

/// Options for reading CSV into a dataset
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV has a header row
    pub has_header: bool,

    /// Delimiter character
    pub delimiter: u8,

    /// Quote character
    pub quote: u8,

    /// Whether to trim whitespace around fields
    pub trim: bool,

    /// Parse integer, float and boolean looking fields instead of keeping text
    pub infer_types: bool,

    /// Treat empty fields as null
    pub empty_as_null: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            trim: false,
            infer_types: false,
            empty_as_null: true,
        }
    }
}

/// Read a dataset from any CSV source
///
/// Without a header the columns are named `column_0`, `column_1`, ...
/// Short rows are padded with nulls.
pub fn read_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(options.has_header)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .flexible(true)
        .from_reader(reader);

    let mut names: Vec<String> = if options.has_header {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    let mut rows = 0;

    for record in reader.records() {
        let record = record?;
        while columns.len() < record.len() {
            names.push(format!("column_{}", names.len()));
            columns.push(vec![Value::Null; rows]);
        }
        for (index, column) in columns.iter_mut().enumerate() {
            let value = record
                .get(index)
                .map_or(Value::Null, |field| parse_field(field, options));
            column.push(value);
        }
        rows += 1;
    }

    tracing::debug!(rows, columns = names.len(), "read csv dataset");

    Dataset::new(
        names
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )
}

/// Read a dataset from a CSV file
pub fn read_csv_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Dataset> {
    let file = File::open(path)?;
    read_csv(file, options)
}

/// Write a dataset as CSV with a header row
///
/// Strings are written verbatim, nulls as empty fields and any other value as
/// its JSON text.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(dataset.column_names())?;
    for row in 0..dataset.row_count() {
        writer.write_record(dataset.columns().iter().map(|c| match c.get(row) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }))?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_field(field: &str, options: &CsvOptions) -> Value {
    if field.is_empty() && options.empty_as_null {
        return Value::Null;
    }
    if options.infer_types {
        if let Ok(i) = field.parse::<i64>() {
            return Value::from(i);
        }
        if let Ok(f) = field.parse::<f64>() {
            if f.is_finite() {
                return Value::from(f);
            }
        }
        match field {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
    }
    Value::String(field.to_string())
}
