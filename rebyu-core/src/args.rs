//! Keyword-argument bundles passed to step functions

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Named arguments bound to a step and handed to its function on every call
pub type Args = Map<String, Value>;

/// Build an argument bundle from name/value pairs
pub fn args<I, K, V>(pairs: I) -> Args
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Typed lookups with defaults for argument bundles
///
/// A missing key or an explicit null yields the default; a present value of the
/// wrong type is an [`Error::InvalidArgument`].
pub trait ArgsExt {
    /// Get a string argument
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str>;

    /// Get an integer argument
    fn i64_or(&self, key: &str, default: i64) -> Result<i64>;

    /// Get a non-negative integer argument
    fn usize_or(&self, key: &str, default: usize) -> Result<usize>;

    /// Get a numeric argument
    fn f64_or(&self, key: &str, default: f64) -> Result<f64>;

    /// Get a boolean argument
    fn bool_or(&self, key: &str, default: bool) -> Result<bool>;

    /// Get a list of strings, empty when absent
    fn str_list(&self, key: &str) -> Result<Vec<&str>>;
}

impl ArgsExt for Args {
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(wrong_type(key, "a string", other)),
        }
    }

    fn i64_or(&self, key: &str, default: i64) -> Result<i64> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => value.as_i64().ok_or_else(|| wrong_type(key, "an integer", value)),
        }
    }

    fn usize_or(&self, key: &str, default: usize) -> Result<usize> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| wrong_type(key, "a non-negative integer", value)),
        }
    }

    fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => value.as_f64().ok_or_else(|| wrong_type(key, "a number", value)),
        }
    }

    fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| wrong_type(key, "a boolean", value)),
        }
    }

    fn str_list(&self, key: &str) -> Result<Vec<&str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.as_str()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| wrong_type(key, "a list of strings", item))
                })
                .collect(),
            Some(other) => Err(wrong_type(key, "a list of strings", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> Error {
    Error::InvalidArgument(format!("argument '{key}' must be {expected}, got {found}"))
}
