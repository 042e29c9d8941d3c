//! Error types for the built-in step library

use thiserror::Error;

/// Error type for built-in step functions
#[derive(Error, Debug)]
pub enum Error {
    /// A cell or column did not hold the shape a function works on
    #[error("Expected {expected}, got {found}")]
    UnexpectedValue {
        /// Description of the accepted shape
        expected: &'static str,
        /// The value that was received
        found: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        let mut found = found.to_string();
        if found.len() > 64 {
            let cut = (0..=64).rev().find(|i| found.is_char_boundary(*i)).unwrap_or(0);
            found.truncate(cut);
            found.push_str("...");
        }
        Error::UnexpectedValue { expected, found }
    }
}

/// Result type for built-in step functions
pub type Result<T> = std::result::Result<T, Error>;
