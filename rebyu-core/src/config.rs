//! Orchestrator configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a [`Rebyu`](crate::orchestrator::Rebyu) orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebyuConfig {
    /// Log every step at info level, regardless of the per-call flag
    pub verbose: bool,

    /// Fail with [`Error::MissingPipeline`](crate::error::Error::MissingPipeline)
    /// when stepping without a pipeline instead of doing nothing
    pub require_pipeline: bool,
}

impl RebyuConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration from a JSON file
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set the verbose flag
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set whether a pipeline is required
    #[must_use]
    pub fn with_require_pipeline(mut self, require_pipeline: bool) -> Self {
        self.require_pipeline = require_pipeline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults_keep_silent_no_pipeline() {
        let config = RebyuConfig::default();
        assert!(!config.verbose);
        assert!(!config.require_pipeline);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RebyuConfig::from_json_str(r#"{"require_pipeline": true}"#).unwrap();
        assert_eq!(config, RebyuConfig::default().with_require_pipeline(true));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = RebyuConfig::from_json_str(r#"{"verbose": "yes"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_json_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rebyu.json");
        fs::write(&path, r#"{"verbose": true}"#).unwrap();

        let config = RebyuConfig::from_json_path(&path).unwrap();
        assert!(config.verbose);
        assert!(matches!(
            RebyuConfig::from_json_path(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
